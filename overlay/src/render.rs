//! Rendering: rebuilds the overlay surface from a page's stroke log.
//!
//! This module is the only place that touches [`tiny_skia`]. It receives
//! read-only views of the stroke log and produces pixels; it does not mutate
//! any engine state.
//!
//! Every full draw starts from a transparent surface and replays the committed
//! strokes in order, then the in-progress stroke. [`compose`] skips the replay
//! by starting from a cached layer of the committed strokes. Points are stored at the
//! scale they were recorded at and are rescaled by `scale / stroke.scale()`,
//! so zooming never stretches or drops earlier annotations. Eraser strokes
//! clear pixels with [`BlendMode::Clear`], which only affects what was drawn
//! before them in the log.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use tiny_skia::{BlendMode, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as SkStroke, Transform};

use crate::config::OverlayConfig;
use crate::session::{Stroke, StrokeTool};

/// Pen and eraser appearance, in surface pixels at a stroke's recording scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub pen_width: f64,
    pub pen_color: [u8; 4],
    pub eraser_radius: f64,
}

impl StrokeStyle {
    #[must_use]
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self { pen_width: config.pen_width, pen_color: config.pen_color, eraser_radius: config.eraser_radius }
    }
}

/// The drawable overlay: an RGBA raster the size of the scaled page.
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Allocate a transparent surface. Returns `None` for a zero or
    /// unrepresentably large size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Read-only access to the pixels, for compositing or encoding.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Alpha of the pixel at `(x, y)`; 0 outside the surface.
    #[must_use]
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixmap.pixel(x, y).map_or(0, |p| p.alpha())
    }

    /// `true` if no pixel has any coverage.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Reallocate to `width` x `height` if the size differs.
    ///
    /// Returns `false` and keeps the old raster if the new size cannot be
    /// allocated. Content is not preserved; callers redraw afterwards.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.size() == (width, height) {
            return true;
        }
        match Pixmap::new(width, height) {
            Some(pixmap) => {
                self.pixmap = pixmap;
                true
            }
            None => {
                tracing::warn!(width, height, "surface allocation failed; keeping previous size");
                false
            }
        }
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }
}

/// Redraw `surface` from scratch: `committed` in order, then `in_progress`.
pub fn draw(surface: &mut Surface, committed: &[Stroke], in_progress: Option<&Stroke>, scale: f64, style: &StrokeStyle) {
    surface.clear();
    for stroke in committed.iter().chain(in_progress) {
        draw_stroke(&mut surface.pixmap, stroke, scale, style);
    }
}

/// Copy the pre-rendered `committed` layer into `surface`, then draw
/// `in_progress` over it. Costs one pixel copy regardless of how many strokes
/// the layer holds.
pub fn compose(surface: &mut Surface, committed: &Surface, in_progress: Option<&Stroke>, scale: f64, style: &StrokeStyle) {
    surface.pixmap.clone_from(&committed.pixmap);
    if let Some(stroke) = in_progress {
        draw_stroke(&mut surface.pixmap, stroke, scale, style);
    }
}

fn draw_stroke(pixmap: &mut Pixmap, stroke: &Stroke, scale: f64, style: &StrokeStyle) {
    let transform = replay_transform(stroke, scale);
    match stroke.tool() {
        StrokeTool::Pen => draw_pen(pixmap, stroke, transform, style),
        StrokeTool::Eraser => draw_eraser(pixmap, stroke, transform, style),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn replay_transform(stroke: &Stroke, scale: f64) -> Transform {
    let recorded = stroke.scale();
    if !(recorded.is_finite() && recorded > 0.0) {
        return Transform::identity();
    }
    let factor = (scale / recorded) as f32;
    Transform::from_scale(factor, factor)
}

// =============================================================
// Pen
// =============================================================

#[allow(clippy::cast_possible_truncation)]
fn draw_pen(pixmap: &mut Pixmap, stroke: &Stroke, transform: Transform, style: &StrokeStyle) {
    let [r, g, b, a] = style.pen_color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let points = stroke.points();
    if points.len() == 1 {
        // A lone point has no length to stroke; paint the cap as a dot.
        let p = points[0];
        if let Some(dot) = PathBuilder::from_circle(p.x as f32, p.y as f32, (style.pen_width / 2.0) as f32) {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, transform, None);
        }
        return;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(points[0].x as f32, points[0].y as f32);
    for p in &points[1..] {
        pb.line_to(p.x as f32, p.y as f32);
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let line = SkStroke {
        width: style.pen_width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..SkStroke::default()
    };
    pixmap.stroke_path(&path, &paint, &line, transform, None);
}

// =============================================================
// Eraser
// =============================================================

#[allow(clippy::cast_possible_truncation)]
fn draw_eraser(pixmap: &mut Pixmap, stroke: &Stroke, transform: Transform, style: &StrokeStyle) {
    let mut paint = Paint::default();
    paint.blend_mode = BlendMode::Clear;
    paint.anti_alias = true;

    let radius = style.eraser_radius as f32;
    for p in stroke.points() {
        if let Some(disc) = PathBuilder::from_circle(p.x as f32, p.y as f32, radius) {
            pixmap.fill_path(&disc, &paint, FillRule::Winding, transform, None);
        }
    }
}
