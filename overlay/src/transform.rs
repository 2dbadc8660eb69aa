#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::config::OverlayConfig;
use crate::consts::{INITIAL_SCALE, MIN_SCALE};

/// A point in either screen or surface space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `true` if neither coordinate is NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Zoom and pan state for the page view.
///
/// `offset_x` / `offset_y` are in screen pixels and translate the surface.
/// `scale` sizes the surface (1.0 = nominal page size). Stroke coordinates are
/// never multiplied by `scale` here; the renderer rescales them on replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    min_scale: f64,
    max_scale: Option<f64>,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { scale: INITIAL_SCALE, offset_x: 0.0, offset_y: 0.0, min_scale: MIN_SCALE, max_scale: None }
    }
}

impl ViewTransform {
    /// Identity transform using the zoom limits from `config`.
    #[must_use]
    pub fn with_limits(config: &OverlayConfig) -> Self {
        let mut scale = INITIAL_SCALE.max(config.min_scale);
        if let Some(max) = config.max_scale {
            scale = scale.min(max);
        }
        Self { min_scale: config.min_scale, max_scale: config.max_scale, scale, ..Self::default() }
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Increase the scale by `step`, clamped to the max scale if one is set.
    /// Never lowers the scale.
    ///
    /// Returns `true` if the scale changed.
    pub fn zoom_in_by(&mut self, step: f64) -> bool {
        if !(step.is_finite() && step > 0.0) {
            tracing::debug!(step, "ignoring invalid zoom step");
            return false;
        }
        let mut next = self.scale + step;
        if let Some(max) = self.max_scale {
            next = next.min(max).max(self.scale);
        }
        self.set_scale(next)
    }

    /// Decrease the scale by `step`, never going below the min scale.
    ///
    /// Returns `true` if the scale changed.
    pub fn zoom_out_by(&mut self, step: f64) -> bool {
        if !(step.is_finite() && step > 0.0) {
            tracing::debug!(step, "ignoring invalid zoom step");
            return false;
        }
        self.set_scale((self.scale - step).max(self.min_scale))
    }

    #[allow(clippy::float_cmp)]
    fn set_scale(&mut self, next: f64) -> bool {
        if next == self.scale {
            return false;
        }
        self.scale = next;
        true
    }

    /// Translate the surface by a screen-space delta. Unbounded.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            tracing::debug!(dx, dy, "ignoring non-finite pan delta");
            return;
        }
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Convert a screen-space pointer position to surface-local pixels.
    #[must_use]
    pub fn to_surface_space(&self, screen: Point) -> Point {
        Point { x: screen.x - self.offset_x, y: screen.y - self.offset_y }
    }

    /// Convert a surface-local position back to screen space.
    #[must_use]
    pub fn to_screen_space(&self, surface: Point) -> Point {
        Point { x: surface.x + self.offset_x, y: surface.y + self.offset_y }
    }

    /// Surface size in whole pixels for a page of `base_w` x `base_h` at the
    /// current scale. Each side is at least one pixel.
    #[must_use]
    pub fn surface_size(&self, base_w: f64, base_h: f64) -> (u32, u32) {
        scaled_size(base_w, base_h, self.scale)
    }
}

/// Pixel size of a `base_w` x `base_h` page at `scale`, rounded, at least
/// one pixel per side. Page rasters and the overlay both size through here.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scaled_size(base_w: f64, base_h: f64, scale: f64) -> (u32, u32) {
    let w = (scale * base_w).round().max(1.0);
    let h = (scale * base_h).round().max(1.0);
    (w as u32, h as u32)
}
