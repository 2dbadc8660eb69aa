use super::*;
use crate::transform::Point;

fn style() -> StrokeStyle {
    StrokeStyle::from_config(&OverlayConfig::default())
}

fn surface(w: u32, h: u32) -> Surface {
    match Surface::new(w, h) {
        Some(s) => s,
        None => panic!("surface allocation failed"),
    }
}

fn stroke(tool: StrokeTool, scale: f64, points: &[(f64, f64)]) -> Stroke {
    let mut s = Stroke::begin(tool, Point::new(points[0].0, points[0].1), scale);
    for &(x, y) in &points[1..] {
        s.push(Point::new(x, y));
    }
    s.commit();
    s
}

// =============================================================
// Surface
// =============================================================

#[test]
fn surface_new_is_blank() {
    let s = surface(40, 60);
    assert_eq!(s.size(), (40, 60));
    assert!(s.is_blank());
}

#[test]
fn surface_new_zero_size_is_none() {
    assert!(Surface::new(0, 10).is_none());
}

#[test]
fn surface_resize_changes_size() {
    let mut s = surface(10, 10);
    assert!(s.resize(20, 30));
    assert_eq!(s.size(), (20, 30));
}

#[test]
fn surface_resize_to_zero_keeps_previous() {
    let mut s = surface(10, 10);
    assert!(!s.resize(0, 0));
    assert_eq!(s.size(), (10, 10));
}

#[test]
fn alpha_outside_surface_is_zero() {
    let s = surface(10, 10);
    assert_eq!(s.alpha_at(100, 100), 0);
}

// =============================================================
// Pen
// =============================================================

#[test]
fn pen_stroke_paints_along_path() {
    let mut s = surface(100, 100);
    let pen = stroke(StrokeTool::Pen, 1.0, &[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)]);
    draw(&mut s, &[pen], None, 1.0, &style());
    assert!(s.alpha_at(15, 10) > 0);
    assert!(s.alpha_at(20, 15) > 0);
    assert_eq!(s.alpha_at(60, 60), 0);
}

#[test]
fn pen_single_point_paints_dot() {
    let mut s = surface(100, 100);
    let dot = stroke(StrokeTool::Pen, 1.0, &[(50.0, 50.0)]);
    draw(&mut s, &[dot], None, 1.0, &style());
    assert!(s.alpha_at(50, 50) > 0);
    assert!(!s.is_blank());
}

#[test]
fn pen_uses_configured_color() {
    let mut s = surface(50, 50);
    let red = StrokeStyle { pen_color: [255, 0, 0, 255], ..style() };
    let pen = stroke(StrokeTool::Pen, 1.0, &[(5.0, 20.0), (45.0, 20.0)]);
    draw(&mut s, &[pen], None, 1.0, &red);
    let px = s.pixmap().pixel(25, 20).map(|p| (p.red(), p.green(), p.blue()));
    assert_eq!(px, Some((255, 0, 0)));
}

#[test]
fn in_progress_stroke_is_drawn() {
    let mut s = surface(100, 100);
    let mut live = Stroke::begin(StrokeTool::Pen, Point::new(10.0, 80.0), 1.0);
    live.push(Point::new(90.0, 80.0));
    draw(&mut s, &[], Some(&live), 1.0, &style());
    assert!(s.alpha_at(50, 80) > 0);
}

// =============================================================
// Eraser
// =============================================================

#[test]
fn eraser_clears_earlier_pen_pixels() {
    let mut s = surface(100, 100);
    let pen = stroke(StrokeTool::Pen, 1.0, &[(10.0, 50.0), (90.0, 50.0)]);
    let eraser = stroke(StrokeTool::Eraser, 1.0, &[(20.0, 50.0)]);
    draw(&mut s, &[pen, eraser], None, 1.0, &style());
    assert_eq!(s.alpha_at(20, 50), 0);
    assert_eq!(s.alpha_at(20, 49), 0);
    assert!(s.alpha_at(80, 50) > 0);
}

#[test]
fn eraser_does_not_affect_later_strokes() {
    let mut s = surface(100, 100);
    let eraser = stroke(StrokeTool::Eraser, 1.0, &[(50.0, 50.0)]);
    let pen = stroke(StrokeTool::Pen, 1.0, &[(10.0, 50.0), (90.0, 50.0)]);
    draw(&mut s, &[eraser, pen], None, 1.0, &style());
    assert!(s.alpha_at(50, 50) > 0);
}

#[test]
fn in_progress_eraser_applies_immediately() {
    let mut s = surface(100, 100);
    let pen = stroke(StrokeTool::Pen, 1.0, &[(10.0, 50.0), (90.0, 50.0)]);
    let live = Stroke::begin(StrokeTool::Eraser, Point::new(70.0, 50.0), 1.0);
    draw(&mut s, &[pen], Some(&live), 1.0, &style());
    assert_eq!(s.alpha_at(70, 50), 0);
    assert!(s.alpha_at(20, 50) > 0);
}

#[test]
fn eraser_on_blank_surface_stays_blank() {
    let mut s = surface(50, 50);
    let eraser = stroke(StrokeTool::Eraser, 1.0, &[(10.0, 10.0), (20.0, 20.0)]);
    draw(&mut s, &[eraser], None, 1.0, &style());
    assert!(s.is_blank());
}

// =============================================================
// Replay
// =============================================================

#[test]
fn draw_starts_from_blank() {
    let mut s = surface(100, 100);
    let pen = stroke(StrokeTool::Pen, 1.0, &[(10.0, 10.0), (90.0, 10.0)]);
    draw(&mut s, &[pen], None, 1.0, &style());
    draw(&mut s, &[], None, 1.0, &style());
    assert!(s.is_blank());
}

#[test]
fn strokes_rescale_with_zoom() {
    let mut s = surface(200, 200);
    let pen = stroke(StrokeTool::Pen, 1.0, &[(10.0, 10.0), (20.0, 10.0)]);
    draw(&mut s, &[pen], None, 2.0, &style());
    assert!(s.alpha_at(30, 20) > 0);
    assert_eq!(s.alpha_at(15, 10), 0);
}

#[test]
fn stroke_recorded_zoomed_in_replays_at_identity() {
    let mut s = surface(200, 200);
    let pen = stroke(StrokeTool::Pen, 2.0, &[(40.0, 100.0), (160.0, 100.0)]);
    draw(&mut s, &[pen], None, 1.0, &style());
    assert!(s.alpha_at(50, 50) > 0);
    assert_eq!(s.alpha_at(100, 100), 0);
}

#[test]
fn eraser_radius_rescales_with_zoom() {
    let mut s = surface(200, 200);
    let pen = stroke(StrokeTool::Pen, 1.0, &[(0.0, 50.0), (100.0, 50.0)]);
    let eraser = stroke(StrokeTool::Eraser, 1.0, &[(50.0, 50.0)]);
    draw(&mut s, &[pen, eraser], None, 2.0, &style());
    // Radius 10 at scale 1 becomes 20 at scale 2, centered on (100, 100).
    assert_eq!(s.alpha_at(85, 100), 0);
    assert!(s.alpha_at(60, 100) > 0);
}

// =============================================================
// Compose
// =============================================================

#[test]
fn compose_matches_full_draw() {
    let pen = stroke(StrokeTool::Pen, 1.0, &[(10.0, 50.0), (90.0, 50.0)]);
    let mut live = Stroke::begin(StrokeTool::Pen, Point::new(50.0, 10.0), 1.0);
    live.push(Point::new(50.0, 90.0));

    let mut full = surface(100, 100);
    draw(&mut full, std::slice::from_ref(&pen), Some(&live), 1.0, &style());

    let mut layer = surface(100, 100);
    draw(&mut layer, &[pen], None, 1.0, &style());
    let mut composed = surface(100, 100);
    compose(&mut composed, &layer, Some(&live), 1.0, &style());

    assert_eq!(composed.pixmap().data(), full.pixmap().data());
}

#[test]
fn compose_eraser_leaves_layer_untouched() {
    let mut layer = surface(100, 100);
    draw(&mut layer, &[stroke(StrokeTool::Pen, 1.0, &[(10.0, 50.0), (90.0, 50.0)])], None, 1.0, &style());
    let live = Stroke::begin(StrokeTool::Eraser, Point::new(50.0, 50.0), 1.0);

    let mut s = surface(100, 100);
    compose(&mut s, &layer, Some(&live), 1.0, &style());
    assert_eq!(s.alpha_at(50, 50), 0);
    assert!(layer.alpha_at(50, 50) > 0);
}

#[test]
fn compose_adopts_layer_size() {
    let layer = surface(30, 40);
    let mut s = surface(10, 10);
    compose(&mut s, &layer, None, 1.0, &style());
    assert_eq!(s.size(), (30, 40));
    assert!(s.is_blank());
}
