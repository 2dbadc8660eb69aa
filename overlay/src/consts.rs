//! Shared numeric constants for the overlay crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed view scale.
pub const MIN_SCALE: f64 = 0.5;

/// Scale added or removed by one zoom in / zoom out step.
pub const ZOOM_STEP: f64 = 0.1;

/// Scale the viewer starts at.
pub const INITIAL_SCALE: f64 = 1.0;

// ── Page geometry ───────────────────────────────────────────────

/// Nominal page width in surface pixels at scale 1.0.
pub const BASE_PAGE_WIDTH: f64 = 1000.0;

/// Nominal page height in surface pixels at scale 1.0.
pub const BASE_PAGE_HEIGHT: f64 = 1500.0;

// ── Tools ───────────────────────────────────────────────────────

/// Eraser disc radius in surface pixels.
pub const ERASER_RADIUS_PX: f64 = 10.0;

/// Pen line width in surface pixels.
pub const PEN_WIDTH_PX: f64 = 2.0;

/// Pen color as straight RGBA.
pub const PEN_COLOR: [u8; 4] = [0, 0, 0, 255];
