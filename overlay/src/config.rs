//! Overlay tunables.
//!
//! `OverlayConfig` collects every number the engine would otherwise hard-code:
//! zoom limits and step, tool sizes, pen color, and the nominal page size the
//! surface is derived from. Hosts usually deserialize it from JSON; any field
//! left out takes its default from [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BASE_PAGE_HEIGHT, BASE_PAGE_WIDTH, ERASER_RADIUS_PX, MIN_SCALE, PEN_COLOR, PEN_WIDTH_PX, ZOOM_STEP,
};

/// Engine tunables. Missing JSON fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Smallest allowed view scale. Must be positive.
    pub min_scale: f64,
    /// Largest allowed view scale. `None` leaves zoom-in unbounded.
    pub max_scale: Option<f64>,
    /// Scale change per zoom in / zoom out.
    pub zoom_step: f64,
    /// Eraser disc radius in surface pixels at the stroke's recording scale.
    pub eraser_radius: f64,
    /// Pen line width in surface pixels at the stroke's recording scale.
    pub pen_width: f64,
    /// Pen color as straight RGBA.
    pub pen_color: [u8; 4],
    /// Nominal page width at scale 1.0.
    pub base_width: f64,
    /// Nominal page height at scale 1.0.
    pub base_height: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: None,
            zoom_step: ZOOM_STEP,
            eraser_radius: ERASER_RADIUS_PX,
            pen_width: PEN_WIDTH_PX,
            pen_color: PEN_COLOR,
            base_width: BASE_PAGE_WIDTH,
            base_height: BASE_PAGE_HEIGHT,
        }
    }
}

impl OverlayConfig {
    /// Parse a config from JSON and sanitize it.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if `json` is malformed or a
    /// field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replace any unusable value (non-finite, non-positive, or a max below the
    /// min) with its default.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !is_positive(self.min_scale) {
            tracing::warn!(min_scale = self.min_scale, "invalid min_scale; using default");
            self.min_scale = defaults.min_scale;
        }
        if let Some(max) = self.max_scale {
            if !is_positive(max) || max < self.min_scale {
                tracing::warn!(max_scale = max, "invalid max_scale; zoom-in left unbounded");
                self.max_scale = None;
            }
        }
        if !is_positive(self.zoom_step) {
            tracing::warn!(zoom_step = self.zoom_step, "invalid zoom_step; using default");
            self.zoom_step = defaults.zoom_step;
        }
        if !is_positive(self.eraser_radius) {
            tracing::warn!(eraser_radius = self.eraser_radius, "invalid eraser_radius; using default");
            self.eraser_radius = defaults.eraser_radius;
        }
        if !is_positive(self.pen_width) {
            tracing::warn!(pen_width = self.pen_width, "invalid pen_width; using default");
            self.pen_width = defaults.pen_width;
        }
        if !is_positive(self.base_width) || !is_positive(self.base_height) {
            tracing::warn!(
                base_width = self.base_width,
                base_height = self.base_height,
                "invalid base page size; using default"
            );
            self.base_width = defaults.base_width;
            self.base_height = defaults.base_height;
        }
        self
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
