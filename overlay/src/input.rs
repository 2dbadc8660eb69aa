//! Input model: tools, mouse buttons, and the gesture state machine.
//!
//! This module defines the types consumed by the input engine. `Tool`
//! captures the user's intent at the time of a pointer-down. `InputState` is
//! the active gesture being tracked between pointer-down and pointer-up (or
//! pointer-leave), carrying the context needed to compute incremental pan
//! deltas or to grow the in-progress stroke.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::session::{Stroke, StrokeTool};
use crate::transform::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Drag to pan the surface (default).
    #[default]
    Pointer,
    /// Draw freehand lines.
    Pen,
    /// Erase freehand.
    Eraser,
}

impl Tool {
    /// The stroke kind this tool records, or `None` for the pointer.
    #[must_use]
    pub fn stroke_tool(self) -> Option<StrokeTool> {
        match self {
            Self::Pointer => None,
            Self::Pen => Some(StrokeTool::Pen),
            Self::Eraser => Some(StrokeTool::Eraser),
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Persistent UI state visible to the host toolbar.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Tool applied to the next pointer-down.
    pub tool: Tool,
}

/// Internal state for the input state machine.
///
/// Exactly one gesture can be active. Each active variant carries what is
/// needed to handle the next pointer-move and to finish on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is dragging the surface with the pointer tool.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute the pan delta.
        last_screen: Point,
    },
    /// The user is drawing or erasing.
    Drawing {
        /// The in-progress stroke; committed to the current page on release.
        stroke: Stroke,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The in-progress stroke, if a draw gesture is active.
    #[must_use]
    pub fn active_stroke(&self) -> Option<&Stroke> {
        match self {
            Self::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }
}
