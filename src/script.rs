//! Gesture scripts: a JSON description of a document and the input events to
//! replay against it.
//!
//! ```json
//! {
//!   "pages": 4,
//!   "document": "paper.pdf",
//!   "events": [
//!     { "op": "set_tool", "tool": "pen" },
//!     { "op": "pointer_down", "x": 10, "y": 10 },
//!     { "op": "pointer_move", "x": 20, "y": 10 },
//!     { "op": "pointer_up" },
//!     { "op": "go_to_page", "page": 3 }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::path::PathBuf;

use overlay::input::{Button, Tool};
use serde::Deserialize;

/// A document stand-in plus the events to replay on it.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Page count reported by the document collaborator.
    pub pages: u32,
    /// Optional file the pages nominally come from; only its type is checked.
    #[serde(default)]
    pub document: Option<PathBuf>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Script {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or unknown events.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One host input event or toolbar action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Event {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: ButtonName,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    PointerLeave,
    SetTool {
        tool: ToolName,
    },
    ZoomIn,
    ZoomOut,
    ClearPage,
    GoToPage {
        page: i64,
    },
    NextPage,
    PrevPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    Pointer,
    Pen,
    Eraser,
}

impl From<ToolName> for Tool {
    fn from(name: ToolName) -> Self {
        match name {
            ToolName::Pointer => Tool::Pointer,
            ToolName::Pen => Tool::Pen,
            ToolName::Eraser => Tool::Eraser,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonName {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<ButtonName> for Button {
    fn from(name: ButtonName) -> Self {
        match name {
            ButtonName::Primary => Button::Primary,
            ButtonName::Middle => Button::Middle,
            ButtonName::Secondary => Button::Secondary,
        }
    }
}
