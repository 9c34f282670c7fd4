//! Tool system for the whiteboard.

use crate::action::CanvasAction;
use crate::state::CanvasState;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Square,
    Circle,
    Triangle,
    Line,
    Freehand,
    Erase,
}

impl ToolKind {
    /// Human-readable tool name.
    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Square => "Square",
            ToolKind::Circle => "Circle",
            ToolKind::Triangle => "Triangle",
            ToolKind::Line => "Line",
            ToolKind::Freehand => "Pencil",
            ToolKind::Erase => "Eraser",
        }
    }

    /// Whether this tool creates new shapes.
    pub fn is_drawing_tool(&self) -> bool {
        !matches!(self, ToolKind::Select | ToolKind::Erase)
    }
}

/// One entry of the tool panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolButton {
    pub tool: ToolKind,
    pub label: &'static str,
}

impl ToolButton {
    fn new(tool: ToolKind) -> Self {
        Self {
            tool,
            label: tool.label(),
        }
    }
}

/// The tool selection panel.
///
/// Holds the buttons in display order. It reads `active_tool` to decide
/// which button is highlighted and turns clicks into `SetActiveTool` actions.
#[derive(Debug, Clone)]
pub struct ToolPanel {
    buttons: Vec<ToolButton>,
}

impl Default for ToolPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolPanel {
    /// Create the standard panel layout.
    pub fn new() -> Self {
        Self::with_tools(&[
            ToolKind::Select,
            ToolKind::Circle,
            ToolKind::Rectangle,
            ToolKind::Triangle,
            ToolKind::Freehand,
            ToolKind::Line,
            ToolKind::Erase,
        ])
    }

    /// Create a panel with a custom set of tools.
    pub fn with_tools(tools: &[ToolKind]) -> Self {
        Self {
            buttons: tools.iter().copied().map(ToolButton::new).collect(),
        }
    }

    /// Buttons in display order.
    pub fn buttons(&self) -> &[ToolButton] {
        &self.buttons
    }

    /// Whether the button for `tool` should be drawn highlighted.
    pub fn is_highlighted(&self, tool: ToolKind, state: &CanvasState) -> bool {
        state.active_tool == tool
    }

    /// The highlighted button, if the active tool is on this panel.
    pub fn highlighted(&self, state: &CanvasState) -> Option<&ToolButton> {
        self.buttons.iter().find(|b| self.is_highlighted(b.tool, state))
    }

    /// Handle a click on a tool button.
    pub fn click(&self, tool: ToolKind) -> CanvasAction {
        log::debug!("Tool selected: {:?}", tool);
        CanvasAction::SetActiveTool(tool)
    }
}
