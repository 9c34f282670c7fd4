//! Actions accepted by the canvas reducer.

use crate::shapes::{Shape, ShapeId, ShapeProperty, ShapeUpdate, StrokeStyle};
use crate::tools::ToolKind;
use kurbo::Vec2;

/// A partial change to the pending stroke style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleUpdate {
    pub color: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_style: Option<StrokeStyle>,
}

impl StyleUpdate {
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Default::default()
        }
    }

    pub fn stroke_width(width: f64) -> Self {
        Self {
            stroke_width: Some(width),
            ..Default::default()
        }
    }

    pub fn stroke_style(style: StrokeStyle) -> Self {
        Self {
            stroke_style: Some(style),
            ..Default::default()
        }
    }
}

/// Every state transition the UI can request.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    /// Append a shape. Any id on the payload is replaced.
    AddShape(Shape),
    /// Merge a partial update into the shape with this id.
    UpdateShape { id: ShapeId, updates: ShapeUpdate },
    /// Set one field of the shape with this id.
    UpdateShapeProperty { id: ShapeId, property: ShapeProperty },
    /// Remove these shapes and drop them from the selection.
    DeleteShapes(Vec<ShapeId>),
    /// Switch tools; clears the selection.
    SetActiveTool(ToolKind),
    SetSelection(Vec<ShapeId>),
    ClearSelection,
    UpdateCurrentStyle(StyleUpdate),
    Undo,
    Redo,
    SetZoom(f64),
    SetPanOffset(Vec2),
    SetCanvasSize { width: u32, height: u32 },
    /// Return to the default state, dropping history.
    ResetCanvas,
}

impl CanvasAction {
    /// Whether the reducer records this action as a history entry.
    pub fn is_history_tracked(&self) -> bool {
        matches!(
            self,
            CanvasAction::AddShape(_)
                | CanvasAction::UpdateShape { .. }
                | CanvasAction::UpdateShapeProperty { .. }
                | CanvasAction::DeleteShapes(_)
        )
    }

    /// Action type name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            CanvasAction::AddShape(_) => "ADD_SHAPE",
            CanvasAction::UpdateShape { .. } => "UPDATE_SHAPE",
            CanvasAction::UpdateShapeProperty { .. } => "UPDATE_SHAPE_PROPERTY",
            CanvasAction::DeleteShapes(_) => "DELETE_SHAPES",
            CanvasAction::SetActiveTool(_) => "SET_ACTIVE_TOOL",
            CanvasAction::SetSelection(_) => "SET_SELECTION",
            CanvasAction::ClearSelection => "CLEAR_SELECTION",
            CanvasAction::UpdateCurrentStyle(_) => "UPDATE_CURRENT_STYLE",
            CanvasAction::Undo => "UNDO",
            CanvasAction::Redo => "REDO",
            CanvasAction::SetZoom(_) => "SET_ZOOM",
            CanvasAction::SetPanOffset(_) => "SET_PAN_OFFSET",
            CanvasAction::SetCanvasSize { .. } => "SET_CANVAS_SIZE",
            CanvasAction::ResetCanvas => "RESET_CANVAS",
        }
    }
}
