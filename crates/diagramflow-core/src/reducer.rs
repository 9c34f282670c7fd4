//! The canvas reducer.
//!
//! `reduce` is the only place shapes get ids and the only place history is
//! written. It never touches its input; callers swap in the returned state.

use crate::action::{CanvasAction, StyleUpdate};
use crate::shapes::{ShapeId, ShapeUpdate};
use crate::state::CanvasState;

/// Compute the state that follows `state` after `action`.
pub fn reduce(state: &CanvasState, action: CanvasAction) -> CanvasState {
    log::debug!("Reducing {}", action.name());

    let mut next = state.clone();
    match action {
        CanvasAction::AddShape(mut shape) => {
            shape.regenerate_id();
            next.selected_shape_ids = vec![shape.id()];
            next.shapes.push(shape);
            record_history(&mut next);
        }
        CanvasAction::UpdateShape { id, updates } => {
            merge_into_shape(&mut next, id, &updates);
            record_history(&mut next);
        }
        CanvasAction::UpdateShapeProperty { id, property } => {
            merge_into_shape(&mut next, id, &ShapeUpdate::from(property));
            record_history(&mut next);
        }
        CanvasAction::DeleteShapes(ids) => {
            next.shapes.retain(|s| !ids.contains(&s.id()));
            next.selected_shape_ids.retain(|id| !ids.contains(id));
            record_history(&mut next);
        }
        CanvasAction::SetActiveTool(tool) => {
            next.active_tool = tool;
            next.selected_shape_ids.clear();
        }
        CanvasAction::SetSelection(ids) => {
            next.selected_shape_ids = ids;
        }
        CanvasAction::ClearSelection => {
            next.selected_shape_ids.clear();
        }
        CanvasAction::UpdateCurrentStyle(style) => {
            merge_pending_style(&mut next, style);
        }
        CanvasAction::Undo => match next.history.undo() {
            Some(snapshot) => next.restore(&snapshot),
            None => log::debug!("Nothing to undo"),
        },
        CanvasAction::Redo => match next.history.redo() {
            Some(snapshot) => next.restore(&snapshot),
            None => log::debug!("Nothing to redo"),
        },
        CanvasAction::SetZoom(zoom) => {
            next.zoom_level = zoom;
        }
        CanvasAction::SetPanOffset(offset) => {
            next.pan_offset = offset;
        }
        CanvasAction::SetCanvasSize { width, height } => {
            next.canvas_width = width;
            next.canvas_height = height;
        }
        CanvasAction::ResetCanvas => {
            next = CanvasState::default();
        }
    }
    next
}

/// Snapshot `state` into its own history.
fn record_history(state: &mut CanvasState) {
    let snapshot = state.snapshot();
    if state.history.push(snapshot) {
        log::debug!("History full, dropped oldest entry");
    }
}

fn merge_into_shape(state: &mut CanvasState, id: ShapeId, updates: &ShapeUpdate) {
    match state.shapes.iter_mut().find(|s| s.id() == id) {
        Some(shape) => shape.apply_update(updates),
        None => log::debug!("Update for unknown shape {id}"),
    }
}

fn merge_pending_style(state: &mut CanvasState, style: StyleUpdate) {
    if let Some(color) = style.color {
        state.current_stroke_color = color;
    }
    if let Some(width) = style.stroke_width {
        state.current_stroke_width = width;
    }
    if let Some(stroke_style) = style.stroke_style {
        state.current_stroke_style = stroke_style;
    }
}
