//! Canvas state and snapshots.

use crate::history::History;
use crate::shapes::{DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, Shape, ShapeId, ShapeStyle, StrokeStyle};
use crate::tools::ToolKind;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Default zoom level.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Everything needed to restore the drawing at one point in time.
///
/// This is the live state without its history. It is both the undo/redo
/// entry and the durable blob written to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSnapshot {
    pub shapes: Vec<Shape>,
    pub selected_shape_ids: Vec<ShapeId>,
    pub active_tool: ToolKind,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub zoom_level: f64,
    pub pan_offset: Vec2,
    pub current_stroke_color: String,
    pub current_stroke_width: f64,
    pub current_stroke_style: StrokeStyle,
}

impl Default for CanvasSnapshot {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            selected_shape_ids: Vec::new(),
            active_tool: ToolKind::default(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            zoom_level: DEFAULT_ZOOM,
            pan_offset: Vec2::ZERO,
            current_stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            current_stroke_width: DEFAULT_STROKE_WIDTH,
            current_stroke_style: StrokeStyle::default(),
        }
    }
}

impl CanvasSnapshot {
    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The full application state.
///
/// States are values: every dispatched action produces a new one and the
/// previous state is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasState {
    /// Shapes in z-order (back to front).
    pub shapes: Vec<Shape>,
    /// Currently selected shape IDs.
    pub selected_shape_ids: Vec<ShapeId>,
    pub active_tool: ToolKind,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub zoom_level: f64,
    pub pan_offset: Vec2,
    /// Style applied to the next new shape.
    pub current_stroke_color: String,
    pub current_stroke_width: f64,
    pub current_stroke_style: StrokeStyle,
    /// Undo/redo history.
    pub history: History,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::from_parts(CanvasSnapshot::default(), History::new())
    }
}

impl CanvasState {
    /// Create the default state with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from a snapshot, with that snapshot as the only
    /// history entry.
    pub fn with_initial_history(snapshot: CanvasSnapshot) -> Self {
        let history = History::seeded(snapshot.clone());
        Self::from_parts(snapshot, history)
    }

    fn from_parts(snapshot: CanvasSnapshot, history: History) -> Self {
        let CanvasSnapshot {
            shapes,
            selected_shape_ids,
            active_tool,
            canvas_width,
            canvas_height,
            zoom_level,
            pan_offset,
            current_stroke_color,
            current_stroke_width,
            current_stroke_style,
        } = snapshot;
        Self {
            shapes,
            selected_shape_ids,
            active_tool,
            canvas_width,
            canvas_height,
            zoom_level,
            pan_offset,
            current_stroke_color,
            current_stroke_width,
            current_stroke_style,
            history,
        }
    }

    /// Take an independent copy of everything except the history.
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            shapes: self.shapes.clone(),
            selected_shape_ids: self.selected_shape_ids.clone(),
            active_tool: self.active_tool,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            zoom_level: self.zoom_level,
            pan_offset: self.pan_offset,
            current_stroke_color: self.current_stroke_color.clone(),
            current_stroke_width: self.current_stroke_width,
            current_stroke_style: self.current_stroke_style,
        }
    }

    /// Overwrite everything except the history with a snapshot.
    pub fn restore(&mut self, snapshot: &CanvasSnapshot) {
        let history = std::mem::take(&mut self.history);
        *self = Self::from_parts(snapshot.clone(), history);
    }

    /// Get a shape by ID.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Check if a shape is selected.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected_shape_ids.contains(&id)
    }

    /// The style a newly drawn shape will get.
    pub fn pending_style(&self) -> ShapeStyle {
        ShapeStyle::new(
            self.current_stroke_color.clone(),
            self.current_stroke_width,
            self.current_stroke_style,
        )
    }

    /// Check if the canvas has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
