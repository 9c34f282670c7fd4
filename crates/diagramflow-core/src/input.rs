//! Pointer input: stroke capture and client-to-canvas coordinates.

use crate::action::CanvasAction;
use crate::shapes::{Freehand, Shape};
use crate::state::CanvasState;
use kurbo::{Affine, BezPath, Point};

/// Pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// The pointer left the canvas. Treated like `Up`.
    Leave,
}

/// Collects pointer positions into a freehand stroke.
///
/// A stroke starts on pointer down, grows on every move while the pointer
/// is held and ends on up or leave. Strokes of two or more points become an
/// `AddShape` action; shorter ones are dropped.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    points: Vec<Point>,
    drawing: bool,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke at `point`, discarding any unfinished one.
    pub fn pointer_down(&mut self, point: Point) {
        self.points.clear();
        self.points.push(point);
        self.drawing = true;
    }

    /// Extend the stroke. Ignored when no stroke is in progress.
    pub fn pointer_move(&mut self, point: Point) {
        if self.drawing {
            self.points.push(point);
        }
    }

    /// Finish the stroke, producing the shape to add if it is long enough.
    pub fn pointer_up(&mut self, state: &CanvasState) -> Option<CanvasAction> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;

        let points = std::mem::take(&mut self.points);
        if points.len() < 2 {
            log::trace!("Dropping stroke with {} point(s)", points.len());
            return None;
        }

        let mut stroke = Freehand::from_points(points);
        stroke.is_complete = true;
        stroke.style = state.pending_style();
        Some(CanvasAction::AddShape(Shape::Freehand(stroke)))
    }

    /// Same as [`Self::pointer_up`].
    pub fn pointer_leave(&mut self, state: &CanvasState) -> Option<CanvasAction> {
        self.pointer_up(state)
    }

    /// Feed an event already converted to canvas coordinates.
    pub fn handle(&mut self, event: PointerEvent, state: &CanvasState) -> Option<CanvasAction> {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_down(position);
                None
            }
            PointerEvent::Move { position } => {
                self.pointer_move(position);
                None
            }
            PointerEvent::Up => self.pointer_up(state),
            PointerEvent::Leave => self.pointer_leave(state),
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points of the stroke in progress.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Outline of the stroke in progress, once it has two points.
    pub fn preview_path(&self) -> Option<BezPath> {
        if !self.drawing || self.points.len() < 2 {
            return None;
        }
        let mut path = BezPath::new();
        path.move_to(self.points[0]);
        for &point in &self.points[1..] {
            path.line_to(point);
        }
        Some(path)
    }
}

/// Where the canvas sits on the page.
///
/// Converts client coordinates into canvas coordinates and turns container
/// resizes into `SetCanvasSize` actions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Top-left corner of the canvas element in client coordinates.
    pub origin: Point,
}

impl Viewport {
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }

    /// Canvas-to-screen transform for the state's pan and zoom.
    pub fn transform(state: &CanvasState) -> Affine {
        Affine::translate(state.pan_offset) * Affine::scale(zoom(state))
    }

    /// Screen-to-canvas transform.
    pub fn inverse_transform(state: &CanvasState) -> Affine {
        Affine::scale(1.0 / zoom(state)) * Affine::translate(-state.pan_offset)
    }

    /// Convert a client position into canvas coordinates.
    pub fn to_canvas(&self, client: Point, state: &CanvasState) -> Point {
        let local = client - self.origin.to_vec2();
        Self::inverse_transform(state) * local
    }

    /// Convert a client-space event into canvas coordinates.
    pub fn translate_event(&self, event: PointerEvent, state: &CanvasState) -> PointerEvent {
        match event {
            PointerEvent::Down { position } => PointerEvent::Down {
                position: self.to_canvas(position, state),
            },
            PointerEvent::Move { position } => PointerEvent::Move {
                position: self.to_canvas(position, state),
            },
            other => other,
        }
    }

    /// Action for a container resized to `width` x `height` pixels.
    pub fn resize(&self, width: f64, height: f64) -> CanvasAction {
        CanvasAction::SetCanvasSize {
            width: width.round().max(1.0) as u32,
            height: height.round().max(1.0) as u32,
        }
    }
}

fn zoom(state: &CanvasState) -> f64 {
    if state.zoom_level > 0.0 { state.zoom_level } else { 1.0 }
}
