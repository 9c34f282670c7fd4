//! Rendering interface.
//!
//! The core does not rasterize anything. A platform shell implements
//! [`RenderSurface`] and calls [`paint`] whenever the state or the stroke in
//! progress changes.

use crate::input::{StrokeCapture, Viewport};
use crate::shapes::ShapeStyle;
use crate::state::CanvasState;
use kurbo::{BezPath, Size, Stroke};

/// How to stroke one path.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeParams {
    /// CSS color string.
    pub color: String,
    /// Width, dashes and joins.
    pub stroke: Stroke,
}

impl StrokeParams {
    pub fn from_style(style: &ShapeStyle) -> Self {
        let mut stroke = Stroke::new(style.stroke_width);
        if let Some(dashes) = style.stroke_style.dash_pattern(style.stroke_width) {
            stroke = stroke.with_dashes(0.0, dashes);
        }
        Self {
            color: style.color.clone(),
            stroke,
        }
    }
}

/// A 2D target the canvas can be drawn onto.
pub trait RenderSurface {
    /// Clear the whole surface, sized to the canvas.
    fn clear(&mut self, size: Size);

    /// Stroke a path given in screen coordinates.
    fn stroke_path(&mut self, path: &BezPath, params: &StrokeParams);
}

/// Draw the whole canvas.
///
/// Shapes are stroked back to front with their own style, then the stroke
/// in progress (if any) with the pending style.
pub fn paint<S: RenderSurface + ?Sized>(surface: &mut S, state: &CanvasState, capture: &StrokeCapture) {
    surface.clear(Size::new(state.canvas_width as f64, state.canvas_height as f64));

    let transform = Viewport::transform(state);
    for shape in state.shapes.iter().filter(|s| s.is_drawable()) {
        let path = transform * shape.to_path();
        surface.stroke_path(&path, &StrokeParams::from_style(shape.style()));
    }

    if let Some(path) = capture.preview_path() {
        surface.stroke_path(&(transform * path), &StrokeParams::from_style(&state.pending_style()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CanvasAction, StyleUpdate};
    use crate::reducer::reduce;
    use crate::shapes::{Circle, Freehand, Rectangle, Shape, StrokeStyle};
    use kurbo::{Point, Shape as _};

    #[derive(Default)]
    struct RecordingSurface {
        cleared: Vec<Size>,
        strokes: Vec<(BezPath, StrokeParams)>,
    }

    impl RenderSurface for RecordingSurface {
        fn clear(&mut self, size: Size) {
            self.cleared.push(size);
        }

        fn stroke_path(&mut self, path: &BezPath, params: &StrokeParams) {
            self.strokes.push((path.clone(), params.clone()));
        }
    }

    fn add(state: &CanvasState, shape: impl Into<Shape>) -> CanvasState {
        reduce(state, CanvasAction::AddShape(shape.into()))
    }

    #[test]
    fn test_paint_order_and_styles() {
        let mut red = Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0);
        red.style.color = "#ff0000".to_string();
        let mut blue = Circle::new(Point::new(50.0, 50.0), 5.0);
        blue.style.color = "#0000ff".to_string();

        let state = add(&CanvasState::default(), red);
        let state = add(&state, blue);

        let mut surface = RecordingSurface::default();
        paint(&mut surface, &state, &StrokeCapture::new());

        assert_eq!(surface.cleared, vec![Size::new(800.0, 600.0)]);
        let colors: Vec<&str> = surface.strokes.iter().map(|(_, p)| p.color.as_str()).collect();
        assert_eq!(colors, vec!["#ff0000", "#0000ff"]);
    }

    #[test]
    fn test_degenerate_freehand_skipped() {
        let state = add(
            &CanvasState::default(),
            Freehand::from_points(vec![Point::new(1.0, 1.0)]),
        );
        let state = add(
            &state,
            Freehand::from_points(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]),
        );

        let mut surface = RecordingSurface::default();
        paint(&mut surface, &state, &StrokeCapture::new());
        assert_eq!(surface.strokes.len(), 1);
    }

    #[test]
    fn test_stroke_in_progress_uses_pending_style() {
        let state = reduce(
            &CanvasState::default(),
            CanvasAction::UpdateCurrentStyle(StyleUpdate::stroke_width(6.0)),
        );
        let mut capture = StrokeCapture::new();
        capture.pointer_down(Point::new(0.0, 0.0));

        let mut surface = RecordingSurface::default();
        paint(&mut surface, &state, &capture);
        assert!(surface.strokes.is_empty());

        capture.pointer_move(Point::new(10.0, 0.0));
        paint(&mut surface, &state, &capture);
        assert_eq!(surface.strokes.len(), 1);
        assert!((surface.strokes[0].1.stroke.width - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_paint_applies_view_transform() {
        let state = add(&CanvasState::default(), Rectangle::new(Point::ZERO, 10.0, 10.0));
        let state = reduce(&state, CanvasAction::SetZoom(2.0));

        let mut surface = RecordingSurface::default();
        paint(&mut surface, &state, &StrokeCapture::new());

        let bounds = surface.strokes[0].0.bounding_box();
        assert!((bounds.width() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_stroke_params_dashes() {
        let mut style = ShapeStyle::default();
        assert!(StrokeParams::from_style(&style).stroke.dash_pattern.is_empty());

        style.stroke_style = StrokeStyle::Dashed;
        let params = StrokeParams::from_style(&style);
        assert_eq!(&params.stroke.dash_pattern[..], &[8.0, 4.0]);
    }
}
