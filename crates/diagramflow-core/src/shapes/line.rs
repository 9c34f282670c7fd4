//! Straight line shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, ShapeUpdate};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// A straight segment from its anchor to an end point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    #[serde(flatten)]
    pub position: Point,
    pub end_x: f64,
    pub end_y: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: ShapeId::nil(),
            position: start,
            end_x: end.x,
            end_y: end.y,
            style: ShapeStyle::default(),
        }
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn position_mut(&mut self) -> &mut Point {
        &mut self.position
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.position);
        path.line_to(self.end());
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn merge_geometry(&mut self, update: &ShapeUpdate) {
        if let Some(x) = update.end_x {
            self.end_x = x;
        }
        if let Some(y) = update.end_y {
            self.end_y = y;
        }
    }
}
