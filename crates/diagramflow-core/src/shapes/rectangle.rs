//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, ShapeUpdate};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    #[serde(flatten)]
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle. The id is assigned when it is added to a canvas.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: ShapeId::nil(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let rect = Rect::from_points(p1, p2);
        Self::new(rect.origin(), rect.width(), rect.height())
    }

    pub fn as_kurbo(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}

impl ShapeTrait for Rectangle {
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
        self.as_kurbo().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn merge_geometry(&mut self, update: &ShapeUpdate) {
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
    }
}
