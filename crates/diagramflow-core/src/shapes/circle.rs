//! Circle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, ShapeUpdate};
use kurbo::{BezPath, Point, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    #[serde(flatten)]
    pub position: Point,
    pub radius: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: ShapeId::nil(),
            position: center,
            radius,
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeTrait for Circle {
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
        kurbo::Circle::new(self.position, self.radius).to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn merge_geometry(&mut self, update: &ShapeUpdate) {
        if let Some(radius) = update.radius {
            self.radius = radius;
        }
    }
}
