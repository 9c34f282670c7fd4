//! Square shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, ShapeUpdate};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A square anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    #[serde(flatten)]
    pub position: Point,
    /// Side length.
    pub size: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Square {
    pub fn new(position: Point, size: f64) -> Self {
        Self {
            id: ShapeId::nil(),
            position,
            size,
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeTrait for Square {
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
        Rect::from_origin_size(self.position, (self.size, self.size)).to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn merge_geometry(&mut self, update: &ShapeUpdate) {
        if let Some(size) = update.size {
            self.size = size;
        }
    }
}
