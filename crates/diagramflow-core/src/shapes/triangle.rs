//! Triangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, ShapeUpdate};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// A triangle defined by three ordered vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    /// Anchor position (the first vertex when created).
    #[serde(flatten)]
    pub position: Point,
    /// Vertices in drawing order.
    pub points: [Point; 3],
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Triangle {
    pub fn new(points: [Point; 3]) -> Self {
        Self {
            id: ShapeId::nil(),
            position: points[0],
            points,
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeTrait for Triangle {
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
        path.move_to(self.points[0]);
        path.line_to(self.points[1]);
        path.line_to(self.points[2]);
        path.close_path();
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn merge_geometry(&mut self, update: &ShapeUpdate) {
        match update.points.as_deref() {
            Some(&[a, b, c]) => self.points = [a, b, c],
            Some(other) => {
                log::warn!(
                    "Ignoring triangle update with {} points (expected 3)",
                    other.len()
                );
            }
            None => {}
        }
    }
}
