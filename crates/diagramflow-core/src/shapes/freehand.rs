//! Freehand drawing shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, ShapeUpdate};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// A freehand stroke (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Anchor position (the first point of the stroke).
    #[serde(flatten)]
    pub position: Point,
    /// Points in the freehand path.
    pub points: Vec<Point>,
    /// Whether the stroke is finished or still being drawn.
    pub is_complete: bool,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Freehand {
    /// Create a new empty, unfinished stroke.
    pub fn new() -> Self {
        Self::from_points(Vec::new())
    }

    /// Create an unfinished stroke from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: ShapeId::nil(),
            position: points.first().copied().unwrap_or(Point::ZERO),
            points,
            is_complete: false,
            style: ShapeStyle::default(),
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        if self.points.is_empty() {
            self.position = point;
        }
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for Freehand {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeTrait for Freehand {
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

        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };

        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }

        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn merge_geometry(&mut self, update: &ShapeUpdate) {
        if let Some(points) = &update.points {
            self.points = points.clone();
        }
        if let Some(complete) = update.is_complete {
            self.is_complete = complete;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_point_is_anchor() {
        let mut stroke = Freehand::new();
        assert!(stroke.is_empty());

        stroke.add_point(Point::new(4.0, 5.0));
        stroke.add_point(Point::new(6.0, 7.0));
        assert_eq!(stroke.position, Point::new(4.0, 5.0));
        assert_eq!(stroke.len(), 2);
        assert!(!stroke.is_complete);
    }

    #[test]
    fn test_path_follows_points() {
        let stroke = Freehand::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        let path = stroke.to_path();
        assert_eq!(path.elements().len(), 3);
        assert!(Freehand::new().to_path().elements().is_empty());
    }
}
