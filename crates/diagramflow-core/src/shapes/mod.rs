//! Shape definitions for the whiteboard.

mod circle;
mod freehand;
mod line;
mod rectangle;
mod square;
mod triangle;
mod update;

pub use circle::Circle;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;
pub use square::Square;
pub use triangle::Triangle;
pub use update::{ShapeProperty, ShapeUpdate};

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stroke style for shape outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

impl StrokeStyle {
    /// Dash array (on/off lengths) for a stroke of the given width.
    /// Returns `None` for solid strokes.
    pub fn dash_pattern(&self, stroke_width: f64) -> Option<Vec<f64>> {
        let w = stroke_width.max(1.0);
        match self {
            StrokeStyle::Solid => None,
            StrokeStyle::Dotted => Some(vec![w, w * 2.0]),
            StrokeStyle::Dashed => Some(vec![w * 4.0, w * 2.0]),
        }
    }
}

/// Default stroke color for new shapes.
pub const DEFAULT_STROKE_COLOR: &str = "#ffffff";

/// Default stroke width for new shapes.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Style properties shared by every shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Stroke width.
    pub stroke_width: f64,
    /// Outline pattern.
    pub stroke_style: StrokeStyle,
}

impl ShapeStyle {
    pub fn new(color: impl Into<String>, stroke_width: f64, stroke_style: StrokeStyle) -> Self {
        Self {
            color: color.into(),
            stroke_width,
            stroke_style,
        }
    }

    /// Merge the style fields present in an update.
    pub(crate) fn merge(&mut self, update: &ShapeUpdate) {
        if let Some(color) = &update.color {
            self.color = color.clone();
        }
        if let Some(width) = update.stroke_width {
            self.stroke_width = width;
        }
        if let Some(style) = update.stroke_style {
            self.stroke_style = style;
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, StrokeStyle::Solid)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Anchor position. What it anchors depends on the shape kind.
    fn position(&self) -> Point;

    /// Mutable anchor position.
    fn position_mut(&mut self) -> &mut Point;

    /// Get the outline path for rendering.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Merge the kind-specific fields of a partial update.
    fn merge_geometry(&mut self, update: &ShapeUpdate);
}

/// The drawable entities, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Square(Square),
    Circle(Circle),
    Triangle(Triangle),
    Line(Line),
    Freehand(Freehand),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Square(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Triangle(s) => s.id(),
            Shape::Line(s) => s.id(),
            Shape::Freehand(s) => s.id(),
        }
    }

    /// Discriminant name, as written in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Square(_) => "square",
            Shape::Circle(_) => "circle",
            Shape::Triangle(_) => "triangle",
            Shape::Line(_) => "line",
            Shape::Freehand(_) => "freehand",
        }
    }

    pub fn position(&self) -> Point {
        self.as_trait().position()
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    /// Whether the renderer should draw this shape at all.
    /// A freehand stroke needs at least one segment.
    pub fn is_drawable(&self) -> bool {
        match self {
            Shape::Freehand(f) => f.len() >= 2,
            _ => true,
        }
    }

    /// Shallow-merge a partial update into this shape.
    ///
    /// Fields that do not exist on this shape kind are ignored; the
    /// discriminant and id never change.
    pub fn apply_update(&mut self, update: &ShapeUpdate) {
        let shape = self.as_trait_mut();
        let position = shape.position_mut();
        if let Some(x) = update.x {
            position.x = x;
        }
        if let Some(y) = update.y {
            position.y = y;
        }
        shape.style_mut().merge(update);
        shape.merge_geometry(update);
    }

    /// Replace the shape's ID with a new unique identifier.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Square(s) => s.id = new_id,
            Shape::Circle(s) => s.id = new_id,
            Shape::Triangle(s) => s.id = new_id,
            Shape::Line(s) => s.id = new_id,
            Shape::Freehand(s) => s.id = new_id,
        }
    }

    /// Get the freehand stroke if this shape is one.
    pub fn as_freehand(&self) -> Option<&Freehand> {
        match self {
            Shape::Freehand(f) => Some(f),
            _ => None,
        }
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Square(s) => s,
            Shape::Circle(s) => s,
            Shape::Triangle(s) => s,
            Shape::Line(s) => s,
            Shape::Freehand(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Square(s) => s,
            Shape::Circle(s) => s,
            Shape::Triangle(s) => s,
            Shape::Line(s) => s,
            Shape::Freehand(s) => s,
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Self {
        Shape::Rectangle(s)
    }
}

impl From<Square> for Shape {
    fn from(s: Square) -> Self {
        Shape::Square(s)
    }
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Shape::Circle(s)
    }
}

impl From<Triangle> for Shape {
    fn from(s: Triangle) -> Self {
        Shape::Triangle(s)
    }
}

impl From<Line> for Shape {
    fn from(s: Line) -> Self {
        Shape::Line(s)
    }
}

impl From<Freehand> for Shape {
    fn from(s: Freehand) -> Self {
        Shape::Freehand(s)
    }
}
