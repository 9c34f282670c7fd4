//! Partial shape updates.

use super::StrokeStyle;
use kurbo::Point;

/// A partial set of shape fields to merge into an existing shape.
///
/// Every field is optional. Fields that the target shape does not have are
/// skipped, so an update can never change a shape's kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub color: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_style: Option<StrokeStyle>,
    /// Rectangle width.
    pub width: Option<f64>,
    /// Rectangle height.
    pub height: Option<f64>,
    /// Square side length.
    pub size: Option<f64>,
    /// Circle radius.
    pub radius: Option<f64>,
    /// Freehand path, or triangle vertices when exactly three.
    pub points: Option<Vec<Point>>,
    /// Line end point.
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
    /// Freehand completion flag.
    pub is_complete: Option<bool>,
}

impl ShapeUpdate {
    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A single shape field together with its new value.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeProperty {
    X(f64),
    Y(f64),
    Color(String),
    StrokeWidth(f64),
    StrokeStyle(StrokeStyle),
    Width(f64),
    Height(f64),
    Size(f64),
    Radius(f64),
    Points(Vec<Point>),
    EndX(f64),
    EndY(f64),
    IsComplete(bool),
}

impl From<ShapeProperty> for ShapeUpdate {
    fn from(property: ShapeProperty) -> Self {
        let mut update = ShapeUpdate::default();
        match property {
            ShapeProperty::X(v) => update.x = Some(v),
            ShapeProperty::Y(v) => update.y = Some(v),
            ShapeProperty::Color(v) => update.color = Some(v),
            ShapeProperty::StrokeWidth(v) => update.stroke_width = Some(v),
            ShapeProperty::StrokeStyle(v) => update.stroke_style = Some(v),
            ShapeProperty::Width(v) => update.width = Some(v),
            ShapeProperty::Height(v) => update.height = Some(v),
            ShapeProperty::Size(v) => update.size = Some(v),
            ShapeProperty::Radius(v) => update.radius = Some(v),
            ShapeProperty::Points(v) => update.points = Some(v),
            ShapeProperty::EndX(v) => update.end_x = Some(v),
            ShapeProperty::EndY(v) => update.end_y = Some(v),
            ShapeProperty::IsComplete(v) => update.is_complete = Some(v),
        }
        update
    }
}
