//! Canvas document data model.
//!
//! A canvas holds a flat list of `CanvasItem`s. Each item is a shared
//! `ItemBase` (identity, position, paint order, opacity) plus one `Shape`
//! variant carrying the kind-specific fields. Paint order comes from
//! `z_index`, never from list position.

use crate::config::CanvasConfig;
use crate::error::{Result, StagekitError};
use crate::id::ItemId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use std::fmt;
use std::str::FromStr;

// ─── Kinds ───────────────────────────────────────────────────────────────

/// The five item kinds a canvas can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Text,
    Image,
    Line,
    Rect,
    Circle,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Text,
        ItemKind::Image,
        ItemKind::Line,
        ItemKind::Rect,
        ItemKind::Circle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Image => "image",
            ItemKind::Line => "line",
            ItemKind::Rect => "rect",
            ItemKind::Circle => "circle",
        }
    }

    /// Vector shapes (as opposed to text and raster images).
    pub fn is_shape(self) -> bool {
        matches!(self, ItemKind::Line | ItemKind::Rect | ItemKind::Circle)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ItemKind::Text => 0,
            ItemKind::Image => 1,
            ItemKind::Line => 2,
            ItemKind::Rect => 3,
            ItemKind::Circle => 4,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = StagekitError;

    fn from_str(s: &str) -> Result<Self> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| StagekitError::UnknownItemKind(s.to_string()))
    }
}

// ─── Text options ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextWrap {
    #[default]
    Word,
    Char,
    None,
}

// ─── Stroke options ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

// ─── Shape variants ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    /// CSS-like font style, e.g. `normal`, `bold`, `italic bold`.
    pub font_style: String,
    pub fill: String,
    pub align: TextAlign,
    /// Wrap width.
    pub width: f64,
    pub wrap: TextWrap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    /// Opaque handle to the decoded pixels (object URL, asset key, ...).
    /// `None` while the image is still loading.
    pub source: Option<String>,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineProps {
    /// Flat `[x0, y0, x1, y1, ...]` list relative to the item position.
    pub points: SmallVec<[f64; 4]>,
    pub stroke: String,
    pub stroke_width: f64,
    pub hit_stroke_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectProps {
    pub width: f64,
    pub height: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub corner_radius: f64,
    pub fill_enabled: bool,
    pub stroke_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleProps {
    pub radius: f64,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: f64,
    pub fill_enabled: bool,
    pub stroke_enabled: bool,
}

/// Kind-specific item data. Serialized with a `type` tag next to the
/// base fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Text(TextProps),
    Image(ImageProps),
    Line(LineProps),
    Rect(RectProps),
    Circle(CircleProps),
}

impl Shape {
    pub fn kind(&self) -> ItemKind {
        match self {
            Shape::Text(_) => ItemKind::Text,
            Shape::Image(_) => ItemKind::Image,
            Shape::Line(_) => ItemKind::Line,
            Shape::Rect(_) => ItemKind::Rect,
            Shape::Circle(_) => ItemKind::Circle,
        }
    }

    /// Fully populated defaults for a freshly created item of `kind`.
    pub fn default_for(kind: ItemKind, config: &CanvasConfig) -> Self {
        let colors = &config.colors;
        match kind {
            ItemKind::Text => Shape::Text(TextProps {
                text: "New Text".into(),
                font_size: config.text.default_font_size,
                font_family: "Arial".into(),
                font_style: "normal".into(),
                fill: colors.text.clone(),
                align: TextAlign::Left,
                width: config.text.default_width,
                wrap: TextWrap::Word,
            }),
            ItemKind::Image => Shape::Image(ImageProps {
                source: None,
                width: 0.0,
                height: 0.0,
            }),
            ItemKind::Line => {
                let half = config.shape.default_line_length / 2.0;
                Shape::Line(LineProps {
                    points: smallvec![-half, 0.0, half, 0.0],
                    stroke: colors.line.clone(),
                    stroke_width: 3.0,
                    hit_stroke_width: config.shape.line_hit_stroke_width,
                    line_cap: LineCap::Round,
                    line_join: LineJoin::Round,
                })
            }
            ItemKind::Rect => Shape::Rect(RectProps {
                width: 150.0,
                height: 100.0,
                fill: Some(colors.rect_fill.clone()),
                stroke: Some(colors.rect_stroke.clone()),
                stroke_width: config.shape.default_stroke_width,
                corner_radius: 0.0,
                fill_enabled: false,
                stroke_enabled: true,
            }),
            ItemKind::Circle => Shape::Circle(CircleProps {
                radius: 60.0,
                fill: Some(colors.circle_fill.clone()),
                stroke: Some(colors.circle_stroke.clone()),
                stroke_width: config.shape.default_stroke_width,
                fill_enabled: false,
                stroke_enabled: true,
            }),
        }
    }

    /// Where an item of this shape lands when no position is given: around
    /// the canvas center. Circles and lines are anchored at their own
    /// center; rects are offset by half their size; text starts 100px left
    /// of center so the default wrap width reads as centered.
    pub fn default_position(&self, stage: StageConfig) -> Point {
        let c = stage.center();
        match self {
            Shape::Text(_) => Point::new(c.x - 100.0, c.y),
            Shape::Rect(r) => Point::new(c.x - r.width / 2.0, c.y - r.height / 2.0),
            Shape::Image(_) | Shape::Line(_) | Shape::Circle(_) => c,
        }
    }
}

// ─── Items ───────────────────────────────────────────────────────────────

/// Fields shared by every item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBase {
    pub id: ItemId,
    /// Display / node-selector name; always equal to `id`.
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    pub draggable: bool,
    pub z_index: i64,
    pub opacity: f64,
}

/// A single item on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(flatten)]
    pub shape: Shape,
}

impl CanvasItem {
    pub fn id(&self) -> ItemId {
        self.base.id
    }

    pub fn kind(&self) -> ItemKind {
        self.shape.kind()
    }

    pub fn z_index(&self) -> i64 {
        self.base.z_index
    }

    pub fn position(&self) -> Point {
        Point::new(self.base.x, self.base.y)
    }

    pub fn set_position(&mut self, p: Point) {
        self.base.x = p.x;
        self.base.y = p.y;
    }

    /// Apply the present fields of `patch`. Fields that don't exist on this
    /// item's kind are skipped. Non-finite numbers are rejected so a bad
    /// geometry result can never be committed.
    pub fn apply_patch(&mut self, patch: &ItemPatch) {
        fn finite(v: Option<f64>) -> Option<f64> {
            v.filter(|n| n.is_finite())
        }

        if let Some(x) = finite(patch.x) {
            self.base.x = x;
        }
        if let Some(y) = finite(patch.y) {
            self.base.y = y;
        }
        if let Some(r) = finite(patch.rotation) {
            self.base.rotation = r;
        }
        if let Some(o) = finite(patch.opacity) {
            self.base.opacity = o.clamp(0.0, 1.0);
        }
        if let Some(d) = patch.draggable {
            self.base.draggable = d;
        }

        let width = finite(patch.width);
        let height = finite(patch.height);
        match &mut self.shape {
            Shape::Text(t) => {
                if let Some(w) = width {
                    t.width = w;
                }
                if let Some(size) = finite(patch.font_size) {
                    t.font_size = size;
                }
                if let Some(text) = &patch.text {
                    t.text.clone_from(text);
                }
            }
            Shape::Image(i) => {
                if let Some(w) = width {
                    i.width = w;
                }
                if let Some(h) = height {
                    i.height = h;
                }
            }
            Shape::Rect(r) => {
                if let Some(w) = width {
                    r.width = w;
                }
                if let Some(h) = height {
                    r.height = h;
                }
            }
            Shape::Circle(c) => {
                if let Some(radius) = finite(patch.radius) {
                    c.radius = radius;
                }
            }
            Shape::Line(l) => {
                if let Some(points) = &patch.points
                    && points.iter().all(|p| p.is_finite())
                {
                    l.points.clone_from(points);
                }
            }
        }
    }
}

/// Sparse update for an item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draggable: Option<bool>,
    /// Text wrap width, image width, or rect width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Image height or rect height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<SmallVec<[f64; 4]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl ItemPatch {
    pub fn position(p: Point) -> Self {
        Self {
            x: Some(p.x),
            y: Some(p.y),
            ..Default::default()
        }
    }

    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }
}

/// Everything needed to create an item except its identity, which the
/// document assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub shape: Shape,
    /// `None` centers the item on the canvas.
    pub position: Option<Point>,
    pub rotation: f64,
    pub draggable: bool,
    pub opacity: f64,
}

impl ItemSpec {
    /// Default item of `kind`, centered on the canvas.
    pub fn new(kind: ItemKind, config: &CanvasConfig) -> Self {
        Self::from_shape(Shape::default_for(kind, config))
    }

    pub fn from_shape(shape: Shape) -> Self {
        Self {
            shape,
            position: None,
            rotation: 0.0,
            draggable: true,
            opacity: 1.0,
        }
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

// ─── Stage ───────────────────────────────────────────────────────────────

/// Canvas pixel size. Every constraint is evaluated against the value
/// current at call time; callers pass it in fresh for each operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
        }
    }
}

impl StageConfig {
    /// # Errors
    /// Returns `InvalidStageSize` unless both sides are finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(StagekitError::InvalidStageSize { width, height })
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect_item() -> CanvasItem {
        CanvasItem {
            base: ItemBase {
                id: ItemId::intern("rect-1"),
                name: "rect-1".into(),
                x: 10.0,
                y: 20.0,
                rotation: 0.0,
                draggable: true,
                z_index: 2,
                opacity: 1.0,
            },
            shape: Shape::default_for(ItemKind::Rect, &CanvasConfig::default()),
        }
    }

    #[test]
    fn kind_from_str() {
        assert_eq!("circle".parse::<ItemKind>(), Ok(ItemKind::Circle));
        assert_eq!(
            "hexagon".parse::<ItemKind>(),
            Err(StagekitError::UnknownItemKind("hexagon".into()))
        );
    }

    #[test]
    fn kind_shape_predicate() {
        assert!(ItemKind::Line.is_shape());
        assert!(ItemKind::Rect.is_shape());
        assert!(ItemKind::Circle.is_shape());
        assert!(!ItemKind::Text.is_shape());
        assert!(!ItemKind::Image.is_shape());
    }

    #[test]
    fn item_serializes_tagged_flat() {
        let json = serde_json::to_value(rect_item()).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["id"], "rect-1");
        assert_eq!(json["zIndex"], 2);
        assert_eq!(json["strokeEnabled"], true);
        let back: CanvasItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, rect_item());
    }

    #[test]
    fn patch_skips_fields_of_other_kinds() {
        let mut item = rect_item();
        item.apply_patch(&ItemPatch {
            width: Some(40.0),
            radius: Some(99.0),
            text: Some("ignored".into()),
            ..Default::default()
        });
        let Shape::Rect(r) = &item.shape else {
            panic!("expected rect");
        };
        assert_eq!(r.width, 40.0);
        assert_eq!(r.height, 100.0);
    }

    #[test]
    fn patch_rejects_non_finite() {
        let mut item = rect_item();
        item.apply_patch(&ItemPatch {
            x: Some(f64::NAN),
            y: Some(f64::INFINITY),
            width: Some(f64::NAN),
            ..Default::default()
        });
        assert_eq!(item.position(), Point::new(10.0, 20.0));
        let Shape::Rect(r) = &item.shape else {
            panic!("expected rect");
        };
        assert_eq!(r.width, 150.0);
    }

    #[test]
    fn default_positions_center_on_stage() {
        let config = CanvasConfig::default();
        let stage = StageConfig::default();
        let rect = Shape::default_for(ItemKind::Rect, &config);
        assert_eq!(rect.default_position(stage), Point::new(325.0, 350.0));
        let circle = Shape::default_for(ItemKind::Circle, &config);
        assert_eq!(circle.default_position(stage), Point::new(400.0, 400.0));
        let text = Shape::default_for(ItemKind::Text, &config);
        assert_eq!(text.default_position(stage), Point::new(300.0, 400.0));
    }

    #[test]
    fn stage_validation() {
        assert!(StageConfig::new(1920.0, 1080.0).is_ok());
        assert!(StageConfig::new(0.0, 100.0).is_err());
        assert!(StageConfig::new(100.0, f64::NAN).is_err());
    }
}
