//! Capability interface onto the rendering layer's live nodes.
//!
//! The engines never see a concrete renderer. They read a node's rendered
//! client rect and logical transform through `CanvasNode`, write back
//! position / rotation / scale, and look nodes up through `Scene`.
//!
//! `SimNode` and `SimScene` are a headless implementation that derives the
//! client rect from the node's own transform the same way a 2D scene graph
//! does (local box → scale → rotate around the origin → AABB). They back
//! the tests and any host that wants to run the engines without a renderer.

use crate::document::Document;
use crate::geometry::{bounds_of, rotated_corner};
use crate::id::ItemId;
use crate::model::{CanvasItem, Shape};
use kurbo::{Point, Rect, Size, Vec2};
use std::collections::HashMap;

/// A live, mutable node in the scene graph.
pub trait CanvasNode {
    /// Rendered bounding box: post rotation, scale, and stroke.
    fn client_rect(&self) -> Rect;

    /// Logical `(x, y)` anchor.
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);

    /// Logical (pre-scale) size.
    fn size(&self) -> Size;

    /// Degrees, clockwise.
    fn rotation(&self) -> f64;
    fn set_rotation(&mut self, degrees: f64);

    fn scale(&self) -> Vec2;
    fn set_scale(&mut self, scale: Vec2);

    /// Vector from the rendered box's top-left to the logical anchor.
    /// Adding it to a desired box origin yields the position to store.
    fn anchor_offset(&self) -> Vec2 {
        self.position() - self.client_rect().origin()
    }
}

/// Node lookup by item id. Lookups for ids without a node return `None`.
pub trait Scene {
    fn node(&self, id: ItemId) -> Option<&dyn CanvasNode>;
    fn node_mut(&mut self, id: ItemId) -> Option<&mut dyn CanvasNode>;

    /// Rebind a node from its committed item, the way a reactive renderer
    /// re-reads its config after the model changes.
    fn refresh(&mut self, _item: &CanvasItem) {}

    /// Drop the node of a deleted item.
    fn remove_node(&mut self, _id: ItemId) {}
}

// ─── Headless implementation ─────────────────────────────────────────────

/// A detached node with a renderer-like transform model.
#[derive(Debug, Clone, PartialEq)]
pub struct SimNode {
    pub position: Point,
    /// Unscaled local box relative to `position`, before stroke padding.
    pub local: Rect,
    pub rotation: f64,
    pub scale: Vec2,
    /// Half the stroke width; grows the rendered box on every side.
    pub stroke_pad: f64,
}

impl SimNode {
    /// A node whose local box starts at its anchor, like a rect or image.
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            local: Rect::from_origin_size(Point::ORIGIN, size),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            stroke_pad: 0.0,
        }
    }

    pub fn with_local(mut self, local: Rect) -> Self {
        self.local = local;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_stroke(mut self, width: f64) -> Self {
        self.stroke_pad = width / 2.0;
        self
    }

    /// Build the node a renderer would create for `item`.
    ///
    /// Circles are anchored at their center, lines at their first
    /// coordinate frame, and everything else at the top-left. Text height
    /// is approximated by one line of `font_size`.
    pub fn from_item(item: &CanvasItem) -> Self {
        let (local, stroke) = match &item.shape {
            Shape::Rect(r) => (
                Rect::new(0.0, 0.0, r.width, r.height),
                r.stroke_enabled.then_some(r.stroke_width),
            ),
            Shape::Circle(c) => (
                Rect::new(-c.radius, -c.radius, c.radius, c.radius),
                c.stroke_enabled.then_some(c.stroke_width),
            ),
            Shape::Line(l) => {
                let points: Vec<Point> = l
                    .points
                    .chunks_exact(2)
                    .map(|xy| Point::new(xy[0], xy[1]))
                    .collect();
                (bounds_of(&points), Some(l.stroke_width))
            }
            Shape::Text(t) => (Rect::new(0.0, 0.0, t.width, t.font_size), None),
            Shape::Image(i) => (Rect::new(0.0, 0.0, i.width, i.height), None),
        };
        Self {
            position: item.position(),
            local,
            rotation: item.base.rotation,
            scale: Vec2::new(1.0, 1.0),
            stroke_pad: stroke.unwrap_or(0.0) / 2.0,
        }
    }
}

impl CanvasNode for SimNode {
    fn client_rect(&self) -> Rect {
        let padded = self.local.inflate(self.stroke_pad, self.stroke_pad);
        let rad = self.rotation.to_radians();
        let corners = [
            Vec2::new(padded.x0, padded.y0),
            Vec2::new(padded.x1, padded.y0),
            Vec2::new(padded.x1, padded.y1),
            Vec2::new(padded.x0, padded.y1),
        ]
        .map(|c| {
            let scaled = Vec2::new(c.x * self.scale.x, c.y * self.scale.y);
            if rad == 0.0 {
                self.position + scaled
            } else {
                rotated_corner(self.position, scaled, rad)
            }
        });
        bounds_of(&corners)
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Size {
        self.local.size()
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }
}

/// An in-memory scene of `SimNode`s keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct SimScene {
    nodes: HashMap<ItemId, SimNode>,
}

impl SimScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// One node per item currently in `doc`.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            nodes: doc
                .items()
                .iter()
                .map(|item| (item.id(), SimNode::from_item(item)))
                .collect(),
        }
    }

    pub fn insert(&mut self, id: ItemId, node: SimNode) {
        self.nodes.insert(id, node);
    }

    pub fn remove(&mut self, id: ItemId) -> Option<SimNode> {
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<&SimNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Scene for SimScene {
    fn node(&self, id: ItemId) -> Option<&dyn CanvasNode> {
        self.nodes.get(&id).map(|n| n as &dyn CanvasNode)
    }

    fn node_mut(&mut self, id: ItemId) -> Option<&mut dyn CanvasNode> {
        self.nodes.get_mut(&id).map(|n| n as &mut dyn CanvasNode)
    }

    fn refresh(&mut self, item: &CanvasItem) {
        self.nodes.insert(item.id(), SimNode::from_item(item));
    }

    fn remove_node(&mut self, id: ItemId) {
        self.nodes.remove(&id);
    }
}
