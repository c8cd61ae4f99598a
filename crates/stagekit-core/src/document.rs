//! The item collection, selection, and paint order.
//!
//! `Document` owns every `CanvasItem` plus the per-kind id counters and the
//! running z-index counter. Selection is a plain `ItemId` reference: an id
//! with no matching item reads as "nothing selected".

use crate::config::CanvasConfig;
use crate::error::{Result, StagekitError};
use crate::id::{IdAllocator, ItemId};
use crate::model::{
    CanvasItem, ImageProps, ItemBase, ItemKind, ItemPatch, ItemSpec, Shape, StageConfig,
};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Offset applied to a duplicated item.
pub const CLONE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Z-order moves for the selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerOrderDirection {
    /// Above every other item.
    Front,
    /// Swap with the item directly above.
    Forward,
    /// Swap with the item directly below.
    Backward,
    /// Below every other item.
    Back,
}

impl FromStr for LayerOrderDirection {
    type Err = StagekitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "front" => Ok(Self::Front),
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "back" => Ok(Self::Back),
            _ => Err(StagekitError::UnknownLayerDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    items: Vec<CanvasItem>,
    selected: Option<ItemId>,
    ids: IdAllocator,
    z_counter: i64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            ids: IdAllocator::new(),
            z_counter: 1,
        }
    }

    /// The starter document: a single `text-0` greeting at (200, 200).
    pub fn with_welcome_text(config: &CanvasConfig) -> Self {
        let mut doc = Self::new();
        let id = ItemId::intern("text-0");
        let mut shape = Shape::default_for(ItemKind::Text, config);
        if let Shape::Text(t) = &mut shape {
            t.text = "Hello, World!".into();
            t.width = config.text.default_width + 100.0;
        }
        doc.items.push(CanvasItem {
            base: ItemBase {
                id,
                name: id.to_string(),
                x: 200.0,
                y: 200.0,
                rotation: 0.0,
                draggable: true,
                z_index: 1,
                opacity: 1.0,
            },
            shape,
        });
        doc
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Items in insertion order.
    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: ItemId) -> Option<&CanvasItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut CanvasItem> {
        self.items.iter_mut().find(|i| i.id() == id)
    }

    /// Items in paint order, back to front. Equal z-indices keep their
    /// insertion order.
    pub fn sorted_items(&self) -> Vec<&CanvasItem> {
        let mut sorted: Vec<&CanvasItem> = self.items.iter().collect();
        sorted.sort_by_key(|i| i.z_index());
        sorted
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected
    }

    /// The selected item, if the selection still refers to a live item.
    pub fn selected_item(&self) -> Option<&CanvasItem> {
        self.selected.and_then(|id| self.item(id))
    }

    pub fn selected_kind(&self) -> Option<ItemKind> {
        self.selected_item().map(CanvasItem::kind)
    }

    pub fn is_shape_selected(&self) -> bool {
        self.selected_kind().is_some_and(ItemKind::is_shape)
    }

    /// The id the next item of `kind` will receive.
    pub fn peek_id(&self, kind: ItemKind) -> u32 {
        self.ids.peek(kind)
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select(&mut self, id: Option<ItemId>) {
        self.selected = id;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ─── Creation ────────────────────────────────────────────────────────

    /// Build an item with a fresh id and a z-index above everything in the
    /// document. The item is not inserted.
    pub fn create_item(&mut self, spec: ItemSpec, stage: StageConfig) -> CanvasItem {
        let kind = spec.shape.kind();
        let id = self.ids.allocate(kind);
        let top = self.items.iter().map(CanvasItem::z_index).max();
        self.z_counter = top.map_or(self.z_counter, |z| z.max(self.z_counter)) + 1;

        let position = spec
            .position
            .unwrap_or_else(|| spec.shape.default_position(stage));

        CanvasItem {
            base: ItemBase {
                id,
                name: id.to_string(),
                x: position.x,
                y: position.y,
                rotation: spec.rotation,
                draggable: spec.draggable,
                z_index: self.z_counter,
                opacity: spec.opacity,
            },
            shape: spec.shape,
        }
    }

    /// Create, insert, and select a new item.
    pub fn add_item(&mut self, spec: ItemSpec, stage: StageConfig) -> ItemId {
        let item = self.create_item(spec, stage);
        let id = item.id();
        log::debug!("add {id} z={}", item.z_index());
        self.items.push(item);
        self.selected = Some(id);
        id
    }

    /// Add an image whose intrinsic size is scaled down to fit the initial
    /// size limit, centered on the canvas.
    pub fn add_image(
        &mut self,
        width: f64,
        height: f64,
        source: Option<String>,
        stage: StageConfig,
        config: &CanvasConfig,
    ) -> ItemId {
        let scale = initial_image_scale(width, height, config.image.max_initial_size);
        let (w, h) = (width * scale, height * scale);
        let spec = ItemSpec::from_shape(Shape::Image(ImageProps {
            source,
            width: w,
            height: h,
        }))
        .at(Point::new(stage.width / 2.0 - w / 2.0, stage.height / 2.0 - h / 2.0));
        self.add_item(spec, stage)
    }

    /// Swap the selected image's pixels, rescaling to the initial size
    /// limit. Position is kept. Returns false unless an image is selected.
    pub fn replace_selected_image(
        &mut self,
        width: f64,
        height: f64,
        source: Option<String>,
        config: &CanvasConfig,
    ) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let scale = initial_image_scale(width, height, config.image.max_initial_size);
        match self.item_mut(id).map(|i| &mut i.shape) {
            Some(Shape::Image(img)) => {
                img.source = source;
                img.width = width * scale;
                img.height = height * scale;
                log::debug!("replace image {id}");
                true
            }
            _ => false,
        }
    }

    /// Duplicate the selected item at `CLONE_OFFSET` and select the copy.
    /// The copy keeps every property except id, name, and z-index.
    pub fn clone_selected_item(&mut self, stage: StageConfig) -> Option<ItemId> {
        let source = self.selected_item()?;
        let spec = ItemSpec {
            shape: source.shape.clone(),
            position: Some(source.position() + CLONE_OFFSET),
            rotation: source.base.rotation,
            draggable: source.base.draggable,
            opacity: source.base.opacity,
        };
        let from = source.id();
        let id = self.add_item(spec, stage);
        log::debug!("clone {from} -> {id}");
        Some(id)
    }

    // ─── Updates ─────────────────────────────────────────────────────────

    /// Apply `patch` to the item `id`. Returns false if no such item.
    pub fn update_item(&mut self, id: ItemId, patch: &ItemPatch) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    pub fn update_selected_item(&mut self, patch: &ItemPatch) -> bool {
        match self.selected {
            Some(id) => self.update_item(id, patch),
            None => false,
        }
    }

    // ─── Deletion ────────────────────────────────────────────────────────

    /// Remove `id`, clearing the selection if it pointed there.
    pub fn delete_item(&mut self, id: ItemId) -> Option<CanvasItem> {
        let index = self.items.iter().position(|i| i.id() == id)?;
        let removed = self.items.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::debug!("delete {id}");
        Some(removed)
    }

    pub fn delete_selected_item(&mut self) -> Option<CanvasItem> {
        self.delete_item(self.selected?)
    }

    // ─── Layer order ─────────────────────────────────────────────────────

    /// Move the selected item in paint order. Returns true if any z-index
    /// was written. Stepping past either end is a no-op.
    pub fn change_layer_order(&mut self, direction: LayerOrderDirection) -> bool {
        let Some(id) = self.selected_item().map(CanvasItem::id) else {
            return false;
        };

        let order: Vec<(ItemId, i64)> = self
            .sorted_items()
            .iter()
            .map(|i| (i.id(), i.z_index()))
            .collect();
        let Some(pos) = order.iter().position(|(i, _)| *i == id) else {
            return false;
        };
        let current = order[pos].1;

        let writes: Vec<(ItemId, i64)> = match direction {
            LayerOrderDirection::Front => {
                let max = order.iter().map(|(_, z)| *z).max().unwrap_or(current);
                vec![(id, max + 1)]
            }
            LayerOrderDirection::Back => {
                let min = order.iter().map(|(_, z)| *z).min().unwrap_or(current);
                vec![(id, min - 1)]
            }
            LayerOrderDirection::Forward => match order.get(pos + 1) {
                Some(&(above, z)) => vec![(id, z), (above, current)],
                None => return false,
            },
            LayerOrderDirection::Backward => match pos.checked_sub(1).and_then(|p| order.get(p)) {
                Some(&(below, z)) => vec![(id, z), (below, current)],
                None => return false,
            },
        };

        for (target, z) in writes {
            if let Some(item) = self.item_mut(target) {
                item.base.z_index = z;
            }
        }
        log::debug!("layer {direction:?} {id}");
        true
    }
}

/// `min(limit / w, limit / h, 1)`, or 1 when that is not a usable scale.
fn initial_image_scale(width: f64, height: f64, limit: f64) -> f64 {
    let scale = (limit / width).min(limit / height).min(1.0);
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}
