//! Editing session: binds the engines to a live scene.
//!
//! The session owns everything that survives between interaction ticks:
//!
//! - **Document**: the items, selection, and z-order.
//! - **Stage**: the canvas size, re-read by every constraint call.
//! - **Guides**: the flags of the current tick, cleared when an
//!   interaction ends.
//!
//! Each tick handler reads the live node through `Scene`, runs the
//! relevant engine, writes the adjusted transform back to the node, and
//! commits it into the document once. Handlers given an id without a node
//! do nothing.

use crate::background::Background;
use crate::shortcuts::ShortcutAction;
use kurbo::{Point, Size, Vec2};
use stagekit_core::align::{AlignmentDirection, ArrowDirection, align_position, nudge_delta};
use stagekit_core::bounds::{constrain_resize_box, constrain_scale, drag_bound};
use stagekit_core::guides::{
    GuideLine, GuideState, show_guides_during_transform, snap_during_drag,
};
use stagekit_core::{
    CanvasConfig, CanvasItem, Document, ItemId, ItemKind, ItemPatch, ItemSpec,
    LayerOrderDirection, RotationSnap, Scene, Shape, StageConfig, TransformerBox, ViewMode,
};

pub struct Session {
    pub config: CanvasConfig,
    pub document: Document,
    pub background: Background,
    pub view_mode: ViewMode,
    stage: StageConfig,
    guides: GuideState,
    rotation_snap: RotationSnap,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Session {
    /// A session on the starter document.
    pub fn new(config: CanvasConfig) -> Self {
        let document = Document::with_welcome_text(&config);
        Self::with_document(config, document)
    }

    pub fn with_document(config: CanvasConfig, document: Document) -> Self {
        let side = config.size.default;
        Self {
            stage: StageConfig {
                width: side,
                height: side,
            },
            rotation_snap: RotationSnap::new(config.rotation.clone()),
            config,
            document,
            background: Background::default(),
            view_mode: ViewMode::default(),
            guides: GuideState::default(),
        }
    }

    // ─── Stage ───────────────────────────────────────────────────────────

    pub fn stage(&self) -> StageConfig {
        self.stage
    }

    pub fn set_stage_width(&mut self, width: f64) {
        self.stage.width = self.config.size.clamp(width);
    }

    pub fn set_stage_height(&mut self, height: f64) {
        self.stage.height = self.config.size.clamp(height);
    }

    pub fn set_stage_size(&mut self, width: f64, height: f64) {
        self.set_stage_width(width);
        self.set_stage_height(height);
        log::debug!("stage {}x{}", self.stage.width, self.stage.height);
    }

    /// Display scale of the canvas inside a container of `container` size.
    pub fn fit_scale(&self, container: Size) -> f64 {
        self.view_mode.fit_scale(container, self.stage)
    }

    // ─── Guides ──────────────────────────────────────────────────────────

    pub fn guides(&self) -> GuideState {
        self.guides
    }

    pub fn clear_guides(&mut self) {
        self.guides.clear();
    }

    pub fn guide_lines(&self) -> Vec<GuideLine> {
        self.guides
            .active_lines(self.stage, &self.config.snap)
            .collect()
    }

    // ─── Document shortcuts ──────────────────────────────────────────────

    /// Add a default item of `kind`, centered on the canvas, and select it.
    pub fn add_item(&mut self, kind: ItemKind) -> ItemId {
        let spec = ItemSpec::new(kind, &self.config);
        self.document.add_item(spec, self.stage)
    }

    pub fn add_image(&mut self, width: f64, height: f64, source: Option<String>) -> ItemId {
        self.document
            .add_image(width, height, source, self.stage, &self.config)
    }

    pub fn clone_selected(&mut self) -> Option<ItemId> {
        self.document.clone_selected_item(self.stage)
    }

    pub fn delete_selected(&mut self) -> Option<CanvasItem> {
        self.document.delete_selected_item()
    }

    pub fn select(&mut self, id: Option<ItemId>) {
        self.document.select(id);
    }

    pub fn change_layer_order(&mut self, direction: LayerOrderDirection) -> bool {
        self.document.change_layer_order(direction)
    }

    // ─── Resize ──────────────────────────────────────────────────────────

    /// Transformer bound function for resize handles.
    pub fn bound_box(&self, old_box: TransformerBox, new_box: TransformerBox) -> TransformerBox {
        constrain_resize_box(self.stage, old_box, new_box)
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    /// Drag bound function. Without a node the candidate passes through.
    pub fn drag_bound(&self, scene: &dyn Scene, id: ItemId, candidate: Point) -> Point {
        match scene.node(id) {
            Some(node) => drag_bound(node, candidate, self.stage),
            None => candidate,
        }
    }

    /// Drag tick: snap the node, then commit its position.
    pub fn on_drag_move(&mut self, scene: &mut dyn Scene, id: ItemId) -> GuideState {
        let Some(node) = scene.node_mut(id) else {
            self.guides.clear();
            return self.guides;
        };
        self.guides = snap_during_drag(node, self.stage, &self.config.snap);
        let position = node.position();
        self.document.update_item(id, &ItemPatch::position(position));
        self.guides
    }

    /// End of drag: commit the final position and hide the guides.
    pub fn on_drag_end(&mut self, scene: &dyn Scene, id: ItemId) {
        self.guides.clear();
        if let Some(node) = scene.node(id) {
            self.document
                .update_item(id, &ItemPatch::position(node.position()));
        }
    }

    // ─── Transform ───────────────────────────────────────────────────────

    /// Transform tick: clamp the node's scale to the canvas and report
    /// proximity guides. The scale is only written when it was clamped.
    pub fn on_transform(&mut self, scene: &mut dyn Scene, id: ItemId) -> GuideState {
        let Some(node) = scene.node_mut(id) else {
            self.guides.clear();
            return self.guides;
        };
        let clamp = constrain_scale(node, self.stage);
        if clamp.constrained {
            node.set_scale(clamp.scale());
        }
        self.guides = show_guides_during_transform(node, self.stage, &self.config.snap);
        self.guides
    }

    /// End of transform: fold the node's scale into the item's dimensions,
    /// reset the node to unit scale, and commit position and rotation.
    pub fn on_transform_end(&mut self, scene: &mut dyn Scene, id: ItemId) -> bool {
        self.guides.clear();
        let Some(item) = self.document.item(id) else {
            return false;
        };
        let Some(node) = scene.node_mut(id) else {
            return false;
        };
        let scale = node.scale();
        let position = node.position();
        let rotation = node.rotation();
        node.set_scale(Vec2::new(1.0, 1.0));

        let patch = ItemPatch {
            x: Some(position.x),
            y: Some(position.y),
            rotation: Some(rotation),
            ..bake_scale(item, scale, &self.config)
        };
        self.document.update_item(id, &patch);
        log::debug!("transform end {id} scale={scale:?}");

        if let Some(item) = self.document.item(id) {
            scene.refresh(item);
        }
        true
    }

    // ─── Rotation ────────────────────────────────────────────────────────

    pub fn set_rotation_snap_engaged(&mut self, engaged: bool) {
        self.rotation_snap.set_snap_engaged(engaged);
    }

    pub fn rotation_snap(&self) -> &RotationSnap {
        &self.rotation_snap
    }

    /// Rotate the selected item, snapping while the modifier is engaged.
    /// Both the item and its node receive the result.
    pub fn rotate_selected(&mut self, scene: &mut dyn Scene, angle: f64) -> Option<f64> {
        let id = self.document.selected_item()?.id();
        let snapped = self.rotation_snap.snap_rotation(angle);
        self.document.update_item(id, &ItemPatch::rotation(snapped));
        if let Some(node) = scene.node_mut(id) {
            node.set_rotation(snapped);
        }
        Some(snapped)
    }

    // ─── Align & nudge ───────────────────────────────────────────────────

    /// Align the selected item's rendered box with a canvas edge or center.
    pub fn align_selected(&mut self, scene: &mut dyn Scene, direction: AlignmentDirection) -> bool {
        let Some(id) = self.document.selected_item().map(CanvasItem::id) else {
            return false;
        };
        let Some(node) = scene.node_mut(id) else {
            return false;
        };
        let target = align_position(direction, node.client_rect(), node.position(), self.stage);
        node.set_position(target);
        self.document.update_item(id, &ItemPatch::position(target))
    }

    pub fn nudge_selected(
        &mut self,
        scene: &mut dyn Scene,
        direction: ArrowDirection,
        amount: f64,
    ) -> bool {
        let Some(id) = self.document.selected_item().map(CanvasItem::id) else {
            return false;
        };
        let Some(node) = scene.node_mut(id) else {
            return false;
        };
        let target = node.position() + nudge_delta(direction, amount);
        node.set_position(target);
        self.document.update_item(id, &ItemPatch::position(target))
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Run a resolved shortcut. Returns whether the event was consumed, so
    /// the host knows to suppress the browser default. Nothing runs while
    /// a text item is being edited.
    pub fn handle_shortcut(
        &mut self,
        scene: &mut dyn Scene,
        action: ShortcutAction,
        editing_text: bool,
    ) -> bool {
        if editing_text || self.document.selected_item().is_none() {
            return false;
        }
        log::trace!("shortcut {action:?}");
        match action {
            ShortcutAction::Delete => match self.delete_selected() {
                Some(item) => {
                    scene.remove_node(item.id());
                    true
                }
                None => false,
            },
            ShortcutAction::Duplicate => {
                let Some(id) = self.clone_selected() else {
                    return false;
                };
                if let Some(item) = self.document.item(id) {
                    scene.refresh(item);
                }
                true
            }
            ShortcutAction::Nudge { direction, amount } => {
                self.nudge_selected(scene, direction, amount)
            }
            ShortcutAction::Deselect => {
                self.document.clear_selection();
                true
            }
            ShortcutAction::SendBackward => self.change_layer_order(LayerOrderDirection::Backward),
            ShortcutAction::BringForward => self.change_layer_order(LayerOrderDirection::Forward),
            ShortcutAction::SendToBack => self.change_layer_order(LayerOrderDirection::Back),
            ShortcutAction::BringToFront => self.change_layer_order(LayerOrderDirection::Front),
        }
    }
}

/// Dimension fields of `item` with `scale` folded in, floored at the
/// configured minimum sizes. Mirroring is not kept.
fn bake_scale(item: &CanvasItem, scale: Vec2, config: &CanvasConfig) -> ItemPatch {
    let (sx, sy) = (scale.x.abs(), scale.y.abs());
    let min = config.shape.min_size;
    match &item.shape {
        Shape::Rect(r) => ItemPatch {
            width: Some((r.width * sx).max(min)),
            height: Some((r.height * sy).max(min)),
            ..Default::default()
        },
        Shape::Circle(c) => ItemPatch {
            radius: Some((c.radius * sx.max(sy)).max(min / 2.0)),
            ..Default::default()
        },
        Shape::Image(i) => ItemPatch {
            width: Some((i.width * sx).max(config.image.min_size)),
            height: Some((i.height * sy).max(config.image.min_size)),
            ..Default::default()
        },
        Shape::Text(t) => ItemPatch {
            width: Some((t.width * sx).max(config.text.min_width)),
            ..Default::default()
        },
        Shape::Line(l) => ItemPatch {
            points: Some(
                l.points
                    .chunks_exact(2)
                    .flat_map(|xy| [xy[0] * sx, xy[1] * sy])
                    .collect(),
            ),
            ..Default::default()
        },
    }
}
