//! Integration tests: interaction ticks through `Session` (stagekit-editor).
//!
//! Drives drag, transform, rotation, alignment, and keyboard flows against
//! a headless `SimScene`, checking that the live node and the document
//! agree after every tick.

use stagekit_core::{
    AlignmentDirection, ArrowDirection, CanvasConfig, CanvasNode, Document, ItemId, ItemKind, Point,
    Scene, Shape, SimScene, StageConfig, TransformerBox, Vec2,
};
use stagekit_editor::{Session, ShortcutAction, ShortcutMap};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn empty_session() -> Session {
    init_logger();
    Session::with_document(CanvasConfig::default(), Document::new())
}

fn position(s: &Session, id: ItemId) -> Point {
    s.document.item(id).map(|i| i.position()).unwrap()
}

fn node_position(scene: &SimScene, id: ItemId) -> Point {
    scene.get(id).map(|n| n.position).unwrap()
}

fn move_node(scene: &mut SimScene, id: ItemId, p: Point) {
    if let Some(node) = scene.node_mut(id) {
        node.set_position(p);
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ─── Drag ───────────────────────────────────────────────────────────────

#[test]
fn drag_near_center_snaps_and_commits() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Rect);
    let mut scene = SimScene::from_document(&s.document);

    move_node(&mut scene, id, Point::new(330.0, 352.0));
    let guides = s.on_drag_move(&mut scene, id);

    assert!(guides.vertical);
    assert!(guides.horizontal);
    assert_eq!(node_position(&scene, id), Point::new(325.0, 350.0));
    assert_eq!(position(&s, id), Point::new(325.0, 350.0));
    assert_eq!(s.guide_lines().len(), 2);

    s.on_drag_end(&scene, id);
    assert!(!s.guides().any());
    assert!(s.guide_lines().is_empty());
}

#[test]
fn drag_near_margin_snaps_to_edge_line() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Rect);
    let mut scene = SimScene::from_document(&s.document);

    move_node(&mut scene, id, Point::new(28.0, 200.0));
    let guides = s.on_drag_move(&mut scene, id);

    assert!(guides.left);
    assert!(!guides.vertical);
    // 2px stroke: rendered box starts 1px left of the anchor.
    assert_eq!(position(&s, id), Point::new(21.0, 200.0));
}

#[test]
fn drag_bound_keeps_box_on_canvas() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Rect);
    let scene = SimScene::from_document(&s.document);

    let p = s.drag_bound(&scene, id, Point::new(-50.0, 900.0));
    assert_eq!(p, Point::new(1.0, 699.0));
}

// ─── Resize & transform ─────────────────────────────────────────────────

#[test]
fn bound_box_follows_stage_size() {
    let mut s = empty_session();
    let old = TransformerBox::new(100.0, 100.0, 100.0, 100.0);
    let new = TransformerBox::new(100.0, 100.0, 400.0, 100.0);
    assert_eq!(s.bound_box(old, new), new);

    s.set_stage_size(400.0, 400.0);
    assert_eq!(s.bound_box(old, new), old);
}

#[test]
fn transform_clamps_scale_and_bakes_dimensions() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Rect);
    let mut scene = SimScene::from_document(&s.document);

    if let Some(node) = scene.node_mut(id) {
        node.set_position(Point::new(600.0, 100.0));
        node.set_scale(Vec2::new(2.0, 1.0));
    }
    s.on_transform(&mut scene, id);

    let scale = scene.get(id).map(|n| n.scale).unwrap();
    assert!(approx(scale.x, 202.0 / 150.0), "scale {scale:?}");
    assert_eq!(scale.y, 1.0);

    assert!(s.on_transform_end(&mut scene, id));
    assert!(!s.guides().any());

    let item = s.document.item(id).unwrap();
    assert_eq!(item.position(), Point::new(600.0, 100.0));
    let Shape::Rect(r) = &item.shape else {
        panic!("expected rect");
    };
    assert!(approx(r.width, 202.0), "width {}", r.width);
    assert_eq!(r.height, 100.0);

    let node = scene.get(id).unwrap();
    assert_eq!(node.scale, Vec2::new(1.0, 1.0));
    assert!(approx(node.size().width, r.width));
}

#[test]
fn transform_inside_leaves_scale_alone() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Circle);
    let mut scene = SimScene::from_document(&s.document);

    if let Some(node) = scene.node_mut(id) {
        node.set_scale(Vec2::new(1.2, 1.2));
    }
    let guides = s.on_transform(&mut scene, id);
    assert_eq!(scene.get(id).map(|n| n.scale), Some(Vec2::new(1.2, 1.2)));
    assert!(guides.vertical && guides.horizontal);

    s.on_transform_end(&mut scene, id);
    let Some(Shape::Circle(c)) = s.document.item(id).map(|i| &i.shape) else {
        panic!("expected circle");
    };
    assert!(approx(c.radius, 72.0));
}

#[test]
fn transform_end_without_item_writes_nothing() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Rect);
    let mut scene = SimScene::from_document(&s.document);
    s.delete_selected();

    if let Some(node) = scene.node_mut(id) {
        node.set_scale(Vec2::new(1.5, 1.5));
    }
    assert!(!s.on_transform_end(&mut scene, id));
    assert_eq!(scene.get(id).map(|n| n.scale), Some(Vec2::new(1.5, 1.5)));
}

// ─── Rotation ───────────────────────────────────────────────────────────

#[test]
fn rotation_snaps_only_while_engaged() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Line);
    let mut scene = SimScene::from_document(&s.document);

    assert_eq!(s.rotate_selected(&mut scene, 88.0), Some(88.0));

    s.set_rotation_snap_engaged(true);
    assert_eq!(s.rotate_selected(&mut scene, 88.0), Some(90.0));
    assert_eq!(s.document.item(id).map(|i| i.base.rotation), Some(90.0));
    assert_eq!(scene.get(id).map(|n| n.rotation), Some(90.0));

    assert_eq!(s.rotate_selected(&mut scene, 358.0), Some(0.0));

    s.set_rotation_snap_engaged(false);
    assert_eq!(s.rotate_selected(&mut scene, 80.0), Some(80.0));
}

// ─── Align & keyboard ───────────────────────────────────────────────────

#[test]
fn align_uses_rendered_box() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Circle);
    let mut scene = SimScene::from_document(&s.document);

    assert!(s.align_selected(&mut scene, AlignmentDirection::Right));
    assert_eq!(position(&s, id), Point::new(739.0, 400.0));
    assert_eq!(node_position(&scene, id), Point::new(739.0, 400.0));

    assert!(s.align_selected(&mut scene, AlignmentDirection::Top));
    assert_eq!(position(&s, id), Point::new(739.0, 61.0));
    assert_eq!(scene.get(id).map(|n| n.client_rect().y0), Some(0.0));
}

#[test]
fn stale_selection_leaves_node_untouched() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Rect);
    let mut scene = SimScene::from_document(&s.document);
    let before = node_position(&scene, id);

    s.delete_selected();
    s.select(Some(id));

    assert!(!s.align_selected(&mut scene, AlignmentDirection::Left));
    assert!(!s.nudge_selected(&mut scene, ArrowDirection::Up, 10.0));
    assert_eq!(node_position(&scene, id), before);
}

#[test]
fn arrow_keys_nudge() {
    let mut s = empty_session();
    let id = s.add_item(ItemKind::Rect);
    let mut scene = SimScene::from_document(&s.document);

    let big_left = ShortcutMap::resolve("ArrowLeft", false, true, false, false).unwrap();
    assert!(s.handle_shortcut(&mut scene, big_left, false));
    let down = ShortcutMap::resolve("ArrowDown", false, false, false, false).unwrap();
    assert!(s.handle_shortcut(&mut scene, down, false));

    assert_eq!(position(&s, id), Point::new(315.0, 351.0));
    assert_eq!(node_position(&scene, id), Point::new(315.0, 351.0));
}

#[test]
fn duplicate_and_delete_via_keyboard() {
    let mut s = empty_session();
    let src = s.add_item(ItemKind::Rect);
    let mut scene = SimScene::from_document(&s.document);

    let dup = ShortcutMap::resolve("d", false, false, false, true).unwrap();
    assert!(s.handle_shortcut(&mut scene, dup, false));
    let copy = s.document.selected_id().unwrap();
    assert_ne!(copy, src);
    assert_eq!(position(&s, copy), position(&s, src) + Vec2::new(20.0, 20.0));
    assert!(scene.get(copy).is_some());

    assert!(s.handle_shortcut(&mut scene, ShortcutAction::Delete, false));
    assert!(s.document.item(copy).is_none());
    assert!(scene.get(copy).is_none());
    assert_eq!(s.document.selected_id(), None);
    assert!(!s.handle_shortcut(&mut scene, ShortcutAction::Delete, false));
}

#[test]
fn bring_to_front_via_keyboard() {
    let mut s = empty_session();
    let a = s.add_item(ItemKind::Rect);
    s.add_item(ItemKind::Circle);
    s.add_item(ItemKind::Text);
    let mut scene = SimScene::from_document(&s.document);

    s.select(Some(a));
    let front = ShortcutMap::resolve("]", false, true, false, true).unwrap();
    for _ in 0..2 {
        assert!(s.handle_shortcut(&mut scene, front, false));
        let top = s.document.sorted_items().last().map(|i| i.id());
        assert_eq!(top, Some(a));
    }
    let za = s.document.item(a).map(|i| i.z_index()).unwrap();
    assert!(s.document.items().iter().filter(|i| i.id() != a).all(|i| i.z_index() < za));
}

#[test]
fn escape_deselects() {
    let mut s = empty_session();
    s.add_item(ItemKind::Rect);
    let mut scene = SimScene::from_document(&s.document);
    let esc = ShortcutMap::resolve("Escape", false, false, false, false).unwrap();
    assert!(s.handle_shortcut(&mut scene, esc, false));
    assert_eq!(s.document.selected_id(), None);
}

#[test]
fn stage_change_recenters_new_items() {
    let mut s = empty_session();
    s.set_stage_size(1920.0, 1080.0);
    assert_eq!(s.stage(), StageConfig::new(1920.0, 1080.0).unwrap());
    let id = s.add_item(ItemKind::Circle);
    assert_eq!(position(&s, id), Point::new(960.0, 540.0));
}
