//! Integration tests: bounds invariants over grids of boxes, angles, and
//! candidate positions (stagekit-core).

use stagekit_core::bounds::{SNAP_THRESHOLD, constrain_drag_position, constrain_resize_box};
use stagekit_core::geometry::{TransformerBox, axis_aligned_bounds};
use stagekit_core::{Point, Rect, StageConfig, Vec2};

const EPS: f64 = 1e-9;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const STAGE: StageConfig = StageConfig {
    width: 800.0,
    height: 800.0,
};

fn boxes() -> Vec<TransformerBox> {
    let mut out = Vec::new();
    for x in [-40.0, 0.0, 13.5, 300.0] {
        for y in [-7.0, 0.0, 250.0] {
            for (w, h) in [(0.0, 0.0), (1.0, 1.0), (150.0, 100.0), (-30.0, 60.0), (640.0, 12.0)] {
                out.push(TransformerBox::new(x, y, w, h));
            }
        }
    }
    out
}

// ─── Geometry kernel ────────────────────────────────────────────────────

#[test]
fn unrotated_bounds_are_identity() {
    for b in boxes() {
        let r = axis_aligned_bounds(&b);
        let expected = Rect::from_points((b.x, b.y), (b.x + b.width, b.y + b.height));
        assert_eq!(r, expected, "{b:?}");
    }
}

#[test]
fn whole_turns_reproduce_box() {
    for b in boxes() {
        let plain = axis_aligned_bounds(&b);
        for turns in [-2.0, -1.0, 1.0, 3.0] {
            let r = axis_aligned_bounds(&b.with_rotation(360.0 * turns));
            for (got, want) in [(r.x0, plain.x0), (r.y0, plain.y0), (r.x1, plain.x1), (r.y1, plain.y1)]
            {
                assert!((got - want).abs() < 1e-6, "{b:?} @ {turns} turns: {r:?} vs {plain:?}");
            }
        }
    }
}

#[test]
fn bounds_are_never_negative_sized() {
    for b in boxes() {
        for angle in (0..24).map(|i| i as f64 * 17.0 - 90.0) {
            let r = axis_aligned_bounds(&b.with_rotation(angle));
            assert!(r.width() >= 0.0 && r.height() >= 0.0, "{b:?} @ {angle}: {r:?}");
        }
    }
}

// ─── Resize clamp ───────────────────────────────────────────────────────

#[test]
fn inside_boxes_away_from_edges_pass_through() {
    let old = TransformerBox::new(400.0, 400.0, 10.0, 10.0);
    for x in [3.0, 50.0, 200.0] {
        for y in [3.0, 120.0] {
            for (w, h) in [(10.0, 10.0), (300.0, 200.0)] {
                for angle in [0.0, 15.0] {
                    let new = TransformerBox::new(x, y, w, h).with_rotation(angle);
                    let b = axis_aligned_bounds(&new);
                    let clear = b.x0 > SNAP_THRESHOLD
                        && b.y0 > SNAP_THRESHOLD
                        && b.x1 < STAGE.width - SNAP_THRESHOLD
                        && b.y1 < STAGE.height - SNAP_THRESHOLD;
                    if clear {
                        assert_eq!(constrain_resize_box(STAGE, old, new), new);
                    }
                }
            }
        }
    }
}

#[test]
fn overflowing_boxes_return_old_exactly() {
    init_logger();
    let old = TransformerBox::new(100.0, 100.0, 50.0, 50.0).with_rotation(10.0);
    let overflowing = [
        TransformerBox::new(-2.5, 100.0, 50.0, 50.0),
        TransformerBox::new(100.0, -10.0, 50.0, 50.0),
        TransformerBox::new(760.0, 100.0, 42.5, 50.0),
        TransformerBox::new(100.0, 700.0, 50.0, 103.0),
        TransformerBox::new(700.0, 700.0, 100.0, 100.0).with_rotation(30.0),
    ];
    for new in overflowing {
        assert_eq!(constrain_resize_box(STAGE, old, new), old, "{new:?}");
    }
}

#[test]
fn left_edge_one_pixel_in_snaps_to_zero() {
    init_logger();
    for (w, angle) in [(50.0, 0.0), (120.0, 0.0), (80.0, 20.0)] {
        let old = TransformerBox::new(30.0, 100.0, w, 40.0).with_rotation(angle);
        // Place the box so its rotated left edge sits at x = 1.
        let placed = TransformerBox::new(0.0, 100.0, w, 40.0).with_rotation(angle);
        let shift = 1.0 - axis_aligned_bounds(&placed).x0;
        let new = TransformerBox { x: shift, ..placed };
        let out = constrain_resize_box(STAGE, old, new);
        let left = axis_aligned_bounds(&out).x0;
        assert!(left.abs() < EPS, "w={w} angle={angle}: left edge {left}");
    }
}

#[test]
fn corner_box_scenario() {
    init_logger();
    let old = TransformerBox::new(790.0, 790.0, 50.0, 50.0);
    // Every growth beyond (800, 800) is vetoed.
    for grow in [1.0, 5.0, 40.0] {
        let new = TransformerBox::new(790.0, 790.0, 50.0 + grow, 50.0 + grow);
        assert_eq!(constrain_resize_box(STAGE, old, new), old);
    }

    // Within 2px of the corner, the far edges land exactly on it.
    let old = TransformerBox::new(750.0, 750.0, 40.0, 40.0);
    for (w, h) in [(48.0, 48.5), (51.5, 52.0), (50.0, 49.0)] {
        let out = constrain_resize_box(STAGE, old, TransformerBox::new(750.0, 750.0, w, h));
        let b = axis_aligned_bounds(&out);
        assert_eq!((b.x1, b.y1), (800.0, 800.0), "{w}x{h}");
    }
}

// ─── Drag clamp ─────────────────────────────────────────────────────────

#[test]
fn drag_clamp_keeps_rendered_box_on_canvas() {
    init_logger();
    let sizes = [(10.0, 10.0), (120.0, 80.0), (799.0, 40.0)];
    let offsets = [
        Vec2::ZERO,
        Vec2::new(-60.0, -60.0),
        Vec2::new(-1.5, -1.5),
        Vec2::new(-35.0, 12.0),
    ];
    for (w, h) in sizes {
        for offset in offsets {
            for cx in [-500.0, -1.0, 0.0, 400.0, 799.0, 1500.0] {
                for cy in [-300.0, 10.0, 790.0, 2000.0] {
                    let candidate = Point::new(cx, cy);
                    let client = Rect::from_origin_size(candidate + offset, (w, h));
                    let p = constrain_drag_position(STAGE, candidate, client, offset);
                    let box_origin = p + offset;
                    assert!(box_origin.x >= -EPS && box_origin.y >= -EPS, "{p:?}");
                    assert!(box_origin.x + w <= STAGE.width + EPS, "{p:?} w={w}");
                    assert!(box_origin.y + h <= STAGE.height + EPS, "{p:?} h={h}");
                }
            }
        }
    }
}
