//! Bounds constraint engine.
//!
//! Keeps interactive transforms inside the canvas rectangle
//! `[0, width] × [0, height]`:
//!
//! - **Resize** (`constrain_resize_box`): vetoes any candidate box whose
//!   rotated bounds overflow the canvas by more than `SNAP_THRESHOLD`, and
//!   snaps edges that land within the threshold exactly onto the canvas edge.
//! - **Drag** (`constrain_drag_position`): hard clamp of the rendered box.
//! - **Scale** (`constrain_scale`): shrinks scale factors that would push the
//!   rendered box past an edge, preserving their sign.
//!
//! The stage is a parameter of every call; nothing is cached between ticks.

use crate::geometry::{TransformerBox, axis_aligned_bounds};
use crate::model::StageConfig;
use crate::node::CanvasNode;
use kurbo::{Point, Rect, Size, Vec2};

/// Edge snap tolerance for resize, in pixels.
pub const SNAP_THRESHOLD: f64 = 2.0;

/// Whether `rect` lies entirely inside the canvas (edges inclusive).
pub fn is_within_bounds(rect: Rect, stage: StageConfig) -> bool {
    rect.x0 >= 0.0 && rect.y0 >= 0.0 && rect.x1 <= stage.width && rect.y1 <= stage.height
}

pub fn is_node_within_bounds(node: &dyn CanvasNode, stage: StageConfig) -> bool {
    is_within_bounds(node.client_rect(), stage)
}

// ─── Resize ──────────────────────────────────────────────────────────────

/// Resize bound function: returns the box to commit for this tick.
///
/// If the rotated bounds of `new_box` leave the canvas by more than
/// `SNAP_THRESHOLD` on any side, the whole change is rejected and `old_box`
/// is returned. Otherwise each edge within the threshold of its canvas edge
/// is snapped onto it, adjusting only the field that controls that edge:
/// left → `x`, top → `y`, right → `width`, bottom → `height`.
pub fn constrain_resize_box(
    stage: StageConfig,
    old_box: TransformerBox,
    new_box: TransformerBox,
) -> TransformerBox {
    let b = axis_aligned_bounds(&new_box);
    let t = SNAP_THRESHOLD;

    let out_of_bounds =
        b.x0 < -t || b.y0 < -t || b.x1 > stage.width + t || b.y1 > stage.height + t;
    if out_of_bounds {
        log::debug!("resize vetoed: bounds {b:?} leave {}x{}", stage.width, stage.height);
        return old_box;
    }

    let mut snapped = new_box;

    if b.x0.abs() <= t && b.x0 != 0.0 {
        snapped.x = new_box.x - b.x0;
    }
    if b.y0.abs() <= t && b.y0 != 0.0 {
        snapped.y = new_box.y - b.y0;
    }
    if (b.x1 - stage.width).abs() <= t {
        snapped.width = new_box.width + (stage.width - b.x1);
    }
    if (b.y1 - stage.height).abs() <= t {
        snapped.height = new_box.height + (stage.height - b.y1);
    }

    if snapped != new_box {
        log::trace!("resize snapped {new_box:?} -> {snapped:?}");
    }
    snapped
}

// ─── Drag ────────────────────────────────────────────────────────────────

/// Drag bound function.
///
/// `candidate` is the proposed logical position, `client` the node's
/// current rendered rect, and `box_offset` the vector from the logical
/// position to the rendered rect's top-left (rotation and stroke move the
/// visual box away from the anchor). Each axis is clamped independently;
/// when a box is larger than the canvas the far edge wins.
pub fn constrain_drag_position(
    stage: StageConfig,
    candidate: Point,
    client: Rect,
    box_offset: Vec2,
) -> Point {
    let (w, h) = (client.width(), client.height());
    let mut p = candidate;

    if candidate.x + box_offset.x < 0.0 {
        p.x = -box_offset.x;
    }
    if candidate.y + box_offset.y < 0.0 {
        p.y = -box_offset.y;
    }
    if candidate.x + box_offset.x + w > stage.width {
        p.x = stage.width - w - box_offset.x;
    }
    if candidate.y + box_offset.y + h > stage.height {
        p.y = stage.height - h - box_offset.y;
    }

    p
}

/// `constrain_drag_position` for a live node.
pub fn drag_bound(node: &dyn CanvasNode, candidate: Point, stage: StageConfig) -> Point {
    let client = node.client_rect();
    let box_offset = client.origin() - node.position();
    constrain_drag_position(stage, candidate, client, box_offset)
}

// ─── Scale ───────────────────────────────────────────────────────────────

/// Result of `constrain_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConstraint {
    pub scale_x: f64,
    pub scale_y: f64,
    /// Whether any side overflowed. Callers skip the write-back when false.
    pub constrained: bool,
}

impl ScaleConstraint {
    pub fn scale(&self) -> Vec2 {
        Vec2::new(self.scale_x, self.scale_y)
    }
}

/// Sign with `sign(0) == 0`, unlike `f64::signum`.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Largest scale along one axis that fits `max_extent`, keeping the sign
/// of `current`. Falls back to `current` whenever the division is
/// degenerate or the result would be zero, non-finite, or flipped.
fn fit_axis(max_extent: f64, unscaled: f64, current: f64) -> f64 {
    if unscaled == 0.0 || max_extent <= 0.0 {
        return current;
    }
    let s = max_extent / unscaled * sign(current);
    if s == 0.0 || !s.is_finite() {
        current
    } else {
        s
    }
}

/// Transform bound for scale handles: detect overflow on each of the four
/// sides of the rendered box and recompute the offending axis' scale so
/// the box ends at the canvas edge.
pub fn constrain_scale(node: &dyn CanvasNode, stage: StageConfig) -> ScaleConstraint {
    let scale = node.scale();
    let size = node.size();
    let b = node.client_rect();

    let mut out = ScaleConstraint {
        scale_x: scale.x,
        scale_y: scale.y,
        constrained: false,
    };

    if b.x0 < 0.0 {
        out.scale_x = fit_axis(b.width() + b.x0, size.width, scale.x);
        out.constrained = true;
    }
    if b.y0 < 0.0 {
        out.scale_y = fit_axis(b.height() + b.y0, size.height, scale.y);
        out.constrained = true;
    }
    if b.x1 > stage.width {
        let max_width = stage.width - b.x0;
        if size.width * scale.x.abs() > max_width {
            out.scale_x = fit_axis(max_width, size.width, scale.x);
            out.constrained = true;
        }
    }
    if b.y1 > stage.height {
        let max_height = stage.height - b.y0;
        if size.height * scale.y.abs() > max_height {
            out.scale_y = fit_axis(max_height, size.height, scale.y);
            out.constrained = true;
        }
    }

    if out.constrained {
        log::trace!("scale clamped {scale:?} -> {:?}", out.scale());
    }
    out
}

/// Room left for the node's rendered box between its current top-left and
/// the far canvas edges.
pub fn max_dimensions(node: &dyn CanvasNode, stage: StageConfig) -> Size {
    let origin = node.client_rect().origin();
    Size::new(stage.width - origin.x, stage.height - origin.y)
}
