//! Geometry constraint and snapping engine for a fixed-size design canvas.
//!
//! | module     | role                                                  |
//! |------------|-------------------------------------------------------|
//! | `geometry` | rotated corners and axis-aligned bounds               |
//! | `bounds`   | resize veto/snap, drag clamp, scale clamp             |
//! | `guides`   | center and margin snapping, guide flags and lines     |
//! | `rotation` | modifier-gated angle snapping                         |
//! | `document` | items, selection, z-order                             |
//! | `align`    | align to canvas edges/centers, arrow nudges           |
//! | `node`     | capability traits onto live render nodes, headless sim |
//! | `view`     | fit/actual display scale                              |
//! | `config`   | canvas limits and per-kind defaults                   |

pub mod align;
pub mod bounds;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod guides;
pub mod id;
pub mod model;
pub mod node;
pub mod rotation;
pub mod view;

pub use align::{AlignmentDirection, ArrowDirection, align_position, nudge_delta};
pub use bounds::{
    SNAP_THRESHOLD, ScaleConstraint, constrain_drag_position, constrain_resize_box,
    constrain_scale, drag_bound, is_node_within_bounds, is_within_bounds, max_dimensions,
};
pub use config::CanvasConfig;
pub use document::{Document, LayerOrderDirection};
pub use error::{Result, StagekitError};
pub use geometry::{TransformerBox, axis_aligned_bounds, rotated_corner};
pub use guides::{
    GuideKind, GuideLine, GuideState, constrain_to_canvas, guide_lines,
    show_guides_during_transform, snap_during_drag,
};
pub use id::ItemId;
pub use model::*;
pub use node::{CanvasNode, Scene, SimNode, SimScene};
pub use rotation::RotationSnap;
pub use view::ViewMode;

// Geometry primitives used throughout the public API.
pub use kurbo::{Point, Rect, Size, Vec2};
