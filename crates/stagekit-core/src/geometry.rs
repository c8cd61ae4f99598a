//! Geometry kernel: rotated corners and their axis-aligned bounds.
//!
//! Shapes rotate around their stored origin (the top-left of the
//! unrotated box), not around their center. Angles follow the canvas
//! convention: degrees, clockwise positive with Y pointing down.
//!
//! Bounds use the "loose" approach: rotate the four corners of the
//! unrotated box and take the AABB of the results.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// The box a transformer reports while a resize handle is dragged.
///
/// `width`/`height` may go negative when a handle is pulled across the
/// opposite edge; the bounds functions normalize that.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransformerBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, rotating around `(x, y)`.
    #[serde(default)]
    pub rotation: f64,
}

impl TransformerBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Rotate `offset` by `angle` radians around `pivot`.
///
/// Works in polar form: the offset's length is kept and its direction is
/// advanced by `angle`. A zero offset returns the pivot itself
/// (`atan2(0, 0)` is `0`, so nothing degenerates).
pub fn rotated_corner(pivot: Point, offset: Vec2, angle: f64) -> Point {
    let distance = offset.hypot();
    let new_angle = angle + offset.atan2();
    pivot + Vec2::from_angle(new_angle) * distance
}

/// Axis-aligned bounding rectangle of `b` after rotating it by
/// `b.rotation` degrees around its origin.
///
/// Unrotated boxes short-circuit so the result is exactly the input box.
pub fn axis_aligned_bounds(b: &TransformerBox) -> Rect {
    let origin = b.origin();
    if b.rotation == 0.0 {
        return Rect::from_points(origin, origin + Vec2::new(b.width, b.height));
    }

    let rad = b.rotation.to_radians();
    let corners = [
        Vec2::ZERO,
        Vec2::new(b.width, 0.0),
        Vec2::new(b.width, b.height),
        Vec2::new(0.0, b.height),
    ]
    .map(|offset| rotated_corner(origin, offset, rad));

    bounds_of(&corners)
}

/// Smallest rectangle containing every point in `points`.
/// An empty slice yields a zero rect at the origin.
pub fn bounds_of(points: &[Point]) -> Rect {
    let Some((first, rest)) = points.split_first() else {
        return Rect::ZERO;
    };
    rest.iter()
        .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
}
