//! Snap-guide engine.
//!
//! Every tick recomputes a fresh `GuideState`; nothing carries over from
//! the previous tick. During drag the node is moved onto the matched
//! reference line (one line per axis, center first). During transform the
//! proximity tests only report, they never move the node.

use crate::config::SnapConfig;
use crate::model::StageConfig;
use crate::node::CanvasNode;
use kurbo::{Line, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Stroke for the canvas center lines.
pub const CENTER_GUIDE_COLOR: &str = "#0099ff";
/// Stroke for the margin lines.
pub const MARGIN_GUIDE_COLOR: &str = "#10b981";

/// The six reference lines a shape can snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideKind {
    /// Horizontal line through the canvas center (vertical alignment).
    Horizontal,
    /// Vertical line through the canvas center (horizontal alignment).
    Vertical,
    Left,
    Right,
    Top,
    Bottom,
}

impl GuideKind {
    pub const ALL: [GuideKind; 6] = [
        GuideKind::Horizontal,
        GuideKind::Vertical,
        GuideKind::Left,
        GuideKind::Right,
        GuideKind::Top,
        GuideKind::Bottom,
    ];

    pub fn is_center(self) -> bool {
        matches!(self, GuideKind::Horizontal | GuideKind::Vertical)
    }
}

/// Which guides are active for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuideState {
    pub horizontal: bool,
    pub vertical: bool,
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl GuideState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self, kind: GuideKind) -> bool {
        match kind {
            GuideKind::Horizontal => self.horizontal,
            GuideKind::Vertical => self.vertical,
            GuideKind::Left => self.left,
            GuideKind::Right => self.right,
            GuideKind::Top => self.top,
            GuideKind::Bottom => self.bottom,
        }
    }

    pub fn any(&self) -> bool {
        GuideKind::ALL.into_iter().any(|k| self.is_active(k))
    }

    pub fn active(&self) -> impl Iterator<Item = GuideKind> + '_ {
        GuideKind::ALL
            .into_iter()
            .filter(move |k| self.is_active(*k))
    }

    /// Drawable lines for every active flag.
    pub fn active_lines(
        &self,
        stage: StageConfig,
        config: &SnapConfig,
    ) -> impl Iterator<Item = GuideLine> + '_ {
        let metrics = CanvasMetrics::new(stage, config);
        self.active().map(move |kind| guide_line(kind, &metrics))
    }
}

/// Reference lines of the current canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMetrics {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub left_margin: f64,
    pub top_margin: f64,
    pub right_margin: f64,
    pub bottom_margin: f64,
    /// Width between the two margin lines.
    pub available_width: f64,
    pub available_height: f64,
    threshold: f64,
}

impl CanvasMetrics {
    pub fn new(stage: StageConfig, config: &SnapConfig) -> Self {
        let m = config.edge_margin;
        Self {
            width: stage.width,
            height: stage.height,
            center: stage.center(),
            left_margin: m,
            top_margin: m,
            right_margin: stage.width - m,
            bottom_margin: stage.height - m,
            available_width: stage.width - m * 2.0,
            available_height: stage.height - m * 2.0,
            threshold: config.threshold,
        }
    }

    fn is_near(&self, value: f64, target: f64) -> bool {
        (value - target).abs() < self.threshold
    }
}

// ─── Drag ────────────────────────────────────────────────────────────────

/// Snap `node` toward the canvas center and margin lines.
///
/// Per axis the tests run center, leading edge, trailing edge; the first
/// match moves the node so the matched line is hit exactly and stops that
/// axis. An axis is skipped entirely when the rendered box is wider (or
/// taller) than `oversize_ratio` of the space between the margins.
pub fn snap_during_drag(
    node: &mut dyn CanvasNode,
    stage: StageConfig,
    config: &SnapConfig,
) -> GuideState {
    let b = node.client_rect();
    let canvas = CanvasMetrics::new(stage, config);
    let anchor = node.position();
    let offset = anchor - b.origin();
    let (w, h) = (b.width(), b.height());

    let mut guides = GuideState::default();
    let mut target = anchor;

    let skip_x = w > canvas.available_width * config.oversize_ratio;
    let skip_y = h > canvas.available_height * config.oversize_ratio;

    if !skip_x {
        if canvas.is_near(b.center().x, canvas.center.x) {
            target.x = canvas.center.x - w / 2.0 + offset.x;
            guides.vertical = true;
        } else if canvas.is_near(b.x0, canvas.left_margin) {
            target.x = canvas.left_margin + offset.x;
            guides.left = true;
        } else if canvas.is_near(b.x1, canvas.right_margin) {
            target.x = canvas.right_margin - w + offset.x;
            guides.right = true;
        }
    }

    if !skip_y {
        if canvas.is_near(b.center().y, canvas.center.y) {
            target.y = canvas.center.y - h / 2.0 + offset.y;
            guides.horizontal = true;
        } else if canvas.is_near(b.y0, canvas.top_margin) {
            target.y = canvas.top_margin + offset.y;
            guides.top = true;
        } else if canvas.is_near(b.y1, canvas.bottom_margin) {
            target.y = canvas.bottom_margin - h + offset.y;
            guides.bottom = true;
        }
    }

    if target != anchor {
        log::trace!("drag snap {anchor:?} -> {target:?} ({guides:?})");
        node.set_position(target);
    }
    guides
}

// ─── Transform ───────────────────────────────────────────────────────────

/// Proximity report for a resize tick. All six tests run independently,
/// so several flags can be set at once. The node is not touched.
pub fn show_guides_during_transform(
    node: &dyn CanvasNode,
    stage: StageConfig,
    config: &SnapConfig,
) -> GuideState {
    guides_for_rect(node.client_rect(), stage, config)
}

/// `show_guides_during_transform` for a bare rendered rect.
pub fn guides_for_rect(b: Rect, stage: StageConfig, config: &SnapConfig) -> GuideState {
    let canvas = CanvasMetrics::new(stage, config);
    let c = b.center();
    GuideState {
        left: canvas.is_near(b.x0, canvas.left_margin),
        top: canvas.is_near(b.y0, canvas.top_margin),
        right: canvas.is_near(b.x1, canvas.right_margin),
        bottom: canvas.is_near(b.y1, canvas.bottom_margin),
        vertical: canvas.is_near(c.x, canvas.center.x),
        horizontal: canvas.is_near(c.y, canvas.center.y),
    }
}

/// Cap a proposed size so its trailing edges stay on the canvas, measured
/// from the node's rendered top-left.
pub fn constrain_to_canvas(node: &dyn CanvasNode, proposed: Size, stage: StageConfig) -> Size {
    let origin = node.client_rect().origin();
    Size::new(
        proposed.width.min(stage.width - origin.x),
        proposed.height.min(stage.height - origin.y),
    )
}

// ─── Presentation ────────────────────────────────────────────────────────

/// A dashed guide line ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub kind: GuideKind,
    pub line: Line,
    pub stroke: &'static str,
    pub stroke_width: f64,
    pub dash: [f64; 2],
}

pub fn guide_line(kind: GuideKind, canvas: &CanvasMetrics) -> GuideLine {
    let (w, h) = (canvas.width, canvas.height);
    let (p0, p1) = match kind {
        GuideKind::Horizontal => ((0.0, canvas.center.y), (w, canvas.center.y)),
        GuideKind::Vertical => ((canvas.center.x, 0.0), (canvas.center.x, h)),
        GuideKind::Left => ((canvas.left_margin, 0.0), (canvas.left_margin, h)),
        GuideKind::Right => ((canvas.right_margin, 0.0), (canvas.right_margin, h)),
        GuideKind::Top => ((0.0, canvas.top_margin), (w, canvas.top_margin)),
        GuideKind::Bottom => ((0.0, canvas.bottom_margin), (w, canvas.bottom_margin)),
    };
    GuideLine {
        kind,
        line: Line::new(p0, p1),
        stroke: if kind.is_center() {
            CENTER_GUIDE_COLOR
        } else {
            MARGIN_GUIDE_COLOR
        },
        stroke_width: 1.0,
        dash: [4.0, 4.0],
    }
}

/// All six guide lines, in `GuideKind::ALL` order.
pub fn guide_lines(stage: StageConfig, config: &SnapConfig) -> [GuideLine; 6] {
    let canvas = CanvasMetrics::new(stage, config);
    GuideKind::ALL.map(|kind| guide_line(kind, &canvas))
}
