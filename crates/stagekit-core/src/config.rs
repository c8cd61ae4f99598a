//! Canvas configuration: snapping tolerances, rotation snap angles, and
//! per-kind creation defaults.
//!
//! Every value here is a plain constant in the editor UI; grouping them in
//! `CanvasConfig` lets a host override e.g. the snap distance without
//! touching the engines.

use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Top-level configuration shared by the engines and the document factory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasConfig {
    pub size: SizeLimits,
    pub snap: SnapConfig,
    pub rotation: RotationConfig,
    pub text: TextDefaults,
    pub image: ImageDefaults,
    pub shape: ShapeDefaults,
    pub colors: DefaultColors,
}

/// Allowed canvas side lengths, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeLimits {
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            default: 800.0,
            min: 100.0,
            max: 2000.0,
        }
    }
}

impl SizeLimits {
    /// Clamp a requested side length into `[min, max]`.
    /// Non-finite requests fall back to `default`.
    pub fn clamp(&self, side: f64) -> f64 {
        if !side.is_finite() {
            return self.default;
        }
        side.clamp(self.min, self.max)
    }
}

/// Drag snapping against canvas center lines and margin lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapConfig {
    /// Distance (exclusive) at which a shape edge or center snaps to a guide.
    pub threshold: f64,
    /// Inset of the margin guide lines from each canvas edge.
    pub edge_margin: f64,
    /// Shapes wider (taller) than this fraction of the usable width (height)
    /// are never snapped on that axis.
    pub oversize_ratio: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            edge_margin: 20.0,
            oversize_ratio: 0.8,
        }
    }
}

/// Rotation snapping while the snap modifier is held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationConfig {
    /// Candidate angles in degrees, scanned in order.
    pub snap_angles: Vec<f64>,
    /// Maximum distance (exclusive) in degrees to the nearest candidate.
    pub snap_threshold: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            snap_angles: vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0, 360.0],
            snap_threshold: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDefaults {
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub default_font_size: f64,
    pub min_width: f64,
    pub default_width: f64,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            min_font_size: 12.0,
            max_font_size: 200.0,
            default_font_size: 48.0,
            min_width: 50.0,
            default_width: 300.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDefaults {
    /// Imported images are scaled down so neither side exceeds this.
    pub max_initial_size: f64,
    pub min_size: f64,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            max_initial_size: 300.0,
            min_size: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDefaults {
    pub min_size: f64,
    pub default_stroke_width: f64,
    pub default_line_length: f64,
    pub line_hit_stroke_width: f64,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            min_size: 10.0,
            default_stroke_width: 2.0,
            default_line_length: 200.0,
            line_hit_stroke_width: 20.0,
        }
    }
}

/// CSS colors given to newly created items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultColors {
    pub text: String,
    pub line: String,
    pub rect_fill: String,
    pub rect_stroke: String,
    pub circle_fill: String,
    pub circle_stroke: String,
}

impl Default for DefaultColors {
    fn default() -> Self {
        Self {
            text: "#000000".into(),
            line: "#000000".into(),
            rect_fill: "#3b82f6".into(),
            rect_stroke: "#1e40af".into(),
            circle_fill: "#10b981".into(),
            circle_stroke: "#047857".into(),
        }
    }
}

// ─── Presets ──────────────────────────────────────────────────────────────

/// A named canvas size offered in the size picker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasSizePreset {
    pub width: f64,
    pub height: f64,
    pub label: &'static str,
    pub tooltip: &'static str,
}

pub const CANVAS_SIZE_PRESETS: [CanvasSizePreset; 6] = [
    CanvasSizePreset { width: 800.0, height: 800.0, label: "800×800", tooltip: "Default" },
    CanvasSizePreset { width: 1080.0, height: 1080.0, label: "1080×1080", tooltip: "Instagram Square" },
    CanvasSizePreset { width: 1080.0, height: 1920.0, label: "1080×1920", tooltip: "Instagram Story / Reels" },
    CanvasSizePreset { width: 1920.0, height: 1080.0, label: "1920×1080", tooltip: "YouTube Thumbnail / HD" },
    CanvasSizePreset { width: 1200.0, height: 628.0, label: "1200×628", tooltip: "Facebook / LinkedIn Post" },
    CanvasSizePreset { width: 1200.0, height: 675.0, label: "1200×675", tooltip: "Twitter Post" },
];

pub const FONT_FAMILIES: [&str; 7] = [
    "Arial",
    "Helvetica",
    "Times New Roman",
    "Courier New",
    "Georgia",
    "Verdana",
    "Impact",
];
