//! How the canvas is scaled into its on-screen container.

use crate::model::StageConfig;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Space kept free around the canvas in fit mode, both sides combined.
pub const VIEW_PADDING: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Shrink to the container, never enlarge.
    #[default]
    Fit,
    /// One canvas pixel per screen pixel.
    Actual,
}

impl ViewMode {
    /// Display scale of the canvas inside `container`.
    ///
    /// An unmeasured container (zero width) renders at 1. Degenerate
    /// stage sizes or a container smaller than the padding never produce
    /// a non-finite or non-positive scale.
    pub fn fit_scale(self, container: Size, stage: StageConfig) -> f64 {
        if self == ViewMode::Actual || container.width == 0.0 {
            return 1.0;
        }
        if stage.width <= 0.0 || stage.height <= 0.0 {
            return 1.0;
        }
        let sx = (container.width - VIEW_PADDING) / stage.width;
        let sy = (container.height - VIEW_PADDING) / stage.height;
        let scale = sx.min(sy).min(1.0);
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        }
    }

    /// Size of the scaled canvas wrapper.
    pub fn display_size(self, container: Size, stage: StageConfig) -> Size {
        let s = self.fit_scale(container, stage);
        Size::new(stage.width * s, stage.height * s)
    }
}
