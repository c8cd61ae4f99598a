//! Rotation snapping.
//!
//! The host drives `set_snap_engaged` from its modifier key; the engine
//! never listens for input itself.

use crate::config::RotationConfig;

#[derive(Debug, Clone, Default)]
pub struct RotationSnap {
    engaged: bool,
    config: RotationConfig,
}

impl RotationSnap {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            engaged: false,
            config,
        }
    }

    pub fn set_snap_engaged(&mut self, engaged: bool) {
        self.engaged = engaged;
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    /// Snap `angle` (degrees) to the nearest configured angle.
    ///
    /// Identity while disengaged, or when the nearest candidate is not
    /// strictly within `snap_threshold`. Candidates are scanned in order and
    /// only a strictly closer one replaces the current best, so the earlier
    /// angle wins a tie. A result of 360 is reported as 0.
    pub fn snap_rotation(&self, angle: f64) -> f64 {
        if !self.engaged {
            return angle;
        }

        let Some(nearest) = self
            .config
            .snap_angles
            .iter()
            .copied()
            .reduce(|best, a| if (a - angle).abs() < (best - angle).abs() { a } else { best })
        else {
            return angle;
        };

        if (angle - nearest).abs() < self.config.snap_threshold {
            log::trace!("rotation {angle} snapped to {nearest}");
            if nearest == 360.0 { 0.0 } else { nearest }
        } else {
            angle
        }
    }
}
