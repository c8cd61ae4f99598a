//! Canvas background: a solid color or a multi-stop linear gradient.

use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};
use stagekit_core::StageConfig;

pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const MAX_GRADIENT_STOPS: usize = 5;
pub const MIN_GRADIENT_STOPS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Solid,
    Gradient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: String,
    /// Percent along the gradient line, 0..=100.
    pub position: f64,
}

impl GradientStop {
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self {
            color: color.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub kind: BackgroundKind,
    pub color: String,
    pub gradient_stops: Vec<GradientStop>,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Solid,
            color: DEFAULT_BACKGROUND_COLOR.into(),
            gradient_stops: vec![
                GradientStop::new("#667eea", 0.0),
                GradientStop::new("#764ba2", 100.0),
            ],
        }
    }
}

impl Background {
    pub fn set_kind(&mut self, kind: BackgroundKind) {
        self.kind = kind;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Append a white stop at 50%. Returns false at the stop limit.
    pub fn add_gradient_stop(&mut self) -> bool {
        if self.gradient_stops.len() >= MAX_GRADIENT_STOPS {
            return false;
        }
        self.gradient_stops
            .push(GradientStop::new(DEFAULT_BACKGROUND_COLOR, 50.0));
        true
    }

    /// Remove the stop at `index`. A gradient never drops below two stops.
    pub fn remove_gradient_stop(&mut self, index: usize) -> bool {
        if self.gradient_stops.len() <= MIN_GRADIENT_STOPS || index >= self.gradient_stops.len() {
            return false;
        }
        self.gradient_stops.remove(index);
        true
    }

    /// Update the present fields of stop `index`. Missing index is a no-op.
    pub fn update_gradient_stop(
        &mut self,
        index: usize,
        color: Option<String>,
        position: Option<f64>,
    ) -> bool {
        let Some(stop) = self.gradient_stops.get_mut(index) else {
            return false;
        };
        if let Some(color) = color {
            stop.color = color;
        }
        if let Some(position) = position.filter(|p| p.is_finite()) {
            stop.position = position;
        }
        true
    }

    fn sorted_stops(&self) -> Vec<&GradientStop> {
        let mut stops: Vec<&GradientStop> = self.gradient_stops.iter().collect();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        stops
    }

    /// CSS value for UI swatches.
    pub fn preview_css(&self) -> String {
        match self.kind {
            BackgroundKind::Solid => self.color.clone(),
            BackgroundKind::Gradient => {
                let stops: Vec<String> = self
                    .sorted_stops()
                    .iter()
                    .map(|s| format!("{} {}%", s.color, s.position))
                    .collect();
                format!("linear-gradient(135deg, {})", stops.join(", "))
            }
        }
    }

    /// Renderer color stops as `(offset 0..=1, color)`, sorted by offset.
    pub fn color_stops(&self) -> Vec<(f64, &str)> {
        self.sorted_stops()
            .into_iter()
            .map(|s| (s.position / 100.0, s.color.as_str()))
            .collect()
    }

    /// The gradient runs corner to corner across the canvas.
    pub fn gradient_line(stage: StageConfig) -> Line {
        Line::new(Point::ORIGIN, Point::new(stage.width, stage.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let bg = Background::default();
        assert_eq!(bg.kind, BackgroundKind::Solid);
        assert_eq!(bg.preview_css(), "#ffffff");
        assert_eq!(bg.gradient_stops.len(), 2);
    }

    #[test]
    fn stop_count_is_bounded() {
        let mut bg = Background::default();
        for _ in 0..3 {
            assert!(bg.add_gradient_stop());
        }
        assert!(!bg.add_gradient_stop());
        assert_eq!(bg.gradient_stops.len(), 5);

        for _ in 0..3 {
            assert!(bg.remove_gradient_stop(0));
        }
        assert!(!bg.remove_gradient_stop(0));
        assert_eq!(bg.gradient_stops.len(), 2);
    }

    #[test]
    fn update_missing_stop_is_noop() {
        let mut bg = Background::default();
        let before = bg.clone();
        assert!(!bg.update_gradient_stop(7, Some("#000".into()), Some(10.0)));
        assert_eq!(bg, before);
        assert!(bg.update_gradient_stop(1, None, Some(40.0)));
        assert_eq!(bg.gradient_stops[1], GradientStop::new("#764ba2", 40.0));
    }

    #[test]
    fn gradient_preview_sorts_by_position() {
        let mut bg = Background::default();
        bg.set_kind(BackgroundKind::Gradient);
        bg.add_gradient_stop();
        bg.update_gradient_stop(0, None, Some(75.0));
        assert_eq!(
            bg.preview_css(),
            "linear-gradient(135deg, #ffffff 50%, #667eea 75%, #764ba2 100%)"
        );
        assert_eq!(
            bg.color_stops(),
            vec![(0.5, "#ffffff"), (0.75, "#667eea"), (1.0, "#764ba2")]
        );
    }
}
