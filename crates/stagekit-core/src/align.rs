//! Canvas alignment and arrow-key nudging.

use crate::error::{Result, StagekitError};
use crate::model::StageConfig;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which canvas edge or center line to align the rendered box with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentDirection {
    Left,
    Right,
    Top,
    Bottom,
    /// Center horizontally.
    CenterH,
    /// Center vertically.
    CenterV,
}

impl FromStr for AlignmentDirection {
    type Err = StagekitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "center-h" => Ok(Self::CenterH),
            "center-v" => Ok(Self::CenterV),
            _ => Err(StagekitError::UnknownAlignment(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowDirection {
    #[serde(rename = "ArrowUp")]
    Up,
    #[serde(rename = "ArrowDown")]
    Down,
    #[serde(rename = "ArrowLeft")]
    Left,
    #[serde(rename = "ArrowRight")]
    Right,
}

impl FromStr for ArrowDirection {
    type Err = StagekitError;

    /// Parses DOM-style key names (`ArrowUp`, ...).
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ArrowUp" => Ok(Self::Up),
            "ArrowDown" => Ok(Self::Down),
            "ArrowLeft" => Ok(Self::Left),
            "ArrowRight" => Ok(Self::Right),
            _ => Err(StagekitError::UnknownArrowKey(s.to_string())),
        }
    }
}

/// Position that puts the rendered box `client` flush with the requested
/// canvas edge or center. `position` is the logical anchor the box was
/// measured at; only the aligned axis changes.
pub fn align_position(
    direction: AlignmentDirection,
    client: Rect,
    position: Point,
    stage: StageConfig,
) -> Point {
    let offset = position - client.origin();
    let (w, h) = (client.width(), client.height());
    let mut p = position;
    match direction {
        AlignmentDirection::Left => p.x = offset.x,
        AlignmentDirection::Right => p.x = stage.width - w + offset.x,
        AlignmentDirection::Top => p.y = offset.y,
        AlignmentDirection::Bottom => p.y = stage.height - h + offset.y,
        AlignmentDirection::CenterH => p.x = (stage.width - w) / 2.0 + offset.x,
        AlignmentDirection::CenterV => p.y = (stage.height - h) / 2.0 + offset.y,
    }
    p
}

pub fn nudge_delta(direction: ArrowDirection, amount: f64) -> Vec2 {
    match direction {
        ArrowDirection::Up => Vec2::new(0.0, -amount),
        ArrowDirection::Down => Vec2::new(0.0, amount),
        ArrowDirection::Left => Vec2::new(-amount, 0.0),
        ArrowDirection::Right => Vec2::new(amount, 0.0),
    }
}
