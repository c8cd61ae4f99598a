//! Error type for the few fallible entry points.
//!
//! Geometry and document operations never fail: missing items degrade to
//! no-ops. Errors only arise when parsing tags that come from outside the
//! engine (toolbar strings, key names) or when validating a canvas size.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StagekitError {
    #[error("unknown item kind `{0}`")]
    UnknownItemKind(String),

    #[error("invalid stage size {width}x{height}: both sides must be finite and positive")]
    InvalidStageSize { width: f64, height: f64 },

    #[error("unknown alignment `{0}`")]
    UnknownAlignment(String),

    #[error("unknown layer order direction `{0}`")]
    UnknownLayerDirection(String),

    #[error("unknown arrow key `{0}`")]
    UnknownArrowKey(String),
}

pub type Result<T> = std::result::Result<T, StagekitError>;
