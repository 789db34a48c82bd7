use thiserror::Error;

use crate::timeline::Unit;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot tween between {from:?} and {to:?} units")]
    UnitMismatch { from: Unit, to: Unit },

    #[error("Invalid keyframe track: {0}")]
    InvalidTrack(String),

    #[error("Section not found: {0}")]
    UnknownSection(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(&'static str),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
