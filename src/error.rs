use std::io;

use crate::engine::{Coord, Tile};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("board dimension must be at least 2, got {0}")]
    Dimension(usize),
    #[error("win threshold must be at least 8, got {0}")]
    Threshold(Tile),
    #[error("move queue capacity must be at least 1")]
    QueueCapacity,
}

#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("cell {at:?} is outside a {dimension}x{dimension} board")]
    OutOfBounds { at: Coord, dimension: usize },
    #[error("cannot replay onto a {0}x{0} board (need at least 2)")]
    Dimension(usize),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction {0:?} (expected up/down/left/right or w/a/s/d)")]
pub struct ParseDirectionError(pub String);
