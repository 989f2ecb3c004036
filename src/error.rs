use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::{GridSize, Position};
use crate::input::Direction;

/// A starting layout or grid that the simulation refuses to run with.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum SetupError {
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error("snake must have at least one segment")]
    EmptyBody,

    #[error("segment {index} is not adjacent to the next one: {from:?} -> {to:?}")]
    NotContiguous {
        index: usize,
        from: Position,
        to: Position,
    },

    #[error("segment {0:?} appears more than once")]
    DuplicateSegment(Position),

    #[error("heading {0:?} points the head straight into the body")]
    HeadingIntoBody(Direction),

    #[error("{position:?} lies outside the {}x{} grid", .bounds.width, .bounds.height)]
    OutOfBounds { position: Position, bounds: GridSize },

    #[error("food at {0:?} overlaps the snake")]
    FoodOnSnake(Position),

    #[error("starting length must be at least 1")]
    ZeroLength,

    #[error("growth per food must be at least 1")]
    ZeroGrowth,

    #[error("tick intervals must be at least 1 ms, got base {base_ms} ms and minimum {min_ms} ms")]
    ZeroInterval { base_ms: u64, min_ms: u64 },
}

/// Raised by the placer when every cell is covered by the snake.
#[derive(Debug, Clone, Copy, Error, Eq, PartialEq)]
#[error("no free cell left on the {}x{} board", .bounds.width, .bounds.height)]
pub struct BoardFull {
    pub bounds: GridSize,
}

/// Failure while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(#[from] SetupError),
}
