use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SetupError};
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::snake::Snake;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 15;

/// Default starting snake length.
pub const DEFAULT_START_LENGTH: usize = 3;

/// Score granted per food eaten.
pub const DEFAULT_POINTS_PER_FOOD: u32 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Interval reduction per speed level in milliseconds.
pub const TICK_INTERVAL_STEP_MS: u64 = 5;

/// Complete set of named constants a session is built from.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub start: StartConfig,
    pub points_per_food: u32,
    /// Segments added per food eaten, one per tick.
    pub growth_per_food: u32,
    pub speed: SpeedConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT),
            start: StartConfig::default(),
            points_per_food: DEFAULT_POINTS_PER_FOOD,
            growth_per_food: 1,
            speed: SpeedConfig::default(),
        }
    }
}

impl GameConfig {
    /// Creates the default configuration on a custom grid.
    #[must_use]
    pub fn with_grid(width: u16, height: u16) -> Self {
        Self {
            grid: GridSize::new(width, height),
            ..Self::default()
        }
    }

    /// Reads a JSON config file; missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that the grid is usable, the starting snake fits inside it,
    /// every food grows the snake and every speed level has a non-zero interval.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.growth_per_food == 0 {
            return Err(SetupError::ZeroGrowth);
        }
        if self.speed.base_interval_ms == 0 || self.speed.min_interval_ms == 0 {
            return Err(SetupError::ZeroInterval {
                base_ms: self.speed.base_interval_ms,
                min_ms: self.speed.min_interval_ms,
            });
        }

        self.starting_snake().map(|_| ())
    }

    /// Builds the canonical starting snake for this configuration.
    pub fn starting_snake(&self) -> Result<Snake, SetupError> {
        if self.grid.is_empty() {
            return Err(SetupError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        let head = self.start.head.unwrap_or_else(|| self.grid.center());
        let snake = Snake::straight(head, self.start.heading, self.start.length)?;

        if let Some(outside) = snake.segments().find(|segment| !self.grid.contains(**segment)) {
            return Err(SetupError::OutOfBounds {
                position: *outside,
                bounds: self.grid,
            });
        }

        Ok(snake)
    }
}

/// Starting layout: a straight body trailing behind `head`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    pub length: usize,
    pub heading: Direction,
    /// Head cell; `None` places it at the grid centre.
    pub head: Option<Position>,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_START_LENGTH,
            heading: Direction::Right,
            head: None,
        }
    }
}

/// Speed tiers handed to the scheduler; the session never reads them.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub base_interval_ms: u64,
    pub min_interval_ms: u64,
    pub step_ms: u64,
    pub foods_per_level: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            min_interval_ms: MIN_TICK_INTERVAL_MS,
            step_ms: TICK_INTERVAL_STEP_MS,
            foods_per_level: 1,
        }
    }
}

impl SpeedConfig {
    /// Returns the tick interval for a 1-based speed level.
    #[must_use]
    pub fn interval_for_level(self, level: u32) -> Duration {
        let penalty_ms = u64::from(level.saturating_sub(1)).saturating_mul(self.step_ms);
        let clamped_ms = self
            .base_interval_ms
            .saturating_sub(penalty_ms)
            .max(self.min_interval_ms.min(self.base_interval_ms));
        Duration::from_millis(clamped_ms)
    }
}
