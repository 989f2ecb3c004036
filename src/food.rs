use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::BoardFull;
use crate::grid::{GridSize, Position};

/// Random picks tried before falling back to the free-cell list.
const RANDOM_ATTEMPTS: usize = 16;

/// Food type; only one variant exists today.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    /// Creates a normal food at `position`.
    #[must_use]
    pub fn normal(position: Position) -> Self {
        Self {
            position,
            kind: FoodKind::Normal,
        }
    }

    /// Spawns regular food in an unoccupied cell.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        occupied: &HashSet<Position>,
    ) -> Result<Self, BoardFull> {
        spawn_position(rng, bounds, occupied).map(Self::normal)
    }
}

/// Picks a uniformly random cell not contained in `occupied`.
///
/// A few blind picks cover the common sparse board; after that the free
/// cells are enumerated so the search always terminates.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Position>,
) -> Result<Position, BoardFull> {
    let total = bounds.total_cells();
    let free = total.saturating_sub(occupied.iter().filter(|cell| bounds.contains(**cell)).count());
    if free == 0 {
        return Err(BoardFull { bounds });
    }

    for _ in 0..RANDOM_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    let candidates: Vec<Position> = bounds
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();

    candidates
        .choose(rng)
        .copied()
        .ok_or(BoardFull { bounds })
}
