use std::collections::{HashSet, VecDeque};

use crate::error::SetupError;
use crate::grid::Position;
use crate::input::Direction;

/// Ordered snake body, current heading and pending growth.
///
/// The front of `body` is the head. The body is only ever changed by
/// [`Snake::advance`], which keeps segments unique as long as the caller
/// checked the move with [`crate::collision::classify`] first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Direction,
    pending_growth: u32,
}

impl Snake {
    /// Creates a snake from explicit body segments (first is head).
    ///
    /// Rejects empty bodies, gaps between consecutive segments, repeated
    /// cells, and a heading that would drive the head into its own neck.
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Result<Self, SetupError> {
        let Some(&head) = segments.first() else {
            return Err(SetupError::EmptyBody);
        };

        for (index, pair) in segments.windows(2).enumerate() {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(SetupError::NotContiguous {
                    index,
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        let mut seen = HashSet::with_capacity(segments.len());
        for segment in &segments {
            if !seen.insert(*segment) {
                return Err(SetupError::DuplicateSegment(*segment));
            }
        }

        if segments.get(1) == Some(&head.offset(heading.delta())) {
            return Err(SetupError::HeadingIntoBody(heading));
        }

        Ok(Self {
            body: VecDeque::from(segments),
            heading,
            pending_growth: 0,
        })
    }

    /// Creates a straight snake of `length` cells trailing behind `head`.
    pub fn straight(head: Position, heading: Direction, length: usize) -> Result<Self, SetupError> {
        if length == 0 {
            return Err(SetupError::ZeroLength);
        }

        let back = heading.opposite().delta();
        let segments = std::iter::successors(Some(head), |segment| Some(segment.offset(back)))
            .take(length)
            .collect();

        Self::from_segments(segments, heading)
    }

    /// Returns the cell the head would move to when stepping in `direction`.
    #[must_use]
    pub fn propose_next_head(&self, direction: Direction) -> Position {
        self.head().offset(direction.delta())
    }

    /// Moves the head to `new_head`, keeping the tail while growth is owed.
    pub fn advance(&mut self, new_head: Position) {
        self.body.push_front(new_head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Sets the heading for the step about to be taken.
    pub fn turn(&mut self, heading: Direction) {
        self.heading = heading;
    }

    /// Queues `segments` cells of growth, consumed one per step.
    pub fn feed(&mut self, segments: u32) {
        self.pending_growth = self.pending_growth.saturating_add(segments);
    }

    /// Returns true when the next step keeps the tail in place.
    #[must_use]
    pub fn is_growing(&self) -> bool {
        self.pending_growth > 0
    }

    #[must_use]
    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // `from_segments` rejects empty bodies and `advance` never shrinks.
        self.body[0]
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns every occupied cell.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the heading of the most recent step.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}
