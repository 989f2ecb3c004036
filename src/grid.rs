use serde::{Deserialize, Serialize};

/// Grid position in logical cell coordinates (`x` is the column, `y` the row).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by one cell along `(dx, dy)`.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when `other` is exactly one cell away along a single axis.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// Logical grid dimensions.
///
/// Walls sit just outside the grid: any position failing [`GridSize::contains`]
/// is a wall cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Returns the cell nearest the middle of the grid.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Iterates every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }

    /// Returns true when the grid has no cells at all.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{GridSize, Position};

    #[test]
    fn contains_accepts_only_in_range_cells() {
        let bounds = GridSize::new(10, 8);

        assert!(bounds.contains(Position::new(0, 0)));
        assert!(bounds.contains(Position::new(9, 7)));
        assert!(!bounds.contains(Position::new(10, 7)));
        assert!(!bounds.contains(Position::new(9, 8)));
        assert!(!bounds.contains(Position::new(-1, 3)));
        assert!(!bounds.contains(Position::new(3, -1)));
    }

    #[test]
    fn cells_visits_every_position_once() {
        let bounds = GridSize::new(4, 3);
        let cells: Vec<_> = bounds.cells().collect();

        assert_eq!(cells.len(), bounds.total_cells());
        assert_eq!(cells.first(), Some(&Position::new(0, 0)));
        assert_eq!(cells.last(), Some(&Position::new(3, 2)));
        assert!(cells.iter().all(|cell| bounds.contains(*cell)));
    }

    #[test]
    fn adjacency_is_single_axis_unit_step() {
        let origin = Position::new(5, 5);

        assert!(origin.is_adjacent(Position::new(5, 6)));
        assert!(origin.is_adjacent(Position::new(4, 5)));
        assert!(!origin.is_adjacent(Position::new(6, 6)));
        assert!(!origin.is_adjacent(Position::new(5, 7)));
        assert!(!origin.is_adjacent(origin));
    }
}
