use crate::grid::{GridSize, Position};
use crate::snake::Snake;

/// Classification of a prospective head cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Clear,
    WallHit,
    SelfHit,
}

/// Classifies `candidate` against the walls and the pre-move body.
///
/// When `grows` is false the tail leaves its cell during the same step, so
/// moving into the current tail cell is allowed.
#[must_use]
pub fn classify(candidate: Position, bounds: GridSize, snake: &Snake, grows: bool) -> Collision {
    if !bounds.contains(candidate) {
        return Collision::WallHit;
    }

    let checked = if grows { snake.len() } else { snake.len() - 1 };
    if snake.segments().take(checked).any(|segment| *segment == candidate) {
        return Collision::SelfHit;
    }

    Collision::Clear
}

#[cfg(test)]
mod tests {
    use crate::grid::{GridSize, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{classify, Collision};

    const BOUNDS: GridSize = GridSize::new(10, 10);

    fn snake(raw: &[(i32, i32)], heading: Direction) -> Snake {
        let segments = raw.iter().map(|&(x, y)| Position::new(x, y)).collect();
        Snake::from_segments(segments, heading).expect("test layout should be valid")
    }

    #[test]
    fn open_cell_is_clear() {
        let snake = snake(&[(5, 5), (4, 5), (3, 5)], Direction::Right);

        assert_eq!(
            classify(Position::new(6, 5), BOUNDS, &snake, false),
            Collision::Clear
        );
    }

    #[test]
    fn leaving_the_grid_is_a_wall_hit() {
        let snake = snake(&[(9, 5), (8, 5)], Direction::Right);

        assert_eq!(
            classify(Position::new(10, 5), BOUNDS, &snake, false),
            Collision::WallHit
        );
        assert_eq!(
            classify(Position::new(3, -1), BOUNDS, &snake, true),
            Collision::WallHit
        );
    }

    #[test]
    fn body_cell_is_a_self_hit() {
        let snake = snake(&[(5, 5), (5, 6), (6, 6), (6, 5), (6, 4)], Direction::Up);

        assert_eq!(
            classify(Position::new(6, 5), BOUNDS, &snake, false),
            Collision::SelfHit
        );
    }

    #[test]
    fn vacating_tail_cell_is_clear_when_not_growing() {
        let snake = snake(&[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Up);

        assert_eq!(
            classify(Position::new(6, 5), BOUNDS, &snake, false),
            Collision::Clear
        );
    }

    #[test]
    fn tail_cell_is_a_self_hit_when_growing() {
        let snake = snake(&[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Up);

        assert_eq!(
            classify(Position::new(6, 5), BOUNDS, &snake, true),
            Collision::SelfHit
        );
    }
}
