use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use snake::config::GameConfig;
use snake::game::{GameSession, Phase};
use snake::grid::Position;
use snake::input::Direction;
use snake::score::MemoryScoreStore;
use snake::snake::Snake;

fn straight(head: (i32, i32), heading: Direction, length: usize) -> Snake {
    Snake::straight(Position::new(head.0, head.1), heading, length).expect("valid snake")
}

#[test]
fn new_best_is_saved_once_and_lower_runs_save_nothing() {
    let config = GameConfig {
        points_per_food: 30,
        ..GameConfig::with_grid(10, 10)
    };
    let mut store = MemoryScoreStore::default();

    {
        let mut state = GameSession::new_with_seed(config.clone(), &mut store, 5)
            .expect("config should be valid");
        state
            .start_from(straight((8, 5), Direction::Right, 2), Position::new(9, 5))
            .expect("layout should be valid");

        assert!(state.tick().ate_food);
        let outcome = state.tick();
        assert_eq!(outcome.phase, Phase::GameOver);
        assert_eq!(outcome.score, 30);
        assert_eq!(state.best_score(), 30);

        // Further ticks after the run ended must not save again.
        state.tick();
        state.pause();
    }
    assert_eq!(store.saves(), &[30]);

    {
        let mut state = GameSession::new_with_seed(config, &mut store, 6)
            .expect("config should be valid");
        assert_eq!(state.best_score(), 30);
        state
            .start_from(straight((9, 5), Direction::Right, 2), Position::new(0, 0))
            .expect("layout should be valid");

        let outcome = state.tick();
        assert_eq!(outcome.phase, Phase::GameOver);
        assert_eq!(outcome.score, 0);
        assert_eq!(state.best_score(), 30);
    }
    assert_eq!(store.saves(), &[30]);
}

#[test]
fn equal_score_is_not_a_new_best() {
    let config = GameConfig {
        points_per_food: 30,
        ..GameConfig::with_grid(10, 10)
    };
    let mut state = GameSession::new_with_seed(config, MemoryScoreStore::with_best(30), 8)
        .expect("config should be valid");
    state
        .start_from(straight((8, 5), Direction::Right, 2), Position::new(9, 5))
        .expect("layout should be valid");

    state.tick();
    state.tick();

    assert_eq!(state.phase(), Phase::GameOver);
    assert!(state.store().saves().is_empty());
}

#[test]
fn restarted_runs_in_one_session_keep_the_best() {
    let config = GameConfig {
        points_per_food: 30,
        ..GameConfig::with_grid(10, 10)
    };
    let mut state = GameSession::new_with_seed(config, MemoryScoreStore::default(), 4)
        .expect("config should be valid");
    state
        .start_from(straight((8, 5), Direction::Right, 2), Position::new(9, 5))
        .expect("layout should be valid");
    state.tick();
    state.tick();
    assert_eq!(state.phase(), Phase::GameOver);

    state.restart();

    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.score(), 0);
    assert_eq!(state.best_score(), 30);
    assert_eq!(state.store().saves(), &[30]);
}

#[test]
fn random_play_keeps_every_invariant() {
    let mut driver = StdRng::seed_from_u64(2024);

    for seed in 0..20 {
        let mut state = GameSession::new_with_seed(
            GameConfig::with_grid(8, 6),
            MemoryScoreStore::default(),
            seed,
        )
        .expect("config should be valid");
        state.start();

        for _ in 0..400 {
            let heading = state.snake().heading();
            let requested = *Direction::ALL.choose(&mut driver).expect("four directions");
            state.request_direction(requested);
            if requested == heading.opposite() {
                assert_ne!(state.pending_direction(), Some(requested));
            }

            let length = state.snake().len();
            let score = state.score();
            let outcome = state.tick();

            match outcome.phase {
                Phase::Running => {
                    if outcome.ate_food {
                        assert_eq!(state.snake().len(), length + 1);
                        assert_eq!(outcome.score, score + 10);
                    } else {
                        assert_eq!(state.snake().len(), length);
                        assert_eq!(outcome.score, score);
                    }

                    let food = outcome.food.expect("running game always has food");
                    assert!(!outcome.snake.contains(&food));
                    assert!(state.bounds().contains(food));

                    let unique: std::collections::HashSet<_> = outcome.snake.iter().collect();
                    assert_eq!(unique.len(), outcome.snake.len());
                    assert!(outcome.snake.iter().all(|cell| state.bounds().contains(*cell)));
                }
                Phase::GameOver | Phase::Victory => {
                    assert!(outcome.score >= score);
                    state.start();
                }
                Phase::Idle | Phase::Paused => unreachable!("tick never enters {:?}", outcome.phase),
            }
        }
    }
}
