use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::collision::{classify, Collision};
use crate::config::GameConfig;
use crate::error::SetupError;
use crate::food::Food;
use crate::grid::{GridSize, Position};
use crate::input::{direction_change_is_valid, Direction, GameInput};
use crate::score::ScoreStore;
use crate::snake::Snake;

/// Current high-level gameplay phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
    /// The board filled up and no food could be placed.
    Victory,
}

impl Phase {
    /// Returns true for the phases `start()` may leave.
    #[must_use]
    pub fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::GameOver | Self::Victory)
    }
}

/// Reason the most recent run ended in [`Phase::GameOver`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Snapshot returned by [`GameSession::tick`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TickOutcome {
    pub phase: Phase,
    pub score: u32,
    pub ate_food: bool,
    pub death_reason: Option<DeathReason>,
    pub snake: Vec<Position>,
    pub food: Option<Position>,
}

/// One player's game: snake, food, score and phase, plus the best score.
///
/// Drive it by calling [`GameSession::tick`] once per elapsed speed interval;
/// every other call is an input that takes effect immediately or on the next
/// tick. Calls that do not fit the current phase are ignored.
#[derive(Debug)]
pub struct GameSession<S: ScoreStore> {
    config: GameConfig,
    snake: Snake,
    food: Option<Food>,
    score: u32,
    best_score: u32,
    foods_eaten: u32,
    tick_count: u64,
    phase: Phase,
    pending_direction: Option<Direction>,
    death_reason: Option<DeathReason>,
    store: S,
    rng: StdRng,
}

impl<S: ScoreStore> GameSession<S> {
    /// Creates an idle session seeded from system entropy.
    pub fn new(config: GameConfig, store: S) -> Result<Self, SetupError> {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn new_with_seed(config: GameConfig, store: S, seed: u64) -> Result<Self, SetupError> {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, store: S, rng: StdRng) -> Result<Self, SetupError> {
        config.validate()?;
        let snake = config.starting_snake()?;
        let best_score = match store.load_best_score() {
            Ok(best) => best,
            Err(error) => {
                warn!("failed to load best score, starting from 0: {error}");
                0
            }
        };
        debug!(
            "session created on {}x{} grid, best score {best_score}",
            config.grid.width, config.grid.height
        );

        Ok(Self {
            config,
            snake,
            food: None,
            score: 0,
            best_score,
            foods_eaten: 0,
            tick_count: 0,
            phase: Phase::Idle,
            pending_direction: None,
            death_reason: None,
            store,
            rng,
        })
    }

    /// Begins a fresh run from the configured starting layout.
    ///
    /// Ignored unless the session is idle or the previous run has ended.
    pub fn start(&mut self) {
        if !self.phase.can_start() {
            return;
        }

        // The layout was validated when the session was built.
        let Ok(snake) = self.config.starting_snake() else {
            return;
        };
        self.begin_run(snake);

        match Food::spawn(&mut self.rng, self.config.grid, &self.snake.occupied_cells()) {
            Ok(food) => self.food = Some(food),
            Err(full) => {
                info!("{full} at start");
                self.finish(Phase::Victory);
            }
        }
    }

    /// Same as [`GameSession::start`].
    pub fn restart(&mut self) {
        self.start();
    }

    /// Begins a fresh run from a caller-prepared snake and food cell.
    ///
    /// Ignored (returning `Ok`) unless a run may start; rejects layouts that
    /// leave the grid or put food on the snake.
    pub fn start_from(&mut self, snake: Snake, food: Position) -> Result<(), SetupError> {
        if !self.phase.can_start() {
            return Ok(());
        }

        let bounds = self.config.grid;
        if let Some(outside) = snake
            .segments()
            .copied()
            .chain(std::iter::once(food))
            .find(|cell| !bounds.contains(*cell))
        {
            return Err(SetupError::OutOfBounds {
                position: outside,
                bounds,
            });
        }
        if snake.occupies(food) {
            return Err(SetupError::FoodOnSnake(food));
        }

        self.begin_run(snake);
        self.food = Some(Food::normal(food));
        Ok(())
    }

    fn begin_run(&mut self, snake: Snake) {
        self.snake = snake;
        self.food = None;
        self.score = 0;
        self.foods_eaten = 0;
        self.tick_count = 0;
        self.pending_direction = None;
        self.death_reason = None;
        self.phase = Phase::Running;
        info!(
            "run started: length {}, heading {:?}",
            self.snake.len(),
            self.snake.heading()
        );
    }

    /// Pauses a running game; otherwise does nothing.
    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            debug!("paused at tick {}", self.tick_count);
        }
    }

    /// Resumes a paused game; otherwise does nothing.
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
            debug!("resumed at tick {}", self.tick_count);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Buffers the heading for the next tick, last request wins.
    ///
    /// Only accepted while running, and never the exact reverse of the
    /// heading the snake last moved in.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.phase != Phase::Running {
            return;
        }
        if !direction_change_is_valid(self.snake.heading(), direction) {
            return;
        }

        self.pending_direction = Some(direction);
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.request_direction(direction),
            GameInput::Pause => self.pause(),
            GameInput::Resume => self.resume(),
            GameInput::TogglePause => self.toggle_pause(),
            GameInput::Start => self.start(),
            GameInput::Restart => self.restart(),
            GameInput::Quit => {}
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return self.outcome(false);
        }

        self.tick_count += 1;
        if let Some(direction) = self.pending_direction.take() {
            self.snake.turn(direction);
        }

        let next = self.snake.propose_next_head(self.snake.heading());
        let ate_food = self.food.is_some_and(|food| food.position == next);
        let grows = ate_food || self.snake.is_growing();

        match classify(next, self.config.grid, &self.snake, grows) {
            Collision::Clear => {}
            Collision::WallHit => {
                self.death_reason = Some(DeathReason::WallCollision);
                self.finish(Phase::GameOver);
                return self.outcome(false);
            }
            Collision::SelfHit => {
                self.death_reason = Some(DeathReason::SelfCollision);
                self.finish(Phase::GameOver);
                return self.outcome(false);
            }
        }

        if ate_food {
            self.snake.feed(self.config.growth_per_food);
        }
        self.snake.advance(next);

        if ate_food {
            self.score = self.score.saturating_add(self.config.points_per_food);
            self.foods_eaten += 1;
            debug!("food eaten at {next:?}, score {}", self.score);

            match Food::spawn(&mut self.rng, self.config.grid, &self.snake.occupied_cells()) {
                Ok(food) => self.food = Some(food),
                Err(full) => {
                    info!("{full}");
                    self.food = None;
                    self.finish(Phase::Victory);
                }
            }
        }

        self.outcome(ate_food)
    }

    fn finish(&mut self, phase: Phase) {
        self.phase = phase;
        self.pending_direction = None;
        info!(
            "run ended in {phase:?} after {} ticks with score {} ({:?})",
            self.tick_count, self.score, self.death_reason
        );

        if self.score <= self.best_score {
            return;
        }

        self.best_score = self.score;
        if let Err(error) = self.store.save_best_score(self.best_score) {
            warn!("failed to save best score {}: {error}", self.best_score);
        }
    }

    fn outcome(&self, ate_food: bool) -> TickOutcome {
        TickOutcome {
            phase: self.phase,
            score: self.score,
            ate_food,
            death_reason: self.death_reason,
            snake: self.snake_body(),
            food: self.food_position(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Body cells from head to tail.
    #[must_use]
    pub fn snake_body(&self) -> Vec<Position> {
        self.snake.segments().copied().collect()
    }

    #[must_use]
    pub fn food_position(&self) -> Option<Position> {
        self.food.map(|food| food.position)
    }

    /// Heading to draw the head with: the buffered turn if one is waiting.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.pending_direction.unwrap_or(self.snake.heading())
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// 1-based difficulty level derived from foods eaten this run.
    ///
    /// The session never changes its own cadence; the scheduler turns this
    /// into an interval through [`crate::config::SpeedConfig`].
    #[must_use]
    pub fn speed_level(&self) -> u32 {
        1 + self.foods_eaten / self.config.speed.foods_per_level.max(1)
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
