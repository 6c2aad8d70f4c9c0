use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::style::Color;

use crate::food::Food;
use crate::grid::{GridPosition, GridSize};
use crate::snake::{MoveOutcome, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    /// The snake ran into itself; permanent for the session.
    Lost,
}

/// What happened during one [`GameState::advance`] call.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickResult {
    pub moved: bool,
    pub ate: bool,
    pub lost: bool,
}

/// Read-only view of the state handed to renderers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub grid: GridSize,
    /// Snake cells in tail-to-head order.
    pub cells: Vec<GridPosition>,
    pub snake_color: Color,
    pub food: GridPosition,
    pub score: u32,
    pub terminal: bool,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    score: u32,
    status: GameStatus,
    grid: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh session seeded from system entropy.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(grid: GridSize, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::spawn(&mut rng);
        let food = Food::spawn(&mut rng, grid);

        Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Playing,
            grid,
            rng,
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Does nothing once the session is lost.
    pub fn advance(&mut self) -> TickResult {
        if self.is_terminal() {
            return TickResult::default();
        }

        if self.snake.advance_move(self.grid) == MoveOutcome::SelfCollision {
            self.status = GameStatus::Lost;
            tracing::info!(
                score = self.score,
                length = self.snake.len(),
                "snake collided with itself"
            );
            return TickResult {
                moved: false,
                ate: false,
                lost: true,
            };
        }

        let ate = self.snake.head() == self.food.position;
        if ate {
            self.score += 1;
            self.snake.elongate(self.grid, &mut self.rng);
            self.food = Food::spawn(&mut self.rng, self.grid);
            tracing::debug!(
                score = self.score,
                length = self.snake.len(),
                food = ?self.food.position,
                "food eaten"
            );
        }

        TickResult {
            moved: true,
            ate,
            lost: false,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status == GameStatus::Lost
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Captures the drawable state without mutating anything.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            cells: self.snake.cells().collect(),
            snake_color: self.snake.color(),
            food: self.food.position,
            score: self.score,
            terminal: self.is_terminal(),
        }
    }
}
