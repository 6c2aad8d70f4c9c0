use rand::Rng;

use crate::grid::{GridPosition, GridSize};

/// The single food cell currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: GridPosition,
}

impl Food {
    /// Creates food at `position`.
    #[must_use]
    pub fn at(position: GridPosition) -> Self {
        Self { position }
    }

    /// Places food on a uniformly random cell of the grid.
    ///
    /// Occupancy is not checked, so food may land under the snake.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: GridSize) -> Self {
        Self::at(spawn_position(rng, grid))
    }
}

/// Picks x and y independently and uniformly in `0..N`.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: GridSize) -> GridPosition {
    let dimension = grid.dimension();
    GridPosition::new(rng.gen_range(0..dimension), rng.gen_range(0..dimension))
}
