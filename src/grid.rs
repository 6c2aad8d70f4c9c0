use crate::config::DEFAULT_GRID_DIMENSION;
use crate::input::Direction;

/// Side length of the square, toroidal play grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GridSize {
    dimension: u16,
}

impl GridSize {
    /// Creates a square grid with `dimension` cells per side.
    ///
    /// A zero dimension is bumped to one so every grid has at least one cell.
    #[must_use]
    pub const fn square(dimension: u16) -> Self {
        Self {
            dimension: if dimension == 0 { 1 } else { dimension },
        }
    }

    #[must_use]
    pub const fn dimension(self) -> u16 {
        self.dimension
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.dimension) * usize::from(self.dimension)
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = GridPosition> {
        let dimension = self.dimension;
        (0..dimension).flat_map(move |y| (0..dimension).map(move |x| GridPosition::new(x, y)))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(DEFAULT_GRID_DIMENSION)
    }
}

/// Immutable cell coordinate on the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GridPosition {
    x: u16,
    y: u16,
}

impl GridPosition {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> u16 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> u16 {
        self.y
    }

    /// Returns true when the position lies inside the grid.
    #[must_use]
    pub fn is_within(self, grid: GridSize) -> bool {
        self.x < grid.dimension && self.y < grid.dimension
    }

    /// Returns the neighbouring cell in `direction`, wrapping at the edges.
    ///
    /// Stepping below zero lands on `N - 1`; stepping past `N - 1` lands on zero.
    #[must_use]
    pub fn moved(self, direction: Direction, grid: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        let bound = i32::from(grid.dimension);

        Self {
            x: wrap_axis(i32::from(self.x) + dx, bound),
            y: wrap_axis(i32::from(self.y) + dy, bound),
        }
    }
}

impl From<(u16, u16)> for GridPosition {
    fn from((x, y): (u16, u16)) -> Self {
        Self::new(x, y)
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> u16 {
    // rem_euclid keeps the result in 0..upper_bound, which always fits in u16.
    u16::try_from(value.rem_euclid(upper_bound)).unwrap_or(0)
}
