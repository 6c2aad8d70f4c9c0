use std::collections::VecDeque;

use rand::Rng;
use ratatui::style::Color;

use crate::config::{SNAKE_INITIAL_HEADING, SNAKE_ORIGIN};
use crate::grid::{GridPosition, GridSize};
use crate::input::{direction_change_is_valid, Direction};

/// Result of one attempted snake step.
#[must_use]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveOutcome {
    Moved,
    /// The next head cell is already part of the body; nothing changed.
    SelfCollision,
}

impl MoveOutcome {
    #[must_use]
    pub fn is_ok(self) -> bool {
        self == Self::Moved
    }
}

/// Snake body, heading and display color.
///
/// The body is stored tail-first: the front of the deque is the oldest cell
/// and the back is the head. It always holds at least one cell.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<GridPosition>,
    heading: Direction,
    color: Color,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: GridPosition, heading: Direction, color: Color) -> Self {
        let mut body = VecDeque::new();
        body.push_back(start);

        Self {
            body,
            heading,
            color,
        }
    }

    /// Creates the session's starting snake with a random color.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(SNAKE_ORIGIN, SNAKE_INITIAL_HEADING, random_color(rng))
    }

    /// Creates a snake from explicit cells ordered tail first, head last.
    ///
    /// Returns `None` for an empty cell list.
    #[must_use]
    pub fn from_cells(cells: Vec<GridPosition>, heading: Direction) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(cells),
            heading,
            color: Color::Green,
        })
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> GridPosition {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one cell")
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Changes the heading unless `direction` would reverse the snake.
    ///
    /// Returns whether the heading was accepted; reversals are a silent no-op.
    pub fn set_heading(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.heading, direction) {
            return false;
        }

        self.heading = direction;
        true
    }

    /// Steps the head one cell along the heading and drops the tail.
    ///
    /// The collision check runs against the whole body before the tail is
    /// dropped, so stepping into the cell the tail is leaving also collides.
    pub fn advance_move(&mut self, grid: GridSize) -> MoveOutcome {
        let next_head = self.head().moved(self.heading, grid);
        if self.occupies(next_head) {
            return MoveOutcome::SelfCollision;
        }

        self.body.push_back(next_head);
        let _ = self.body.pop_front();
        MoveOutcome::Moved
    }

    /// Grows the body by one cell at the tail end and picks a new color.
    ///
    /// The new cell extends the tail away from the rest of the body. A
    /// one-cell snake grows opposite to its heading.
    pub fn elongate<R: Rng + ?Sized>(&mut self, grid: GridSize, rng: &mut R) {
        self.color = random_color(rng);

        let tail = self.body[0];
        let extension = self.tail_orientation(grid).opposite();
        self.body.push_front(tail.moved(extension, grid));
    }

    /// Direction pointing from the tail cell towards the next-oldest cell.
    fn tail_orientation(&self, grid: GridSize) -> Direction {
        let (Some(tail), Some(next)) = (self.body.front(), self.body.get(1)) else {
            return self.heading;
        };

        [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ]
        .into_iter()
        .find(|direction| tail.moved(*direction, grid) == *next)
        .unwrap_or(self.heading)
    }

    /// Returns true if any cell occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: GridPosition) -> bool {
        self.body.contains(&position)
    }

    /// Returns current cell count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body cells from tail to head.
    pub fn cells(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.body.iter().copied()
    }
}

/// Picks a random 24-bit display color.
#[must_use]
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let [_, r, g, b] = rng.gen_range(0..0x0100_0000_u32).to_be_bytes();
    Color::Rgb(r, g, b)
}
