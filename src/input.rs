use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Speed;

/// Canonical movement directions, in the order UP, LEFT, DOWN, RIGHT.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Position of this direction in the UP, LEFT, DOWN, RIGHT cycle.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Left => 1,
            Self::Down => 2,
            Self::Right => 3,
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Two directions are opposite when their ordinals are two steps apart.
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        self.ordinal().abs_diff(other.ordinal()) == 2
    }

    /// Unit step on the grid (`y` grows downward).
    #[must_use]
    pub(crate) const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Right => (1, 0),
        }
    }
}

/// High-level commands delivered by the host to the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Start(Speed),
    /// Start a session at the configured default speed.
    Confirm,
    /// The terminal was resized and the screen must be repainted.
    Redraw,
    Quit,
}

/// Returns whether a heading change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    !current.is_opposite(next)
}

/// Reads keyboard events from the terminal and maps them to [`GameInput`].
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one mapped input event.
    ///
    /// Unmapped keys and other events are consumed and yield `None`.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key_event(key)),
            Event::Resize(..) => Ok(Some(GameInput::Redraw)),
            _ => Ok(None),
        }
    }
}

/// Translates one key event into a game command.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            GameInput::Direction(Direction::Up)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            GameInput::Direction(Direction::Left)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            GameInput::Direction(Direction::Down)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            GameInput::Direction(Direction::Right)
        }
        KeyCode::Char('1') => GameInput::Start(Speed::Slow),
        KeyCode::Char('2') => GameInput::Start(Speed::Medium),
        KeyCode::Char('3') => GameInput::Start(Speed::Fast),
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use crate::config::Speed;

    use super::{direction_change_is_valid, map_key_event, Direction, GameInput};

    const ALL_DIRECTIONS: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn ordinal_rule_matches_opposite_pairs() {
        for a in ALL_DIRECTIONS {
            for b in ALL_DIRECTIONS {
                assert_eq!(a.is_opposite(b), b == a.opposite(), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn direction_change_rejects_reverse() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Down, Direction::Up));
        assert!(!direction_change_is_valid(
            Direction::Left,
            Direction::Right
        ));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Right));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key_event(press(KeyCode::Left)),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('w'))),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('s'))),
            Some(GameInput::Direction(Direction::Down))
        );
        assert_eq!(map_key_event(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn number_keys_start_sessions_at_each_speed() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key_event(press(KeyCode::Char('1'))),
            Some(GameInput::Start(Speed::Slow))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('2'))),
            Some(GameInput::Start(Speed::Medium))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('3'))),
            Some(GameInput::Start(Speed::Fast))
        );
        assert_eq!(map_key_event(press(KeyCode::Enter)), Some(GameInput::Confirm));
    }

    #[test]
    fn ctrl_c_quits_and_key_release_is_ignored() {
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );

        let mut release = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(release), None);
    }
}
