use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::grid::GridPosition;
use crate::input::Direction;

/// Cells per side of the play grid.
pub const DEFAULT_GRID_DIMENSION: u16 = 40;

/// Cell every new snake starts on.
pub const SNAKE_ORIGIN: GridPosition = GridPosition::new(0, 0);

/// Heading every new snake starts with.
pub const SNAKE_INITIAL_HEADING: Direction = Direction::Down;

/// Food is always drawn white.
pub const FOOD_COLOR: Color = Color::White;

/// Background of empty play-area cells.
pub const GRID_BG: Color = Color::Black;

pub const BORDER_FG: Color = Color::DarkGray;

pub const SCORE_FG: Color = Color::White;

pub const GAME_OVER_FG: Color = Color::Red;

pub const MENU_TITLE_FG: Color = Color::Green;

pub const MENU_FOOTER_FG: Color = Color::DarkGray;

/// Upper half-block glyph; two grid rows share one terminal row.
pub const GLYPH_HALF_UPPER: &str = "▀";

/// Application directory name used under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "grid-snake";

/// Tick cadence presets chosen before a session starts.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl Speed {
    /// All presets in menu order.
    pub const ALL: [Self; 3] = [Self::Slow, Self::Medium, Self::Fast];

    /// Tick period in milliseconds.
    #[must_use]
    pub const fn interval_ms(self) -> u64 {
        match self {
            Self::Slow => 200,
            Self::Medium => 150,
            Self::Fast => 100,
        }
    }

    #[must_use]
    pub const fn interval(self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Speed;

    #[test]
    fn speed_presets_have_expected_periods() {
        assert_eq!(Speed::Slow.interval(), Duration::from_millis(200));
        assert_eq!(Speed::Medium.interval(), Duration::from_millis(150));
        assert_eq!(Speed::Fast.interval(), Duration::from_millis(100));
    }

    #[test]
    fn speed_deserializes_from_lowercase_names() {
        let speed: Speed = serde_json::from_str("\"fast\"").expect("fast should parse");
        assert_eq!(speed, Speed::Fast);
        assert!(serde_json::from_str::<Speed>("\"warp\"").is_err());
    }
}
