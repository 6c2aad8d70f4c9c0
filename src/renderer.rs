use std::io;

use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};

use crate::config::{Speed, BORDER_FG, FOOD_COLOR, GLYPH_HALF_UPPER, GRID_BG};
use crate::game::Snapshot;
use crate::game_loop::{FrameSink, Redraw};
use crate::grid::GridSize;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Everything the host screen shows, outside of the core game state.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Screen {
    pub grid: GridSize,
    /// Last frame received from the game loop, if any session ran yet.
    pub last_frame: Option<Snapshot>,
    /// Score label contents.
    pub score: u32,
    /// Whether the three start controls accept input.
    pub start_enabled: bool,
    /// End-of-game label visibility.
    pub game_over: bool,
    /// Speed of the current or most recent session.
    pub speed: Option<Speed>,
}

impl Screen {
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            last_frame: None,
            score: 0,
            start_enabled: true,
            game_over: false,
            speed: None,
        }
    }

    /// Disables start controls and resets labels for a new session.
    pub fn begin_session(&mut self, speed: Speed) {
        self.start_enabled = false;
        self.game_over = false;
        self.score = 0;
        self.speed = Some(speed);
    }
}

/// Terminal-backed [`FrameSink`]: keeps the [`Screen`] model and redraws it.
pub struct ScreenSink<B: Backend> {
    terminal: Terminal<B>,
    screen: Screen,
}

impl<B: Backend> ScreenSink<B> {
    #[must_use]
    pub fn new(terminal: Terminal<B>, grid: GridSize) -> Self {
        Self {
            terminal,
            screen: Screen::new(grid),
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    #[must_use]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Renders the current screen model.
    pub fn draw(&mut self) -> io::Result<()> {
        let screen = &self.screen;
        self.terminal.draw(|frame| render(frame, screen))?;
        Ok(())
    }
}

impl<B: Backend> FrameSink for ScreenSink<B> {
    type Error = io::Error;

    fn redraw(&mut self, frame: &Redraw) -> io::Result<()> {
        self.screen.last_frame = Some(frame.snapshot.clone());
        self.draw()
    }

    fn score_changed(&mut self, score: u32) -> io::Result<()> {
        self.screen.score = score;
        self.draw()
    }

    fn session_ended(&mut self, final_score: u32) -> io::Result<()> {
        self.screen.score = final_score;
        self.screen.game_over = true;
        self.screen.start_enabled = true;
        self.draw()
    }
}

/// Renders the full screen from immutable state.
pub fn render(frame: &mut Frame<'_>, screen: &Screen) {
    let area = frame.area();
    let play_area = render_hud(
        frame,
        area,
        &HudInfo {
            score: screen.score,
            speed: screen.speed,
            game_over: screen.game_over,
        },
    );

    let board = board_area(play_area, screen.grid);
    let block = Block::bordered().border_style(Style::new().fg(BORDER_FG));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_grid(frame, inner, screen);

    if !screen.start_enabled {
        return;
    }

    if screen.game_over {
        render_game_over_menu(frame, board, screen.score);
    } else {
        render_start_menu(frame, board);
    }
}

/// Bordered board rectangle centered in `area`, clipped to fit.
fn board_area(area: Rect, grid: GridSize) -> Rect {
    let width = grid.dimension().saturating_add(2);
    let height = terminal_rows(grid).saturating_add(2);

    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, board, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(column);

    board
}

/// Two grid rows share one terminal row.
fn terminal_rows(grid: GridSize) -> u16 {
    grid.dimension().div_ceil(2)
}

/// Paints every grid cell: background, then food, then the snake on top.
fn render_grid(frame: &mut Frame<'_>, inner: Rect, screen: &Screen) {
    let colors = cell_colors(screen);
    let dimension = screen.grid.dimension();
    let color_at = |x: u16, y: u16| {
        if y >= dimension {
            return Color::Reset;
        }
        colors[usize::from(y) * usize::from(dimension) + usize::from(x)]
    };

    let buffer = frame.buffer_mut();
    for row in 0..terminal_rows(screen.grid) {
        let y = inner.y.saturating_add(row);
        if y >= inner.bottom() {
            break;
        }

        for column in 0..dimension {
            let x = inner.x.saturating_add(column);
            if x >= inner.right() {
                break;
            }

            let style = Style::new()
                .fg(color_at(column, row * 2))
                .bg(color_at(column, row * 2 + 1));
            buffer.set_string(x, y, GLYPH_HALF_UPPER, style);
        }
    }
}

fn cell_colors(screen: &Screen) -> Vec<Color> {
    let dimension = usize::from(screen.grid.dimension());
    let mut colors = vec![GRID_BG; screen.grid.total_cells()];

    let Some(snapshot) = &screen.last_frame else {
        return colors;
    };

    let mut paint = |x: u16, y: u16, color: Color| {
        if let Some(cell) = colors.get_mut(usize::from(y) * dimension + usize::from(x)) {
            *cell = color;
        }
    };

    paint(snapshot.food.x(), snapshot.food.y(), FOOD_COLOR);
    for cell in &snapshot.cells {
        paint(cell.x(), cell.y(), snapshot.snake_color);
    }

    colors
}
