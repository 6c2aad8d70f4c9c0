use std::io;
use std::time::{Duration, Instant};

use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::config::Speed;
use crate::game::{GameState, TickResult};
use crate::game_loop::{GameLoop, LoopStatus};
use crate::grid::GridSize;
use crate::input::{GameInput, InputHandler};
use crate::renderer::{Screen, ScreenSink};

/// How long to wait for input while no tick is scheduled.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Whether the host loop keeps running after an input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Host application: start controls, the active session and the screen.
pub struct App<B: Backend> {
    sink: ScreenSink<B>,
    game_loop: Option<GameLoop>,
    grid: GridSize,
    default_speed: Speed,
    seed: Option<u64>,
    sessions_started: u64,
}

impl<B: Backend> App<B> {
    /// Creates the app showing the start menu.
    ///
    /// With a `seed`, every session is reproducible: session `n` uses `seed + n`.
    #[must_use]
    pub fn new(
        terminal: Terminal<B>,
        grid: GridSize,
        default_speed: Speed,
        seed: Option<u64>,
    ) -> Self {
        Self {
            sink: ScreenSink::new(terminal, grid),
            game_loop: None,
            grid,
            default_speed,
            seed,
            sessions_started: 0,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        self.sink.screen()
    }

    #[must_use]
    pub fn game_loop(&self) -> Option<&GameLoop> {
        self.game_loop.as_ref()
    }

    /// Repaints the whole screen.
    pub fn draw(&mut self) -> io::Result<()> {
        self.sink.draw()
    }

    /// Applies one host command.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> io::Result<Flow> {
        match input {
            GameInput::Quit => return Ok(Flow::Quit),
            GameInput::Start(speed) => {
                self.start_session(speed, now)?;
            }
            GameInput::Confirm => {
                self.start_session(self.default_speed, now)?;
            }
            GameInput::Direction(direction) => {
                if let Some(game_loop) = self.running_loop_mut() {
                    game_loop.on_direction_input(direction);
                }
            }
            GameInput::Redraw => self.draw()?,
        }

        Ok(Flow::Continue)
    }

    /// Starts a fresh session unless one is already running.
    ///
    /// Returns whether a session was started.
    pub fn start_session(&mut self, speed: Speed, now: Instant) -> io::Result<bool> {
        let state = match self.seed {
            Some(seed) => {
                GameState::new_with_seed(self.grid, seed.wrapping_add(self.sessions_started))
            }
            None => GameState::new(self.grid),
        };

        self.start_with_state(state, speed, now)
    }

    /// Starts a session from a prepared state unless one is already running.
    pub fn start_with_state(
        &mut self,
        state: GameState,
        speed: Speed,
        now: Instant,
    ) -> io::Result<bool> {
        if !self.sink.screen().start_enabled {
            tracing::debug!(%speed, "start ignored while a session is running");
            return Ok(false);
        }

        self.sessions_started += 1;
        tracing::info!(
            %speed,
            interval_ms = speed.interval_ms(),
            session = self.sessions_started,
            "session started"
        );

        self.sink.screen_mut().begin_session(speed);
        let mut game_loop = GameLoop::new(state, speed.interval());
        game_loop.start(now);
        self.game_loop = Some(game_loop);

        self.poll(now)?;
        Ok(true)
    }

    /// Runs a tick when one is due.
    pub fn poll(&mut self, now: Instant) -> io::Result<Option<TickResult>> {
        let Some(game_loop) = self.game_loop.as_mut() else {
            return Ok(None);
        };

        game_loop.poll(now, &mut self.sink)
    }

    /// How long the host may block on input before the next tick is due.
    #[must_use]
    pub fn next_wakeup(&self, now: Instant) -> Duration {
        self.game_loop
            .as_ref()
            .and_then(|game_loop| game_loop.time_until_next_tick(now))
            .unwrap_or(IDLE_POLL_INTERVAL)
    }

    /// Cooperative main loop: wait for input until the next deadline, then tick.
    pub fn run(&mut self, input: &mut InputHandler) -> io::Result<()> {
        self.draw()?;

        loop {
            let timeout = self.next_wakeup(Instant::now());
            if let Some(game_input) = input.poll_input(timeout)? {
                if self.handle_input(game_input, Instant::now())? == Flow::Quit {
                    break;
                }
            }

            self.poll(Instant::now())?;
        }

        self.shutdown();
        Ok(())
    }

    /// Stops any running session without reporting a loss.
    pub fn shutdown(&mut self) {
        if let Some(game_loop) = self.running_loop_mut() {
            tracing::info!(
                score = game_loop.state().score(),
                "session stopped by host"
            );
            game_loop.stop();
        }
    }

    fn running_loop_mut(&mut self) -> Option<&mut GameLoop> {
        self.game_loop
            .as_mut()
            .filter(|game_loop| game_loop.status() == LoopStatus::Running)
    }
}
