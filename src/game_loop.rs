use std::time::{Duration, Instant};

use crate::game::{GameState, Snapshot, TickResult};
use crate::input::Direction;

/// One full-frame redraw request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Redraw {
    /// Whether the grid must be cleared before drawing; always true here.
    pub clear: bool,
    pub snapshot: Snapshot,
}

/// Rendering port the loop reports to after every tick.
///
/// The concrete drawing target and the UI controls live behind this trait;
/// the loop never owns them.
pub trait FrameSink {
    type Error;

    /// Draws one frame.
    fn redraw(&mut self, frame: &Redraw) -> Result<(), Self::Error>;

    /// Called whenever food is eaten.
    fn score_changed(&mut self, score: u32) -> Result<(), Self::Error>;

    /// Called once when the session is lost, so start controls can be re-enabled.
    fn session_ended(&mut self, final_score: u32) -> Result<(), Self::Error>;
}

/// Fixed-interval tick timer with explicit, permanent cancellation.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    next_due: Option<Instant>,
    cancelled: bool,
}

impl TickScheduler {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            cancelled: false,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Makes the first tick due immediately.
    pub fn start(&mut self, now: Instant) {
        if !self.cancelled {
            self.next_due = Some(now);
        }
    }

    /// Arms the next tick one interval after `now`.
    pub fn schedule_next(&mut self, now: Instant) {
        if !self.cancelled {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Stops all further ticks. There is no way to re-arm afterwards.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            tracing::debug!("tick scheduler cancelled");
        }
        self.cancelled = true;
        self.next_due = None;
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Time left until the next tick; `None` when nothing is scheduled.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Loop lifecycle. `Stopped` is final.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoopStatus {
    Running,
    Stopped,
}

/// Drives one [`GameState`] at a fixed cadence.
#[derive(Debug, Clone)]
pub struct GameLoop {
    state: GameState,
    scheduler: TickScheduler,
    status: LoopStatus,
}

impl GameLoop {
    /// Wraps `state` in a running loop that ticks every `interval`.
    ///
    /// No tick is scheduled until [`GameLoop::start`] is called.
    #[must_use]
    pub fn new(state: GameState, interval: Duration) -> Self {
        Self {
            state,
            scheduler: TickScheduler::new(interval),
            status: LoopStatus::Running,
        }
    }

    /// Begins the cadence; the first tick is due at `now`.
    pub fn start(&mut self, now: Instant) {
        if self.status == LoopStatus::Running {
            self.scheduler.start(now);
        }
    }

    /// Runs one tick if the scheduler says one is due.
    pub fn poll<S: FrameSink>(
        &mut self,
        now: Instant,
        sink: &mut S,
    ) -> Result<Option<TickResult>, S::Error> {
        if !self.scheduler.is_due(now) {
            return Ok(None);
        }

        self.tick(now, sink).map(Some)
    }

    /// Advances the game, redraws, and schedules the next tick or stops.
    pub fn tick<S: FrameSink>(
        &mut self,
        now: Instant,
        sink: &mut S,
    ) -> Result<TickResult, S::Error> {
        if self.status == LoopStatus::Stopped {
            return Ok(TickResult::default());
        }

        let result = self.state.advance();
        if result.lost {
            self.status = LoopStatus::Stopped;
            self.scheduler.cancel();
        } else {
            self.scheduler.schedule_next(now);
        }

        sink.redraw(&Redraw {
            clear: true,
            snapshot: self.state.snapshot(),
        })?;

        if result.ate {
            sink.score_changed(self.state.score())?;
        }

        if result.lost {
            sink.session_ended(self.state.score())?;
        }

        Ok(result)
    }

    /// Forwards a heading change; takes effect on the next tick.
    pub fn on_direction_input(&mut self, direction: Direction) {
        if !self.state.snake.set_heading(direction) {
            tracing::debug!(
                ?direction,
                heading = ?self.state.snake.heading(),
                "ignored reversing direction"
            );
        }
    }

    /// Ends the session without a loss, e.g. when the host shuts down.
    pub fn stop(&mut self) {
        self.scheduler.cancel();
        self.status = LoopStatus::Stopped;
    }

    #[must_use]
    pub fn status(&self) -> LoopStatus {
        self.status
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Time until the next tick; `None` once stopped.
    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::time::{Duration, Instant};

    use crate::food::Food;
    use crate::game::GameState;
    use crate::grid::{GridPosition, GridSize};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{FrameSink, GameLoop, LoopStatus, Redraw, TickScheduler};

    const INTERVAL: Duration = Duration::from_millis(150);

    #[derive(Debug, Default)]
    struct RecordingSink {
        frames: Vec<Redraw>,
        scores: Vec<u32>,
        ended: Vec<u32>,
    }

    impl FrameSink for RecordingSink {
        type Error = Infallible;

        fn redraw(&mut self, frame: &Redraw) -> Result<(), Self::Error> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn score_changed(&mut self, score: u32) -> Result<(), Self::Error> {
            self.scores.push(score);
            Ok(())
        }

        fn session_ended(&mut self, final_score: u32) -> Result<(), Self::Error> {
            self.ended.push(final_score);
            Ok(())
        }
    }

    fn loop_with(cells: Vec<GridPosition>, heading: Direction, food: GridPosition) -> GameLoop {
        let mut state = GameState::new_with_seed(GridSize::square(10), 11);
        state.snake = Snake::from_cells(cells, heading).expect("test snakes are never empty");
        state.food = Food::at(food);
        GameLoop::new(state, INTERVAL)
    }

    fn doomed_loop() -> GameLoop {
        let mut state = GameState::new_with_seed(GridSize::square(2), 12);
        state.snake = Snake::from_cells(
            vec![GridPosition::new(1, 0), GridPosition::new(0, 0)],
            Direction::Left,
        )
        .expect("two cells are a valid body");
        GameLoop::new(state, INTERVAL)
    }

    #[test]
    fn scheduler_is_idle_until_started() {
        let now = Instant::now();
        let scheduler = TickScheduler::new(INTERVAL);

        assert!(!scheduler.is_due(now));
        assert_eq!(scheduler.time_until_due(now), None);
    }

    #[test]
    fn scheduler_fires_once_per_interval() {
        let now = Instant::now();
        let mut scheduler = TickScheduler::new(INTERVAL);

        scheduler.start(now);
        assert!(scheduler.is_due(now));

        scheduler.schedule_next(now);
        assert!(!scheduler.is_due(now + Duration::from_millis(149)));
        assert!(scheduler.is_due(now + INTERVAL));
        assert_eq!(
            scheduler.time_until_due(now + Duration::from_millis(50)),
            Some(Duration::from_millis(100))
        );
    }

    #[test]
    fn cancelled_scheduler_cannot_be_rearmed() {
        let now = Instant::now();
        let mut scheduler = TickScheduler::new(INTERVAL);
        scheduler.start(now);

        scheduler.cancel();
        scheduler.schedule_next(now);
        scheduler.start(now);

        assert!(scheduler.is_cancelled());
        assert!(!scheduler.is_due(now + INTERVAL * 10));
        assert_eq!(scheduler.time_until_due(now), None);
    }

    #[test]
    fn first_tick_runs_immediately_after_start() {
        let now = Instant::now();
        let mut game_loop = loop_with(
            vec![GridPosition::new(5, 5)],
            Direction::Down,
            GridPosition::new(0, 0),
        );
        let mut sink = RecordingSink::default();

        assert_eq!(game_loop.poll(now, &mut sink), Ok(None));
        game_loop.start(now);
        let result = game_loop.poll(now, &mut sink).expect("sink is infallible");

        assert!(result.is_some_and(|result| result.moved));
        assert_eq!(sink.frames.len(), 1);
        assert!(sink.frames[0].clear);
        assert_eq!(game_loop.state().snake.head(), GridPosition::new(5, 6));
    }

    #[test]
    fn ticks_follow_the_interval() {
        let now = Instant::now();
        let mut game_loop = loop_with(
            vec![GridPosition::new(5, 5)],
            Direction::Right,
            GridPosition::new(0, 0),
        );
        let mut sink = RecordingSink::default();
        game_loop.start(now);

        let _ = game_loop.poll(now, &mut sink);
        let early = game_loop
            .poll(now + Duration::from_millis(100), &mut sink)
            .expect("sink is infallible");
        let on_time = game_loop
            .poll(now + INTERVAL, &mut sink)
            .expect("sink is infallible");

        assert_eq!(early, None);
        assert!(on_time.is_some());
        assert_eq!(sink.frames.len(), 2);
        assert_eq!(game_loop.state().snake.head(), GridPosition::new(7, 5));
    }

    #[test]
    fn eating_notifies_score_change() {
        let now = Instant::now();
        let mut game_loop = loop_with(
            vec![GridPosition::new(5, 5)],
            Direction::Right,
            GridPosition::new(6, 5),
        );
        let mut sink = RecordingSink::default();

        let result = game_loop.tick(now, &mut sink).expect("sink is infallible");

        assert!(result.ate);
        assert_eq!(sink.scores, vec![1]);
        assert_eq!(sink.frames[0].snapshot.score, 1);
        assert!(sink.ended.is_empty());
    }

    #[test]
    fn loss_stops_the_loop_and_notifies_once() {
        let now = Instant::now();
        let mut game_loop = doomed_loop();
        let mut sink = RecordingSink::default();
        game_loop.start(now);

        let result = game_loop
            .poll(now, &mut sink)
            .expect("sink is infallible")
            .expect("first tick is due at start");

        assert!(result.lost);
        assert_eq!(game_loop.status(), LoopStatus::Stopped);
        assert!(game_loop.scheduler().is_cancelled());
        assert_eq!(game_loop.time_until_next_tick(now), None);
        assert_eq!(sink.ended, vec![0]);
        assert!(sink.frames[0].snapshot.terminal);

        for step in 1..5 {
            let later = now + INTERVAL * step;
            assert_eq!(game_loop.poll(later, &mut sink), Ok(None));
            let _ = game_loop.tick(later, &mut sink);
        }
        assert_eq!(sink.ended.len(), 1);
        assert_eq!(sink.frames.len(), 1);
    }

    #[test]
    fn direction_input_applies_on_next_tick_only() {
        let now = Instant::now();
        let mut game_loop = loop_with(
            vec![GridPosition::new(5, 5)],
            Direction::Right,
            GridPosition::new(0, 0),
        );
        let mut sink = RecordingSink::default();

        game_loop.on_direction_input(Direction::Up);
        assert_eq!(game_loop.state().snake.head(), GridPosition::new(5, 5));

        let _ = game_loop.tick(now, &mut sink);
        assert_eq!(game_loop.state().snake.head(), GridPosition::new(5, 4));
    }

    #[test]
    fn reversing_input_is_ignored() {
        let now = Instant::now();
        let mut game_loop = loop_with(
            vec![GridPosition::new(4, 5), GridPosition::new(5, 5)],
            Direction::Right,
            GridPosition::new(0, 0),
        );
        let mut sink = RecordingSink::default();

        game_loop.on_direction_input(Direction::Left);
        let result = game_loop.tick(now, &mut sink).expect("sink is infallible");

        assert!(!result.lost);
        assert_eq!(game_loop.state().snake.head(), GridPosition::new(6, 5));
    }

    #[test]
    fn explicit_stop_cancels_without_ending_notification() {
        let now = Instant::now();
        let mut game_loop = loop_with(
            vec![GridPosition::new(5, 5)],
            Direction::Right,
            GridPosition::new(0, 0),
        );
        let mut sink = RecordingSink::default();
        game_loop.start(now);

        game_loop.stop();

        assert_eq!(game_loop.status(), LoopStatus::Stopped);
        assert_eq!(game_loop.poll(now, &mut sink), Ok(None));
        assert!(sink.ended.is_empty());
        assert!(!game_loop.state().is_terminal());
    }
}
