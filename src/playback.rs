//! Playback module.
//!
//! This module contains the two-phase animation that replays a search outcome: first the cells in
//! the order they were visited, then the path that was found. Playback is driven by the event loop,
//! which calls [`Playback::update`] on every iteration.

use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::{
    grid::{Cell, Grid},
    search::{Algorithm, SearchOutcome},
};

/// Default delay between two revealed cells of the visit order, in milliseconds.
pub(crate) const VISIT_INTERVAL_MS: u64 = 50;

/// Default delay between two revealed cells of the path, in milliseconds.
pub(crate) const PATH_INTERVAL_MS: u64 = 100;

/// Stage of the playback state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    /// No run in progress.
    Idle,
    /// Revealing the visit order.
    Visit,
    /// Revealing the path.
    Path,
}

/// Animation state for replaying a search outcome.
///
/// This structure keeps the outcome being replayed, the position reached within the current phase
/// and the cells revealed so far. At most one run plays at a time: [`Playback::start`] refuses new
/// runs until the previous one has revealed its whole path.
#[derive(Debug)]
pub(crate) struct Playback {
    /// Current stage of the state machine.
    ///
    /// This field decides which sequence of the [`outcome`](Playback::outcome) is being consumed
    /// and which interval separates two ticks. Any stage other than [`Phase::Idle`] counts as a
    /// run in progress.
    phase: Phase,
    /// Algorithm whose outcome is being shown, if any run was started.
    algorithm: Option<Algorithm>,
    /// Outcome being replayed.
    ///
    /// This field holds the visit order and the path of the last accepted run. It is kept after
    /// the run ends so the finished board can still be described.
    outcome: SearchOutcome,
    /// Start of the grid the outcome belongs to.
    start: Cell,
    /// Goal of the grid the outcome belongs to.
    goal: Cell,
    /// Position of the next cell to consume in the current phase.
    ///
    /// This field indexes into the visit order during [`Phase::Visit`] and into the path during
    /// [`Phase::Path`], and goes back to zero on every phase change.
    next: usize,
    /// Visited cells revealed so far, start and goal excluded.
    ///
    /// This field holds the cells the board highlights as explored, in the order they were
    /// consumed. It is only cleared when a new run starts or the current one is cancelled.
    revealed_visits: Vec<Cell>,
    /// Path cells revealed so far, start and goal excluded.
    ///
    /// This field holds the cells the board highlights as part of the route, drawn over the
    /// visited highlights.
    revealed_path: Vec<Cell>,
    /// Delay between two ticks of the visit phase.
    visit_interval: Duration,
    /// Delay between two ticks of the path phase.
    path_interval: Duration,
    /// Deadline of the last tick, or the time the run started.
    ///
    /// This field anchors the tick schedule. The next tick is due one phase interval after it, and
    /// each tick moves it forward by exactly that interval.
    last_update_time: Instant,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(VISIT_INTERVAL_MS),
            Duration::from_millis(PATH_INTERVAL_MS),
        )
    }
}

impl Playback {
    /// Creates an idle playback with the given tick intervals.
    pub(crate) fn new(visit_interval: Duration, path_interval: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            algorithm: None,
            outcome: SearchOutcome::default(),
            start: Cell::new(0, 0),
            goal: Cell::new(0, 0),
            next: 0,
            revealed_visits: Vec::new(),
            revealed_path: Vec::new(),
            visit_interval,
            path_interval,
            last_update_time: Instant::now(),
        }
    }

    /// Current stage of the state machine.
    pub(crate) const fn phase(&self) -> Phase {
        self.phase
    }

    /// Checks whether a run is being played.
    pub(crate) fn is_running(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Algorithm of the last started run.
    pub(crate) const fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// Outcome of the last started run.
    pub(crate) const fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    /// Position reached within the current phase, and the length of the phase's sequence.
    pub(crate) fn progress(&self) -> (usize, usize) {
        let total = match self.phase {
            Phase::Idle => 0,
            Phase::Visit => self.outcome.visit_order.len(),
            Phase::Path => self.outcome.path.len(),
        };

        (self.next, total)
    }

    /// Visited cells revealed so far.
    pub(crate) fn revealed_visits(&self) -> &[Cell] {
        &self.revealed_visits
    }

    /// Path cells revealed so far.
    pub(crate) fn revealed_path(&self) -> &[Cell] {
        &self.revealed_path
    }

    /// Starts replaying a search outcome.
    ///
    /// Returns `false` and leaves the current run untouched if one is still playing. Otherwise the
    /// highlights of the previous run are dropped and the visit phase begins.
    pub(crate) fn start(
        &mut self,
        algorithm: Algorithm,
        outcome: SearchOutcome,
        grid: &Grid,
    ) -> bool {
        if self.is_running() {
            debug!("ignoring {} request, playback in progress", algorithm.label());
            return false;
        }

        info!(
            "playing {}: {} visited cells, {} path cells",
            algorithm.label(),
            outcome.visit_order.len(),
            outcome.path.len()
        );

        self.algorithm = Some(algorithm);
        self.outcome = outcome;
        self.start = grid.start();
        self.goal = grid.goal();
        self.revealed_visits.clear();
        self.revealed_path.clear();
        self.next = 0;
        self.phase = Phase::Visit;
        self.last_update_time = Instant::now();
        self.settle();

        true
    }

    /// Stops the current run and drops every highlight.
    pub(crate) fn cancel(&mut self) {
        if self.is_running() {
            debug!("cancelling playback during {:?} phase", self.phase);
        }

        self.phase = Phase::Idle;
        self.algorithm = None;
        self.outcome = SearchOutcome::default();
        self.next = 0;
        self.revealed_visits.clear();
        self.revealed_path.clear();
    }

    /// Advances the playback by every tick that has come due.
    pub(crate) fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Advances the playback by every tick that has come due at `now`.
    ///
    /// Ticks are scheduled from the previous deadline rather than from the time they were noticed,
    /// so a late caller does not slow the animation down. A caller that wakes up less often than
    /// the interval gets several ticks at once.
    pub(crate) fn update_at(&mut self, now: Instant) {
        while let Some(deadline) = self.next_deadline() {
            if now < deadline {
                break;
            }

            self.last_update_time = deadline;
            let _ = self.step();
        }
    }

    /// Time at which the next tick is due, or `None` when no run is playing.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        let interval = match self.phase {
            Phase::Idle => return None,
            Phase::Visit => self.visit_interval,
            Phase::Path => self.path_interval,
        };

        self.last_update_time.checked_add(interval)
    }

    /// Consumes the next cell of the current phase regardless of timing.
    ///
    /// Returns the cell that became highlighted. Start and goal are consumed like any other cell
    /// but never highlighted, so `None` is also returned for them.
    pub(crate) fn step(&mut self) -> Option<Cell> {
        let sequence = match self.phase {
            Phase::Idle => return None,
            Phase::Visit => &self.outcome.visit_order,
            Phase::Path => &self.outcome.path,
        };

        let cell = sequence
            .get(self.next)
            .copied()
            .filter(|cell| *cell != self.start && *cell != self.goal);
        self.next += 1;

        if let Some(cell) = cell {
            match self.phase {
                Phase::Visit => self.revealed_visits.push(cell),
                Phase::Path => self.revealed_path.push(cell),
                Phase::Idle => {}
            }
        }
        self.settle();

        cell
    }

    /// Moves on to the next phase once the current sequence is exhausted.
    ///
    /// An empty path skips the path phase entirely.
    fn settle(&mut self) {
        if self.phase == Phase::Visit && self.next >= self.outcome.visit_order.len() {
            trace!("visit order exhausted after {} cells", self.next);
            self.phase = Phase::Path;
            self.next = 0;
        }

        if self.phase == Phase::Path && self.next >= self.outcome.path.len() {
            info!("playback finished, path of {} cells", self.outcome.path.len());
            self.phase = Phase::Idle;
            self.next = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Starts a run of the given algorithm on a grid and returns the playback.
    fn started(algorithm: Algorithm, grid: &Grid) -> Playback {
        let mut playback = Playback::default();
        assert!(
            playback.start(algorithm, algorithm.search(grid), grid),
            "an idle playback should accept a run"
        );
        playback
    }

    /// Steps until the playback leaves the given phase and returns how many steps it took.
    fn steps_through(playback: &mut Playback, phase: Phase) -> usize {
        let mut steps = 0;
        while playback.phase() == phase {
            let _ = playback.step();
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_new_playback_is_idle() {
        let mut playback = Playback::default();

        assert_eq!(playback.phase(), Phase::Idle);
        assert!(!playback.is_running());
        assert_eq!(playback.algorithm(), None);
        assert_eq!(playback.step(), None);
    }

    #[test]
    fn test_full_run_reveals_every_cell_but_start_and_goal() {
        let grid = Grid::reference();
        let mut playback = started(Algorithm::BreadthFirst, &grid);

        assert_eq!(playback.phase(), Phase::Visit);
        assert_eq!(steps_through(&mut playback, Phase::Visit), 52);
        assert_eq!(playback.revealed_visits().len(), 50);
        assert!(!playback.revealed_visits().contains(&grid.start()));
        assert!(!playback.revealed_visits().contains(&grid.goal()));

        assert_eq!(playback.phase(), Phase::Path);
        assert_eq!(steps_through(&mut playback, Phase::Path), 15);
        assert_eq!(playback.revealed_path().len(), 13);

        assert_eq!(playback.phase(), Phase::Idle);
        assert!(!playback.is_running());
    }

    #[test]
    fn test_revealed_cells_follow_outcome_order() {
        let grid = Grid::parse("S01\n001\nG00").expect("map should parse");
        let mut playback = started(Algorithm::DepthFirst, &grid);

        while playback.is_running() {
            let _ = playback.step();
        }

        assert_eq!(
            playback.revealed_visits(),
            [Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2), Cell::new(2, 2)]
        );
        assert_eq!(
            playback.revealed_path(),
            [Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2)]
        );
    }

    #[test]
    fn test_start_rejected_during_visit_phase() {
        let grid = Grid::reference();
        let mut playback = started(Algorithm::BreadthFirst, &grid);
        for _ in 0..5 {
            let _ = playback.step();
        }
        let revealed = playback.revealed_visits().to_vec();

        let accepted = playback.start(
            Algorithm::DepthFirst,
            Algorithm::DepthFirst.search(&grid),
            &grid,
        );

        assert!(!accepted, "a second run should be rejected");
        assert_eq!(playback.phase(), Phase::Visit);
        assert_eq!(playback.algorithm(), Some(Algorithm::BreadthFirst));
        assert_eq!(playback.revealed_visits(), revealed.as_slice());
        assert_eq!(playback.step(), Some(Cell::new(0, 2)), "the next cell is not skipped");
    }

    #[test]
    fn test_start_rejected_during_path_phase() {
        let grid = Grid::reference();
        let mut playback = started(Algorithm::DepthFirst, &grid);
        let _ = steps_through(&mut playback, Phase::Visit);
        let _ = playback.step();
        let _ = playback.step();
        let revealed = playback.revealed_path().to_vec();

        let accepted = playback.start(
            Algorithm::BreadthFirst,
            Algorithm::BreadthFirst.search(&grid),
            &grid,
        );

        assert!(!accepted, "a second run should be rejected");
        assert_eq!(playback.phase(), Phase::Path);
        assert_eq!(playback.algorithm(), Some(Algorithm::DepthFirst));
        assert_eq!(playback.revealed_path(), revealed.as_slice());
        assert_eq!(playback.step(), Some(Cell::new(2, 0)));
    }

    #[test]
    fn test_empty_path_skips_path_phase() {
        let grid = Grid::parse("S000\n0100\n1111\n000G").expect("map should parse");
        let mut playback = started(Algorithm::DepthFirst, &grid);

        assert_eq!(steps_through(&mut playback, Phase::Visit), 7);
        assert_eq!(playback.phase(), Phase::Idle);
        assert!(playback.revealed_path().is_empty());
        assert!(!playback.outcome().found());
    }

    #[test]
    fn test_new_run_after_finish_clears_highlights() {
        let grid = Grid::reference();
        let mut playback = started(Algorithm::BreadthFirst, &grid);
        while playback.is_running() {
            let _ = playback.step();
        }

        let accepted = playback.start(
            Algorithm::DepthFirst,
            Algorithm::DepthFirst.search(&grid),
            &grid,
        );

        assert!(accepted, "a finished playback should accept a new run");
        assert!(playback.revealed_visits().is_empty());
        assert!(playback.revealed_path().is_empty());
        assert_eq!(playback.algorithm(), Some(Algorithm::DepthFirst));
    }

    #[test]
    fn test_update_waits_for_interval() {
        let grid = Grid::reference();
        let mut playback = started(Algorithm::BreadthFirst, &grid);
        let origin = playback.last_update_time;

        playback.update_at(origin + Duration::from_millis(VISIT_INTERVAL_MS - 1));
        assert_eq!(playback.revealed_visits().len(), 0);

        playback.update_at(origin + Duration::from_millis(VISIT_INTERVAL_MS));
        // The first visited cell is the start, which is consumed without a highlight.
        assert_eq!(playback.revealed_visits().len(), 0);
        assert_eq!(playback.next, 1);

        playback.update_at(origin + Duration::from_millis(2 * VISIT_INTERVAL_MS));
        assert_eq!(playback.revealed_visits(), [Cell::new(1, 0)]);
    }

    #[test]
    fn test_path_phase_uses_path_interval() {
        let grid = Grid::reference();
        let mut playback = started(Algorithm::DepthFirst, &grid);
        let _ = steps_through(&mut playback, Phase::Visit);
        let origin = Instant::now();
        playback.last_update_time = origin;

        playback.update_at(origin + Duration::from_millis(VISIT_INTERVAL_MS));
        assert_eq!(playback.next, 0, "the visit interval is too short for the path phase");

        playback.update_at(origin + Duration::from_millis(PATH_INTERVAL_MS));
        assert_eq!(playback.next, 1);
    }

    #[test]
    fn test_late_updates_keep_the_tick_rate() {
        let grid = Grid::reference();
        let mut playback = started(Algorithm::BreadthFirst, &grid);
        let origin = playback.last_update_time;

        // Updates arrive every 12 ms, later than most deadlines, until 1008 ms have passed.
        for step in 1..=84 {
            playback.update_at(origin + Duration::from_millis(12 * step));
        }

        assert_eq!(playback.phase(), Phase::Visit);
        assert_eq!(playback.next, 20, "one tick per 50 ms over the first second");
        assert_eq!(
            playback.next_deadline(),
            Some(origin + Duration::from_millis(21 * VISIT_INTERVAL_MS))
        );
    }

    #[test]
    fn test_short_interval_catches_up() {
        let grid = Grid::reference();
        let mut playback = Playback::new(Duration::from_millis(1), Duration::from_millis(1));
        assert!(playback.start(
            Algorithm::BreadthFirst,
            Algorithm::BreadthFirst.search(&grid),
            &grid
        ));
        let origin = playback.last_update_time;

        playback.update_at(origin + Duration::from_millis(10));
        assert_eq!(playback.next, 10);

        playback.update_at(origin + Duration::from_secs(1));
        assert_eq!(playback.phase(), Phase::Idle, "every due tick should be played");
        assert_eq!(playback.revealed_path().len(), 13);
        assert_eq!(playback.next_deadline(), None);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let grid = Grid::reference();
        let mut playback = started(Algorithm::BreadthFirst, &grid);
        let _ = playback.step();
        let _ = playback.step();

        playback.cancel();

        assert_eq!(playback.phase(), Phase::Idle);
        assert!(playback.revealed_visits().is_empty());
        assert_eq!(playback.algorithm(), None);
        assert!(playback.start(
            Algorithm::DepthFirst,
            Algorithm::DepthFirst.search(&grid),
            &grid
        ));
    }
}
