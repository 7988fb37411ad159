//! Core application state and logic for the search visualizer.

use color_eyre::eyre::Result;
use log::debug;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    grid::Grid,
    playback::Playback,
    search::Algorithm,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the search visualizer.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the board and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Maze being solved.
    ///
    /// The maze is fixed for the lifetime of the application, either the built-in reference maze
    /// or the one loaded from the command line.
    pub(crate) grid: Grid,
    /// Playback of the last started search.
    ///
    /// This field manages the animation state including timing, the phase being played and the
    /// cells revealed so far.
    pub(crate) playback: Playback,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl App {
    /// Creates the application state from a resolved configuration.
    pub fn new(config: Config) -> Self {
        Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::DepthFirst),
            grid: config.grid,
            playback: Playback::new(config.visit_interval, config.path_interval),
        }
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input, advances the playback and redraws the screen. The loop
    /// continues until the exit condition is `true`, after which the function returns to the call
    /// site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Runs a search and starts playing its outcome.
    ///
    /// The request is ignored while a previous run is still playing, in which case the search is
    /// not even computed. Returns whether the run was started.
    pub(crate) fn trigger(&mut self, algorithm: Algorithm) -> bool {
        if self.playback.is_running() {
            debug!("{} ignored, a run is still playing", algorithm.label());
            return false;
        }

        let outcome = algorithm.search(&self.grid);
        self.playback.start(algorithm, outcome, &self.grid)
    }
}
