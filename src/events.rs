//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    playback::Playback,
    search::Algorithm,
    types::{MainMenuItem, Screen},
    App,
};

/// Maximum time to wait for input before advancing the playback.
const EVENT_POLL_MS: u64 = 10;

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to [`handle_key`]. The poll never
/// waits past the next playback tick, which is played afterwards on the board screen.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(poll_timeout(&app.playback, Instant::now()))? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key);
        }
    }

    if app.screen == Screen::InGame {
        app.playback.update();
    }

    Ok(())
}

/// Time to wait for input before the playback needs attention again.
pub(crate) fn poll_timeout(playback: &Playback, now: Instant) -> Duration {
    let timeout = Duration::from_millis(EVENT_POLL_MS);

    playback
        .next_deadline()
        .map_or(timeout, |deadline| {
            deadline.saturating_duration_since(now).min(timeout)
        })
}

/// Dispatches a single key press.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') | KeyCode::Enter => handle_l_events(app),
        KeyCode::Char('h') | KeyCode::Esc => handle_h_events(app),
        KeyCode::Char('d') => handle_run_events(app, Algorithm::DepthFirst),
        KeyCode::Char('b') => handle_run_events(app, Algorithm::BreadthFirst),
        _ => {}
    }
}

/// Handles 'j' key press events for downward navigation in the main menu.
pub(crate) fn handle_j_events(app: &mut App) {
    if let Screen::MainMenu(item) = app.screen {
        app.screen = Screen::MainMenu(item.next());
    }
}

/// Handles 'k' key press events for upward navigation in the main menu.
pub(crate) fn handle_k_events(app: &mut App) {
    if let Screen::MainMenu(item) = app.screen {
        app.screen = Screen::MainMenu(item.previous());
    }
}

/// Handles 'l' key press events for selection.
///
/// Selecting an algorithm opens the board and starts a run of it right away, while selecting
/// "Quit" exits the application.
pub(crate) fn handle_l_events(app: &mut App) {
    if let Screen::MainMenu(item) = app.screen {
        match item.algorithm() {
            Some(algorithm) => {
                app.screen = Screen::InGame;
                let _ = app.trigger(algorithm);
            }
            None => app.exit = true,
        }
    }
}

/// Handles 'h' key press events for backward navigation.
///
/// Returning from the board to the main menu cancels the playback in progress, if any, and leaves
/// the cursor on the algorithm that was last shown.
pub(crate) fn handle_h_events(app: &mut App) {
    if app.screen == Screen::InGame {
        let item = match app.playback.algorithm() {
            Some(Algorithm::BreadthFirst) => MainMenuItem::BreadthFirst,
            Some(Algorithm::DepthFirst) | None => MainMenuItem::DepthFirst,
        };
        app.playback.cancel();
        app.screen = Screen::MainMenu(item);
    }
}

/// Handles the run keys on the board screen.
///
/// Requests made while a run is playing are ignored.
pub(crate) fn handle_run_events(app: &mut App, algorithm: Algorithm) {
    if app.screen == Screen::InGame {
        let _ = app.trigger(algorithm);
    }
}
