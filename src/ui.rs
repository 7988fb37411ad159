//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{canvas::Canvas, Block, BorderType, Borders, Clear},
    Frame,
};

use crate::{
    playback::{Phase, Playback},
    render::{self, CanvasScale, CELL_SIZE_PX},
    types::{MainMenuItem, Screen},
    App,
};

/// Keys available on the board screen, shown above the status line.
const BOARD_TOOLTIP: &str = "(d) depth-first / (b) breadth-first / (h) return";

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from data conversion failures while laying out the board.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the bordered, centered box of a menu and returns one row per item inside it.
pub(crate) fn init_menu(frame: &mut Frame, title: &str, items: u8) -> Rc<[Rect]> {
    let [_, space, _] = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .areas(frame.area());
    let [_, space, _] = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .areas(space);

    let [layout] = Layout::vertical([Constraint::Max(u16::from(items) + 2)])
        .flex(Flex::Center)
        .areas(space);

    let block = Block::bordered()
        .title(title)
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(items)]).split(inner_space)
}

/// Renders the main menu screen with one entry per algorithm and a quit entry.
///
/// This function highlights the currently selected option and provides visual feedback for user
/// navigation.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let count = u8::try_from(MainMenuItem::ALL.len()).unwrap_or(u8::MAX);
    let inner_layout = init_menu(frame, "Main Menu", count);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (entry, area) in MainMenuItem::ALL.into_iter().zip(inner_layout.iter()) {
        let style = if entry == item {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(entry.repr()).centered().style(style), *area);
    }
}

/// Renders the board screen with the maze, the revealed highlights and a status line.
///
/// The board keeps square cells by giving each one twice as many terminal columns as rows, and is
/// centered in the space above the status block. When the terminal cannot fit a single row per
/// maze row, a notice replaces the board.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let [board_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(frame.area());

    let rows = u16::try_from(app.grid.height())?;
    let columns = u16::try_from(app.grid.width())?;
    let cell_rows = board_area
        .height
        .checked_div(rows)
        .unwrap_or(0)
        .min(board_area.width.checked_div(columns.saturating_mul(2)).unwrap_or(0));

    if cell_rows == 0 {
        let [notice] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(board_area);
        frame.render_widget(
            Line::styled("terminal too small for the board", Color::Green).centered(),
            notice,
        );
    } else {
        let [space] = Layout::horizontal([Constraint::Length(columns * 2 * cell_rows)])
            .flex(Flex::Center)
            .areas(board_area);
        let [space] = Layout::vertical([Constraint::Length(rows * cell_rows)])
            .flex(Flex::Center)
            .areas(space);

        let (width_px, height_px) = render::board_size(&app.grid)?;
        let scale = CanvasScale {
            height_px,
            // Half-block markers give two dot rows per terminal row; fill twice as densely so
            // rounding never leaves a dot row empty.
            fill_step_px: (height_px / f64::from(space.height) / 4.).max(1.),
            column_px: rounded_div::i32(
                i32::from(columns) * i32::from(CELL_SIZE_PX),
                i32::from(space.width),
            ),
        };
        let commands = render::paint_board(&app.grid, &app.playback)?;

        let board = Canvas::default()
            .x_bounds([0., width_px])
            .y_bounds([0., height_px])
            .marker(Marker::HalfBlock)
            .paint(|ctx| render::paint_canvas(ctx, &commands, scale));

        frame.render_widget(board, space);
    }

    let tooltip_block = Block::bordered()
        .title(BOARD_TOOLTIP)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status = Line::raw(status_line(&app.playback)).centered();

    frame.render_widget(status, tooltip_block.inner(status_area));
    frame.render_widget(tooltip_block, status_area);

    Ok(())
}

/// Describes the state of the playback in one line.
pub(crate) fn status_line(playback: &Playback) -> String {
    let Some(algorithm) = playback.algorithm() else {
        return "Press (d) or (b) to run a search".to_owned();
    };
    let outcome = playback.outcome();
    let (position, total) = playback.progress();

    match playback.phase() {
        Phase::Visit => format!("{}: exploring {position}/{total}", algorithm.label()),
        Phase::Path => format!("{}: tracing path {position}/{total}", algorithm.label()),
        Phase::Idle if outcome.found() => format!(
            "{}: visited {} cells, path of {} cells",
            algorithm.label(),
            outcome.visit_order.len(),
            outcome.path.len()
        ),
        Phase::Idle => format!(
            "{}: visited {} cells, goal unreachable",
            algorithm.label(),
            outcome.visit_order.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{grid::Grid, search::Algorithm};

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Collects the rendered buffer into one string per row.
    fn rendered_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_draw_main_menu() {
        let app = App::default();
        let mut terminal = create_test_terminal(80, 24);

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing main menu should succeed");
        let rows = rendered_rows(&terminal).join("\n");
        assert!(rows.contains("Depth-First"));
        assert!(rows.contains("Breadth-First"));
        assert!(rows.contains("Quit"));
    }

    #[test]
    fn test_init_menu_rows() {
        let mut terminal = create_test_terminal(80, 24);

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, "Main Menu", 3);
            assert_eq!(layout.len(), 3, "main menu should have 3 items");
        });

        assert!(result.is_ok(), "initializing main menu should succeed");
    }

    #[test]
    fn test_draw_idle_board() {
        let mut app = App::default();
        app.screen = Screen::InGame;
        let mut terminal = create_test_terminal(80, 24);

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing the board should succeed");
        let rows = rendered_rows(&terminal).join("\n");
        assert!(rows.contains('S'), "start label should be drawn");
        assert!(rows.contains('G'), "goal label should be drawn");
        assert!(rows.contains("Press (d) or (b) to run a search"));
    }

    #[test]
    fn test_draw_board_during_run() {
        let mut app = App::default();
        app.screen = Screen::InGame;
        assert!(app.trigger(Algorithm::BreadthFirst));
        for _ in 0..10 {
            let _ = app.playback.step();
        }
        let mut terminal = create_test_terminal(80, 24);

        let result = terminal.draw(|frame| {
            in_game(&app, frame).expect("board should render during a run");
        });

        assert!(result.is_ok(), "drawing the board during a run should succeed");
        let rows = rendered_rows(&terminal).join("\n");
        assert!(rows.contains("Breadth-first search: exploring 10/52"));
    }

    #[test]
    fn test_draw_board_in_tiny_terminal() {
        let mut app = App::default();
        app.screen = Screen::InGame;
        let mut terminal = create_test_terminal(12, 6);

        let result = terminal.draw(|frame| {
            in_game(&app, frame).expect("board should render in a tiny terminal");
        });

        assert!(result.is_ok(), "drawing a tiny board should succeed");
    }

    #[test]
    fn test_draw_loaded_map() {
        let mut app = App::default();
        app.grid = Grid::parse("S000\n0100\n1111\n000G").expect("map should parse");
        app.screen = Screen::InGame;
        assert!(app.trigger(Algorithm::DepthFirst));
        while app.playback.is_running() {
            let _ = app.playback.step();
        }
        let mut terminal = create_test_terminal(60, 20);

        let result = terminal.draw(|frame| {
            in_game(&app, frame).expect("board should render a loaded map");
        });

        assert!(result.is_ok(), "drawing a loaded map should succeed");
        let rows = rendered_rows(&terminal).join("\n");
        assert!(rows.contains("Depth-first search: visited 7 cells, goal unreachable"));
    }

    #[test]
    fn test_status_line_phases() {
        let grid = Grid::reference();
        let mut playback = Playback::default();
        assert_eq!(status_line(&playback), "Press (d) or (b) to run a search");

        assert!(playback.start(
            Algorithm::DepthFirst,
            Algorithm::DepthFirst.search(&grid),
            &grid
        ));
        assert_eq!(
            status_line(&playback),
            "Depth-first search: exploring 0/15"
        );

        while playback.phase() == Phase::Visit {
            let _ = playback.step();
        }
        assert_eq!(
            status_line(&playback),
            "Depth-first search: tracing path 0/15"
        );

        while playback.is_running() {
            let _ = playback.step();
        }
        assert_eq!(
            status_line(&playback),
            "Depth-first search: visited 15 cells, path of 15 cells"
        );
    }
}
