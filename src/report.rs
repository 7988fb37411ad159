//! Plain-text report of a single search, printed by the headless mode.

use std::{collections::HashSet, fmt::Write as _};

use color_eyre::eyre::Result;

use crate::{
    config::Config,
    grid::{Cell, CellKind, Grid},
    search::{Algorithm, SearchOutcome},
};

/// Runs the configured headless search and renders its report.
///
/// Returns `None` when no headless algorithm was requested and the interface should be opened
/// instead.
///
/// # Errors
///
/// This function may return errors from formatting the report.
pub fn solve_report(config: &Config) -> Result<Option<String>> {
    let Some(algorithm) = config.solve else {
        return Ok(None);
    };

    let outcome = algorithm.search(&config.grid);
    render(&config.grid, algorithm, &outcome).map(Some)
}

/// Renders the maze with the outcome laid over it, followed by a summary.
///
/// Path cells are drawn as `*`, other visited cells as `+`, untouched open cells as `.` and walls
/// as `#`. The start and goal keep their `S` and `G` markers.
fn render(grid: &Grid, algorithm: Algorithm, outcome: &SearchOutcome) -> Result<String> {
    let visited: HashSet<Cell> = outcome.visit_order.iter().copied().collect();
    let on_path: HashSet<Cell> = outcome.path.iter().copied().collect();
    let mut report = String::new();

    for (cell, kind) in grid.cells() {
        let symbol = if cell == grid.start() {
            'S'
        } else if cell == grid.goal() {
            'G'
        } else if kind == CellKind::Wall {
            '#'
        } else if on_path.contains(&cell) {
            '*'
        } else if visited.contains(&cell) {
            '+'
        } else {
            '.'
        };
        report.push(symbol);

        if cell.x + 1 == grid.width() {
            report.push('\n');
        }
    }

    writeln!(report)?;
    writeln!(
        report,
        "{}: visited {} cells",
        algorithm.label(),
        outcome.visit_order.len()
    )?;

    if outcome.found() {
        writeln!(
            report,
            "path: {} cells, {} steps",
            outcome.path.len(),
            outcome.path.len() - 1
        )?;
        let route: Vec<String> = outcome
            .path
            .iter()
            .map(|cell| format!("({},{})", cell.x, cell.y))
            .collect();
        write!(report, "{}", route.join(" "))?;
    } else {
        write!(report, "path: none, the goal is unreachable")?;
    }

    Ok(report)
}
