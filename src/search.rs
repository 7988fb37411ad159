//! Search engine module.
//!
//! This module contains the depth-first and breadth-first traversals over a [`Grid`]. Both record
//! the order in which cells are visited, for playback, next to the path they find from the start to
//! the goal.

use std::collections::VecDeque;

use clap::ValueEnum;
use log::debug;

use crate::grid::{Cell, Direction, Grid};

/// Available search algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Algorithm {
    /// Recursive-order depth-first search, exploring up, right, down and left.
    #[value(alias = "dfs")]
    DepthFirst,
    /// Level-order breadth-first search, which always finds a shortest path.
    #[value(alias = "bfs")]
    BreadthFirst,
}

impl Algorithm {
    /// Human-readable name used in the interface.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::DepthFirst => "Depth-first search",
            Self::BreadthFirst => "Breadth-first search",
        }
    }

    /// Runs the algorithm from the grid's start towards its goal.
    ///
    /// A fresh search context is created for every call, so no state leaks between runs.
    pub(crate) fn search(self, grid: &Grid) -> SearchOutcome {
        let mut context = SearchContext::new(grid);
        match self {
            Self::DepthFirst => depth_first(grid, &mut context),
            Self::BreadthFirst => breadth_first(grid, &mut context),
        }

        let outcome = context.finish();
        debug!(
            "{} visited {} cells, path of {} cells",
            self.label(),
            outcome.visit_order.len(),
            outcome.path.len()
        );

        outcome
    }
}

/// Result of a single search run.
///
/// This structure holds everything playback needs to replay a run: the cells in the order they
/// were explored and the route that was found. Both lists are owned by the outcome, so a later run
/// never alters one that is already being shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SearchOutcome {
    /// Every explored cell, in the order it was marked visited.
    ///
    /// This field holds each cell at most once, starting with the grid's start. When the goal is
    /// unreachable it lists every cell reachable from the start.
    pub(crate) visit_order: Vec<Cell>,
    /// Cells from the start to the goal inclusive, or empty when the goal is unreachable.
    ///
    /// This field holds a route of orthogonally adjacent open cells. For breadth-first search it is
    /// a shortest one, and for depth-first search it is the first one found in direction priority.
    pub(crate) path: Vec<Cell>,
}

impl SearchOutcome {
    /// Checks whether the search reached the goal.
    pub(crate) fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Mutable state shared by the algorithms during one run.
struct SearchContext {
    /// Row-major visited flags, parallel to the grid cells.
    visited: Vec<bool>,
    /// Cells in the order they were marked visited.
    visit_order: Vec<Cell>,
    /// Path being built, or the final one once the run ends.
    path: Vec<Cell>,
}

impl SearchContext {
    /// Builds an empty context sized for the grid.
    fn new(grid: &Grid) -> Self {
        Self {
            visited: vec![false; grid.width() * grid.height()],
            visit_order: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Checks whether a cell can be entered: in bounds, open and not yet visited.
    fn can_enter(&self, grid: &Grid, cell: Cell) -> bool {
        grid.is_open(cell) && self.visited.get(grid.index(cell)) == Some(&false)
    }

    /// Marks a cell as visited and records it in the visit order.
    fn visit(&mut self, grid: &Grid, cell: Cell) {
        if let Some(flag) = self.visited.get_mut(grid.index(cell)) {
            *flag = true;
        }
        self.visit_order.push(cell);
    }

    /// Consumes the context into the outcome of the run.
    fn finish(self) -> SearchOutcome {
        SearchOutcome {
            visit_order: self.visit_order,
            path: self.path,
        }
    }
}

/// One pending cell on the depth-first stack.
struct Frame {
    /// Cell being expanded.
    cell: Cell,
    /// Position in [`Direction::PRIORITY`] of the next neighbor to try.
    next: usize,
}

/// Depth-first traversal with speculative path pushes and backtracking.
///
/// The explicit stack reproduces the call order of the recursive formulation: a cell is entered,
/// then each neighbor is tried in priority order until one of them leads to the goal. A cell whose
/// neighbors all fail is popped from the path again. On failure the path ends up empty.
fn depth_first(grid: &Grid, context: &mut SearchContext) {
    let goal = grid.goal();
    let mut stack = Vec::new();

    if !enter(grid, context, grid.start(), &mut stack) {
        return;
    }
    if grid.start() == goal {
        return;
    }

    while let Some(frame) = stack.last_mut() {
        let Some(direction) = Direction::PRIORITY.get(frame.next).copied() else {
            let _ = stack.pop();
            let _ = context.path.pop();
            continue;
        };
        frame.next += 1;

        let Some(neighbor) = frame.cell.step(direction) else {
            continue;
        };
        if enter(grid, context, neighbor, &mut stack) && neighbor == goal {
            return;
        }
    }
}

/// Enters a cell for depth-first search if it can be entered, pushing it on the path and the stack.
fn enter(grid: &Grid, context: &mut SearchContext, cell: Cell, stack: &mut Vec<Frame>) -> bool {
    if !context.can_enter(grid, cell) {
        return false;
    }

    context.visit(grid, cell);
    context.path.push(cell);
    stack.push(Frame { cell, next: 0 });

    true
}

/// Breadth-first traversal where every frontier entry carries its own path from the start.
///
/// Cells are marked visited when enqueued rather than when dequeued, so no cell enters the frontier
/// twice.
fn breadth_first(grid: &Grid, context: &mut SearchContext) {
    let start = grid.start();
    if !context.can_enter(grid, start) {
        return;
    }

    context.visit(grid, start);
    let mut frontier = VecDeque::from([(start, vec![start])]);

    while let Some((cell, path)) = frontier.pop_front() {
        if cell == grid.goal() {
            context.path = path;
            return;
        }

        for direction in Direction::PRIORITY {
            let Some(neighbor) = cell.step(direction) else {
                continue;
            };
            if !context.can_enter(grid, neighbor) {
                continue;
            }

            context.visit(grid, neighbor);
            let mut next_path = path.clone();
            next_path.push(neighbor);
            frontier.push_back((neighbor, next_path));
        }
    }
}
