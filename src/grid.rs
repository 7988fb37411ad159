//! Grid model module.
//!
//! This module contains the `Grid` struct and the coordinate types used by the search algorithms,
//! including the reference maze layout and the parser for text map files.

use color_eyre::eyre::{bail, ensure, OptionExt as _, Result};

/// Position of a single cell in the grid.
///
/// The `x` coordinate is the column and the `y` coordinate is the row, both 0-indexed from the
/// top-left corner of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Cell {
    /// Column index.
    pub(crate) x: usize,
    /// Row index.
    pub(crate) y: usize,
}

impl Cell {
    /// Builds a new cell from a column and a row.
    pub(crate) const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the neighboring cell one step in the given direction.
    ///
    /// Stepping below zero yields `None`, which callers treat like any other out-of-bounds
    /// position. The upper bound is not checked here.
    pub(crate) const fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Self { x, y })
    }
}

/// Kind of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CellKind {
    /// Traversable cell, written as `0` in map files.
    Open,
    /// Blocking cell, written as `1` in map files.
    Wall,
}

/// Cardinal direction used when expanding a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last column.
    Right,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
}

impl Direction {
    /// Expansion order shared by both search algorithms.
    ///
    /// The order decides which route depth-first search finds first and how breadth-first search
    /// breaks ties between paths of equal length, so results are only reproducible while it stays
    /// fixed.
    pub(crate) const PRIORITY: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the column and row offsets of a single step in this direction.
    pub(crate) const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// Maze layout with a designated start and goal.
///
/// Cells are stored row-major. The layout never changes after construction, and both the start
/// and the goal are guaranteed to be open and in bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Grid {
    /// Number of columns.
    ///
    /// This field holds the length of every row, which the parser checks to be the same across the
    /// whole map.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell kinds.
    ///
    /// This field holds `width * height` entries, so the kind of the cell at column `x` and row `y`
    /// lives at index `y * width + x`. Positions outside the grid have no entry and are reported
    /// as `None` by [`Grid::kind`].
    cells: Vec<CellKind>,
    /// Cell where every search begins.
    ///
    /// This field holds the position marked `S` in map files. It is always in bounds and open.
    start: Cell,
    /// Cell every search tries to reach.
    ///
    /// This field holds the position marked `G` in map files. It is always in bounds and open, but
    /// nothing guarantees that it can be reached from the start.
    goal: Cell,
}

/// Wall coordinates of the reference maze.
const REFERENCE_WALLS: [Cell; 12] = [
    Cell::new(2, 1),
    Cell::new(3, 1),
    Cell::new(1, 2),
    Cell::new(5, 2),
    Cell::new(3, 3),
    Cell::new(5, 3),
    Cell::new(1, 4),
    Cell::new(3, 4),
    Cell::new(5, 5),
    Cell::new(2, 6),
    Cell::new(3, 6),
    Cell::new(4, 6),
];

/// Side length of the reference maze.
const REFERENCE_SIZE: usize = 8;

impl Grid {
    /// Builds the 8x8 reference maze with the start in the top-left corner and the goal in the
    /// bottom-right corner.
    pub(crate) fn reference() -> Self {
        let mut cells = vec![CellKind::Open; REFERENCE_SIZE * REFERENCE_SIZE];
        for wall in REFERENCE_WALLS {
            if let Some(slot) = cells.get_mut(wall.y * REFERENCE_SIZE + wall.x) {
                *slot = CellKind::Wall;
            }
        }

        Self {
            width: REFERENCE_SIZE,
            height: REFERENCE_SIZE,
            cells,
            start: Cell::new(0, 0),
            goal: Cell::new(REFERENCE_SIZE - 1, REFERENCE_SIZE - 1),
        }
    }

    /// Parses a grid from the contents of a map file.
    ///
    /// Each line is a row made of `0` (open), `1` (wall), `S` (start) and `G` (goal). Blank lines
    /// before the first row and after the last one are ignored, and so is whitespace on either side
    /// of every row, so indented maps parse the same as flush ones.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    /// - The input holds no rows
    /// - Rows differ in width
    /// - A row contains a character outside of the map alphabet
    /// - The start or the goal is missing or appears more than once
    pub(crate) fn parse(input: &str) -> Result<Self> {
        let mut lines: Vec<&str> = input
            .lines()
            .map(str::trim)
            .skip_while(|line| line.is_empty())
            .collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            let _ = lines.pop();
        }

        let width = lines
            .first()
            .map(|line| line.chars().count())
            .ok_or_eyre("map contains no rows")?;

        let mut cells = Vec::with_capacity(width * lines.len());
        let mut start = None;
        let mut goal = None;

        for (y, line) in lines.iter().enumerate() {
            ensure!(
                line.chars().count() == width,
                "row {y} has {} cells, expected {width}",
                line.chars().count()
            );

            for (x, symbol) in line.chars().enumerate() {
                let kind = match symbol {
                    '0' => CellKind::Open,
                    '1' => CellKind::Wall,
                    'S' => {
                        ensure!(start.is_none(), "map has more than one start cell");
                        start = Some(Cell::new(x, y));
                        CellKind::Open
                    }
                    'G' => {
                        ensure!(goal.is_none(), "map has more than one goal cell");
                        goal = Some(Cell::new(x, y));
                        CellKind::Open
                    }
                    other => bail!("unexpected character {other:?} at column {x}, row {y}"),
                };
                cells.push(kind);
            }
        }

        Ok(Self {
            width,
            height: lines.len(),
            cells,
            start: start.ok_or_eyre("map has no start cell")?,
            goal: goal.ok_or_eyre("map has no goal cell")?,
        })
    }

    /// Number of columns.
    pub(crate) const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub(crate) const fn height(&self) -> usize {
        self.height
    }

    /// Cell where every search begins.
    pub(crate) const fn start(&self) -> Cell {
        self.start
    }

    /// Cell every search tries to reach.
    pub(crate) const fn goal(&self) -> Cell {
        self.goal
    }

    /// Checks whether a cell lies within the grid.
    pub(crate) const fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Returns the kind of a cell, or `None` if the cell is out of bounds.
    pub(crate) fn kind(&self, cell: Cell) -> Option<CellKind> {
        if !self.in_bounds(cell) {
            return None;
        }

        self.cells.get(self.index(cell)).copied()
    }

    /// Checks whether a cell is in bounds and traversable.
    pub(crate) fn is_open(&self, cell: Cell) -> bool {
        self.kind(cell) == Some(CellKind::Open)
    }

    /// Row-major index of an in-bounds cell.
    pub(crate) const fn index(&self, cell: Cell) -> usize {
        cell.y * self.width + cell.x
    }

    /// Iterates over every cell together with its kind, row by row.
    pub(crate) fn cells(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        self.cells.iter().enumerate().map(|(idx, kind)| {
            (Cell::new(idx % self.width, idx / self.width), *kind)
        })
    }
}
