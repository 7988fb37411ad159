//! Board painting module.
//!
//! This module turns the grid and the playback state into a list of primitive drawing commands in
//! board pixel space, and paints such a list onto a ratatui [`Canvas`](ratatui::widgets::canvas)
//! context. Board pixels have their origin in the top-left corner with `y` growing downwards, and
//! every cell spans [`CELL_SIZE_PX`] pixels on each side.

use color_eyre::eyre::Result;
use ratatui::{
    style::{Color, Style},
    text::Line,
    widgets::canvas::{Context, Line as CanvasLine, Rectangle},
};

use crate::{
    grid::{Cell, CellKind, Grid},
    playback::Playback,
};

/// Side length of one cell in board pixels.
pub(crate) const CELL_SIZE_PX: u16 = 100;

/// Radius of the start and goal markers in board pixels.
const MARKER_RADIUS_PX: f64 = 30.0;

/// Inset of a visited-cell highlight from the cell border.
const VISIT_INSET_PX: f64 = 5.0;

/// Inset of a path-cell highlight from the cell border.
const PATH_INSET_PX: f64 = 10.0;

/// Color of the cell borders.
const GRID_LINE_COLOR: Color = Color::Rgb(0xdd, 0xdd, 0xdd);
/// Color of wall cells.
const WALL_COLOR: Color = Color::Rgb(0x2c, 0x3e, 0x50);
/// Color of the start marker.
const START_COLOR: Color = Color::Rgb(0x27, 0xae, 0x60);
/// Color of the goal marker.
const GOAL_COLOR: Color = Color::Rgb(0xe7, 0x4c, 0x3c);
/// Color of visited-cell highlights.
const VISIT_COLOR: Color = Color::Rgb(0xad, 0xd6, 0xf0);
/// Color of path-cell highlights.
const PATH_COLOR: Color = Color::Rgb(0xf3, 0x9c, 0x12);
/// Color of marker labels.
const LABEL_COLOR: Color = Color::White;

/// Axis-aligned rectangle in board pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PixelRect {
    /// Left edge.
    pub(crate) x: f64,
    /// Top edge.
    pub(crate) y: f64,
    /// Horizontal extent.
    pub(crate) width: f64,
    /// Vertical extent.
    pub(crate) height: f64,
}

impl PixelRect {
    /// Returns the pixel area of a cell shrunk by `inset` on every side.
    fn of_cell(cell: Cell, inset: f64) -> Result<Self> {
        Ok(Self {
            x: to_px(cell.x)? + inset,
            y: to_px(cell.y)? + inset,
            width: 2.0_f64.mul_add(-inset, f64::from(CELL_SIZE_PX)),
            height: 2.0_f64.mul_add(-inset, f64::from(CELL_SIZE_PX)),
        })
    }

    /// Center point of the rectangle.
    fn center(self) -> (f64, f64) {
        (self.x + self.width / 2., self.y + self.height / 2.)
    }
}

/// Primitive drawing instruction for the rendering surface.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawCommand {
    /// Erase a region.
    ClearRect(PixelRect),
    /// Draw the outline of a rectangle.
    StrokeRect(PixelRect, Color),
    /// Fill a rectangle.
    FillRect(PixelRect, Color),
    /// Fill a circle around a center point.
    FillCircle {
        /// Horizontal center.
        x: f64,
        /// Vertical center.
        y: f64,
        /// Radius.
        radius: f64,
        /// Fill color.
        color: Color,
    },
    /// Draw a label centered on a point.
    Text {
        /// Horizontal center.
        x: f64,
        /// Vertical center.
        y: f64,
        /// Label content.
        text: &'static str,
        /// Text color.
        color: Color,
    },
}

/// Converts a cell index into its offset in board pixels.
fn to_px(index: usize) -> Result<f64> {
    Ok(f64::from(u32::try_from(index)?) * f64::from(CELL_SIZE_PX))
}

/// Returns the width and height of the board in pixels.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn board_size(grid: &Grid) -> Result<(f64, f64)> {
    Ok((to_px(grid.width())?, to_px(grid.height())?))
}

/// Builds the drawing commands for the board and the highlights revealed so far.
///
/// The board is cleared, every cell gets a border, walls are filled and the start and goal get
/// labeled markers. Visited highlights come next and path highlights last, so the path is drawn
/// over the cells it shares with the visit order.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn paint_board(grid: &Grid, playback: &Playback) -> Result<Vec<DrawCommand>> {
    let (width, height) = board_size(grid)?;
    let mut commands = vec![DrawCommand::ClearRect(PixelRect {
        x: 0.,
        y: 0.,
        width,
        height,
    })];

    for (cell, kind) in grid.cells() {
        let area = PixelRect::of_cell(cell, 0.)?;
        commands.push(DrawCommand::StrokeRect(area, GRID_LINE_COLOR));

        if kind == CellKind::Wall {
            commands.push(DrawCommand::FillRect(area, WALL_COLOR));
        }

        let marker = if cell == grid.start() {
            Some(("S", START_COLOR))
        } else if cell == grid.goal() {
            Some(("G", GOAL_COLOR))
        } else {
            None
        };
        if let Some((text, color)) = marker {
            let (x, y) = area.center();
            commands.push(DrawCommand::FillCircle {
                x,
                y,
                radius: MARKER_RADIUS_PX,
                color,
            });
            commands.push(DrawCommand::Text {
                x,
                y,
                text,
                color: LABEL_COLOR,
            });
        }
    }

    for cell in playback.revealed_visits() {
        commands.push(DrawCommand::FillRect(
            PixelRect::of_cell(*cell, VISIT_INSET_PX)?,
            VISIT_COLOR,
        ));
    }
    for cell in playback.revealed_path() {
        commands.push(DrawCommand::FillRect(
            PixelRect::of_cell(*cell, PATH_INSET_PX)?,
            PATH_COLOR,
        ));
    }

    Ok(commands)
}

/// Mapping from board pixels onto the resolution of a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CanvasScale {
    /// Board height in pixels, used to flip the vertical axis.
    pub(crate) height_px: f64,
    /// Vertical distance between two rows of canvas dots, in board pixels.
    pub(crate) fill_step_px: f64,
    /// Width of one terminal column, in whole board pixels.
    pub(crate) column_px: i32,
}

/// Paints drawing commands onto a canvas context.
///
/// Canvas coordinates grow upwards, so every vertical position is flipped against the board
/// height. Filled shapes are rasterized as horizontal lines one dot row apart.
pub(crate) fn paint_canvas(ctx: &mut Context<'_>, commands: &[DrawCommand], scale: CanvasScale) {
    let flip = |y: f64| scale.height_px - y;

    for command in commands {
        match command {
            // The canvas starts from an empty buffer on every frame.
            DrawCommand::ClearRect(_) => {}
            DrawCommand::StrokeRect(rect, color) => ctx.draw(&Rectangle {
                x: rect.x,
                y: flip(rect.y + rect.height),
                width: rect.width,
                height: rect.height,
                color: *color,
            }),
            DrawCommand::FillRect(rect, color) => {
                let mut offset = 0.;
                while offset <= rect.height {
                    let y = flip(rect.y + offset);
                    ctx.draw(&CanvasLine::new(rect.x, y, rect.x + rect.width, y, *color));
                    offset += scale.fill_step_px;
                }
            }
            DrawCommand::FillCircle {
                x,
                y,
                radius,
                color,
            } => {
                let mut dy = -radius;
                while dy <= *radius {
                    let half_chord = dy.mul_add(-dy, radius * radius).max(0.).sqrt();
                    let row = flip(y + dy);
                    ctx.draw(&CanvasLine::new(x - half_chord, row, x + half_chord, row, *color));
                    dy += scale.fill_step_px;
                }
            }
            DrawCommand::Text { x, y, text, color } => {
                let text_px = i32::try_from(text.chars().count())
                    .unwrap_or(i32::MAX)
                    .saturating_mul(scale.column_px);
                let left = x - f64::from(rounded_div::i32(text_px, 2));
                ctx.print(left, flip(*y), Line::styled(*text, Style::default().fg(*color)));
            }
        }
    }
}
