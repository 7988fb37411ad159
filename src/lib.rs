//! Terminal visualizer for depth-first and breadth-first search on a grid maze.
//!
//! The crate runs either search over a small maze and replays the result in two timed phases:
//! first every cell in the order it was explored, then the path from the start to the goal. The
//! [`App`] drives the interactive terminal interface, while [`solve_report`] prints the outcome of
//! a single search without opening it.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod config;
mod events;
mod grid;
mod playback;
mod render;
mod report;
mod search;
mod types;
mod ui;

pub use app::App;
pub use config::Config;
pub use report::solve_report;
