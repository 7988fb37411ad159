//! This crate contains the source code for the binary of the gridwalk search visualizer.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use color_eyre::{eyre::Result, install};
use gridwalk::{solve_report, App, Config};

fn main() -> Result<()> {
    install()?;

    let config = Config::load()?;
    if let Some(report) = solve_report(&config)? {
        println!("{report}");
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let result = App::new(config).run(&mut terminal);
    ratatui::restore();

    result
}
