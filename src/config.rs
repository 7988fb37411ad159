//! Command-line configuration and logging setup.

use std::{
    fs::{self, File},
    path::PathBuf,
    time::Duration,
};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr as _};
use env_logger::{Builder, Env, Target};
use log::info;

use crate::{
    grid::Grid,
    playback::{PATH_INTERVAL_MS, VISIT_INTERVAL_MS},
    search::Algorithm,
};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// Map file to load instead of the built-in 8x8 maze.
    ///
    /// One row per line: `0` open, `1` wall, `S` start, `G` goal.
    #[arg(long, value_name = "PATH")]
    pub(crate) map: Option<PathBuf>,
    /// Delay between two revealed visited cells, in milliseconds.
    #[arg(
        long,
        value_name = "MS",
        default_value_t = VISIT_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub(crate) visit_interval: u64,
    /// Delay between two revealed path cells, in milliseconds.
    #[arg(
        long,
        value_name = "MS",
        default_value_t = PATH_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub(crate) path_interval: u64,
    /// Print the result of one search and exit instead of opening the interface.
    #[arg(long, value_enum, value_name = "ALGORITHM")]
    pub(crate) solve: Option<Algorithm>,
    /// File to write log records to, filtered by `RUST_LOG`.
    #[arg(long, value_name = "PATH")]
    pub(crate) log_file: Option<PathBuf>,
}

/// Validated application configuration.
///
/// This structure holds the maze to solve, the playback timing and the run mode, as resolved from
/// the command line.
#[derive(Debug)]
pub struct Config {
    /// Maze shown on the board and handed to the search algorithms.
    pub(crate) grid: Grid,
    /// Delay between two ticks of the visit phase.
    pub(crate) visit_interval: Duration,
    /// Delay between two ticks of the path phase.
    pub(crate) path_interval: Duration,
    /// Algorithm to run headlessly, if the interface should not be opened.
    pub(crate) solve: Option<Algorithm>,
    /// Destination of log records.
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: Grid::reference(),
            visit_interval: Duration::from_millis(VISIT_INTERVAL_MS),
            path_interval: Duration::from_millis(PATH_INTERVAL_MS),
            solve: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses the process arguments, loads the requested map and sets up logging.
    ///
    /// # Errors
    ///
    /// This function may return errors if the map file cannot be read or parsed, if the log file
    /// cannot be created or if a logger was already installed.
    pub fn load() -> Result<Self> {
        let config = Self::from_cli(Cli::parse())?;
        config.init_logging()?;

        info!(
            "loaded {}x{} maze, start {:?}, goal {:?}",
            config.grid.width(),
            config.grid.height(),
            config.grid.start(),
            config.grid.goal()
        );

        Ok(config)
    }

    /// Resolves parsed arguments into a configuration.
    ///
    /// # Errors
    ///
    /// This function may return errors if the map file cannot be read or parsed.
    pub(crate) fn from_cli(cli: Cli) -> Result<Self> {
        let grid = match &cli.map {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read map file {}", path.display()))?;
                Grid::parse(&contents)
                    .wrap_err_with(|| format!("invalid map file {}", path.display()))?
            }
            None => Grid::reference(),
        };

        Ok(Self {
            grid,
            visit_interval: Duration::from_millis(cli.visit_interval),
            path_interval: Duration::from_millis(cli.path_interval),
            solve: cli.solve,
            log_file: cli.log_file,
        })
    }

    /// Installs the logger.
    ///
    /// Records go to the log file when one is given. Without one, the headless mode logs to
    /// standard error while the interface logs nothing, since writing to the terminal would
    /// corrupt the screen.
    fn init_logging(&self) -> Result<()> {
        let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

        match &self.log_file {
            Some(path) => {
                let file = File::create(path)
                    .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
                let _ = builder.target(Target::Pipe(Box::new(file)));
            }
            None if self.solve.is_some() => {}
            None => return Ok(()),
        }

        builder.try_init()?;

        Ok(())
    }
}
