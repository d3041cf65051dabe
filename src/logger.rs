use std::env;

use crate::prelude::*;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Environment variable holding the log level, e.g. `PSTREE_LOG=info`
pub const LOG_LEVEL_ENV: &str = "PSTREE_LOG";

fn log_level(debug: bool) -> log::LevelFilter {
    if debug {
        return log::LevelFilter::Debug;
    }
    env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|log_level| log_level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn)
}

/// Install the logger. Everything goes to stderr, stdout only carries the tree.
pub fn init_logger(debug: bool) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Debug)
        .build();

    TermLogger::init(
        log_level(debug),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize the logger")
}
