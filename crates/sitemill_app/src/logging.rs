//! Terminal logging initialization for the sitemill binary.

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, ConfigBuilder, TermLogger, TerminalMode};

/// Initialize the terminal logger at the level implied by the verbosity
/// flags. Safe to call once per process.
pub fn initialize(verbose: u8, quiet: bool) {
    let level = mill_logging::level_filter(verbose, quiet);
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        build_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
