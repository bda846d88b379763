use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tokio::runtime::Runtime;

use stackhaul::cli::{Args, Commands};
use stackhaul::commands;

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logging(args.verbose)?;

    match &args.command {
        Commands::Upload(opts) => {
            let runtime = Runtime::new().context("Failed to create async runtime")?;
            runtime.block_on(commands::upload::run(opts))
        }
        Commands::Clean(opts) => commands::clean::run(opts),
    }
}

/// Initialize logging with the specified verbosity level
fn initialize_logging(verbose: bool) -> Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;
    Ok(())
}
