//! routegen - command-line tool generating a router module from annotated handlers.
//!
//! # Usage
//!
//! ```bash
//! routegen [OPTIONS] [ROOT]
//! ```
//!
//! # Examples
//!
//! Regenerate `router_gen.rs` for the handlers in the current directory:
//! ```bash
//! ROUTEGEN_CRATE_ROOT=$PWD/../.. routegen
//! ```
//!
//! Inspect what would be registered:
//! ```bash
//! routegen src/api --crate-root . --list
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use routegen::cli;

fn main() -> Result<()> {
    // The verbose flag decides the log level, so parse before the logger exists.
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("routegen starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("Router generation completed successfully");

    Ok(())
}
