//! MVC Routes - command-line tool listing a Rust MVC application's HTTP endpoints.
//!
//! Reads the target's route table and controller doc comments and prints a wiki page
//! describing every documented endpoint.
//!
//! # Usage
//!
//! ```bash
//! mvc-routes [OPTIONS] <TARGET>
//! ```
//!
//! # Examples
//!
//! Full page, grouped by controller:
//! ```bash
//! mvc-routes ./my-app -o endpoints.wiki
//! ```
//!
//! One-table summary, routes taken from a manifest:
//! ```bash
//! mvc-routes ./my-app -f short -r routes.yaml
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use mvc_routes::cli;

fn main() -> Result<()> {
    // Parse first so --verbose can pick the log level, then validate once logging is up
    let args = cli::CliArgs::parse();

    cli::logger(args.verbose, std::env::var("RUST_LOG").ok().as_deref()).init();

    info!("MVC Routes starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("Endpoint listing completed successfully");

    Ok(())
}
