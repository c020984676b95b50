//! Command dispatch functions
//!
//! Breaks up the main match statement into focused dispatch functions.

use anyhow::Result;

use crate::cli::*;
use crate::commands;
use crate::config::Config;

/// Dispatch a parsed command line
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let catalog_dir = cli.catalog_dir.clone().or_else(|| config.catalog_dir.clone());

    match cli.command {
        Commands::Build(args) => commands::build::handle(args, catalog_dir.as_deref(), &config),

        Commands::Session {
            mode,
            offline,
            endpoint,
            debounce_ms,
        } => commands::session::handle(
            catalog_dir.as_deref(),
            &config,
            mode,
            offline,
            endpoint,
            debounce_ms,
        ),

        Commands::Catalog { command } => commands::catalog::handle(command, catalog_dir.as_deref()),

        Commands::Backpack {
            serials,
            input,
            output,
        } => commands::backpack::handle(&serials, input.as_deref(), output.as_deref()),

        Commands::Reserialize {
            deserialized,
            endpoint,
        } => commands::reserialize::handle(&deserialized, endpoint.as_deref(), &config),

        Commands::Configure {
            endpoint,
            debounce_ms,
            mode,
            show,
        } => dispatch_configure(cli.catalog_dir, endpoint, debounce_ms, mode, show),
    }
}

/// Dispatch the configure command; the global `--catalog-dir` is what gets saved
fn dispatch_configure(
    catalog_dir: Option<std::path::PathBuf>,
    endpoint: Option<String>,
    debounce_ms: Option<u64>,
    mode: Option<bl4_builder::OutputMode>,
    show: bool,
) -> Result<()> {
    let changes = commands::configure::Changes {
        catalog_dir,
        endpoint,
        debounce_ms,
        mode,
    };
    commands::configure::handle(changes, show)
}
