//! Core CLI definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use super::build::BuildArgs;
use super::catalog::CatalogCommand;
use bl4_builder::OutputMode;

#[derive(Parser)]
#[command(name = "bl4-builder")]
#[command(about = "Borderlands 4 Weapon Builder", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Catalog directory (weapons.json, rarities.json, elements.json)
    #[arg(long, global = true, env = "BL4_BUILDER_CATALOG")]
    pub catalog_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a weapon from flags and print its deserialized string
    #[command(visible_alias = "b")]
    Build(BuildArgs),

    /// Interactive builder; every edit re-encodes and reserializes
    #[command(visible_alias = "s")]
    Session {
        /// Output mode for the encoded string
        #[arg(short, long)]
        mode: Option<OutputMode>,

        /// Do not send edits to the reserialize service
        #[arg(long)]
        offline: bool,

        /// Reserialize endpoint
        #[arg(long, env = "BL4_BUILDER_ENDPOINT")]
        endpoint: Option<String>,

        /// Quiet period before an edit is sent, in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// Browse the catalog
    #[command(visible_alias = "c")]
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    /// Render serials as backpack slot entries
    #[command(visible_alias = "bp")]
    Backpack {
        /// Serials to export (each must start with '@')
        serials: Vec<String>,

        /// Read serials from a file, one per line
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the block to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send a deserialized string to the reserialize service
    #[command(visible_alias = "r")]
    Reserialize {
        /// Deserialized string (trailing '|' is added when missing)
        deserialized: String,

        /// Reserialize endpoint
        #[arg(long, env = "BL4_BUILDER_ENDPOINT")]
        endpoint: Option<String>,
    },

    /// Configure default settings (`--catalog-dir` sets the default catalog)
    Configure {
        /// Set the reserialize endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Set the reserialize quiet period in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,

        /// Set the default output mode
        #[arg(long)]
        mode: Option<OutputMode>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
