//! CLI argument definitions for bl4-builder
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod build;
mod catalog;
mod core;

pub use build::BuildArgs;
pub use catalog::CatalogCommand;
pub use core::{Cli, Commands};
