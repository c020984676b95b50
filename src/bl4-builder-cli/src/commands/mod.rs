//! Command handlers for bl4-builder CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod backpack;
pub mod build;
pub mod catalog;
pub mod configure;
pub mod reserialize;
pub mod session;

use anyhow::{bail, Context, Result};
use bl4_builder::{manufacturer_by_code, weapon_type_by_code, Catalog};
use std::path::Path;
use std::sync::Arc;

/// Load the catalog from a directory, or the bundled one when none is given
pub fn load_catalog(dir: Option<&Path>) -> Result<Arc<Catalog>> {
    let catalog = match dir {
        Some(dir) => Catalog::load(dir)
            .with_context(|| format!("Failed to load catalog from {}", dir.display()))?,
        None => Catalog::embedded().context("Bundled catalog is invalid")?,
    };
    Ok(Arc::new(catalog))
}

/// Resolve a manufacturer given by catalog name (any case) or short code
pub fn resolve_manufacturer(catalog: &Catalog, input: &str) -> Result<String> {
    let input = input.trim();
    if let Some(name) = catalog
        .manufacturers()
        .find(|m| m.eq_ignore_ascii_case(input))
    {
        return Ok(name.to_string());
    }

    if let Some(code_name) = manufacturer_by_code(input) {
        if catalog.manufacturers().any(|name| name == code_name) {
            return Ok(code_name.to_string());
        }
    }

    bail!(
        "Unknown manufacturer '{}'. Available: {}",
        input,
        catalog.manufacturers().collect::<Vec<_>>().join(", ")
    )
}

/// Resolve a weapon type given by catalog name (any case) or short code
pub fn resolve_weapon_type(catalog: &Catalog, manufacturer: &str, input: &str) -> Result<String> {
    let input = input.trim();
    let types = catalog.weapon_types(manufacturer);

    if let Some(name) = types.iter().find(|t| t.eq_ignore_ascii_case(input)) {
        return Ok(name.to_string());
    }

    if let Some(wt) = weapon_type_by_code(input) {
        if types.contains(&wt.name) {
            return Ok(wt.name.to_string());
        }
    }

    bail!(
        "{} has no weapon type '{}'. Available: {}",
        manufacturer,
        input,
        types.join(", ")
    )
}

/// Treat "-", "none" and empty input as a request to clear
pub fn optional_value(input: &str) -> Option<&str> {
    match input.trim() {
        "" | "-" | "none" => None,
        value => Some(value),
    }
}
