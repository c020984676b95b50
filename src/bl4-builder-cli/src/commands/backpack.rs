//! Backpack export command handler

use anyhow::{Context, Result};
use bl4_builder::Backpack;
use std::fs;
use std::path::Path;

/// Handle the backpack command
pub fn handle(serials: &[String], input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let mut all: Vec<String> = serials.to_vec();

    if let Some(path) = input {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read serials from {}", path.display()))?;
        all.extend(contents.lines().map(str::to_string));
    }

    let (backpack, rejected) = collect(&all);
    for serial in &rejected {
        eprintln!("Skipping invalid serial: {}", serial);
    }

    let block = backpack.render();
    match output {
        Some(path) => {
            fs::write(path, &block)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} serials to {}", backpack.len(), path.display());
        }
        None => print!("{}", block),
    }

    Ok(())
}

/// Store every non-blank serial; returns the backpack and the rejected ones
pub fn collect(serials: &[String]) -> (Backpack, Vec<String>) {
    let mut backpack = Backpack::new();
    let mut rejected = Vec::new();

    for serial in serials.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if backpack.store(serial).is_err() {
            rejected.push(serial.to_string());
        }
    }

    (backpack, rejected)
}
