//! Reserialize command handler

use crate::config::Config;
use anyhow::{anyhow, Result};
use bl4_builder::{normalize_deserialized, reserialize_encoded, HttpReserializer, Reserializer};

/// Handle the reserialize command
pub fn handle(deserialized: &str, endpoint: Option<&str>, config: &Config) -> Result<()> {
    let gateway = HttpReserializer::new(endpoint.unwrap_or(config.endpoint()));
    println!("{}", run(&gateway, deserialized)?);
    Ok(())
}

/// Send one string and return the serial
pub fn run<G: Reserializer>(gateway: &G, deserialized: &str) -> Result<String> {
    tracing::debug!(deserialized = %normalize_deserialized(deserialized), "reserializing");
    reserialize_encoded(gateway, deserialized).map_err(|e| anyhow!(e))
}
