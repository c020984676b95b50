//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up bl4-builder defaults.

use crate::config::Config;
use anyhow::Result;
use bl4_builder::OutputMode;
use std::path::{Path, PathBuf};

/// Settings given on the command line; `None` leaves a setting unchanged
#[derive(Debug, Default)]
pub struct Changes {
    pub catalog_dir: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub debounce_ms: Option<u64>,
    pub mode: Option<OutputMode>,
}

impl Changes {
    fn is_empty(&self) -> bool {
        self.catalog_dir.is_none()
            && self.endpoint.is_none()
            && self.debounce_ms.is_none()
            && self.mode.is_none()
    }

    /// Apply to a config; returns a line per changed setting
    fn apply(self, config: &mut Config) -> Vec<String> {
        let mut changed = Vec::new();
        if let Some(dir) = self.catalog_dir {
            changed.push(format!("Catalog directory: {}", dir.display()));
            config.catalog_dir = Some(dir);
        }
        if let Some(endpoint) = self.endpoint {
            changed.push(format!("Endpoint: {}", endpoint));
            config.endpoint = Some(endpoint);
        }
        if let Some(ms) = self.debounce_ms {
            changed.push(format!("Debounce: {} ms", ms));
            config.debounce_ms = Some(ms);
        }
        if let Some(mode) = self.mode {
            changed.push(format!("Output mode: {}", mode));
            config.output_mode = Some(mode);
        }
        changed
    }
}

/// Handle the configure command
pub fn handle(changes: Changes, show: bool) -> Result<()> {
    let path = Config::config_path()?;
    for line in configure(&path, changes, show)? {
        println!("{}", line);
    }
    Ok(())
}

/// Apply and save any changes, then show the result when asked.
///
/// With neither changes nor `show`, returns the usage text.
fn configure(path: &Path, changes: Changes, show: bool) -> Result<Vec<String>> {
    if changes.is_empty() && !show {
        return Ok(usage());
    }

    let mut config = Config::load_from(path)?;
    let mut out = Vec::new();

    if !changes.is_empty() {
        out.extend(changes.apply(&mut config));
        config.save_to(path)?;
        out.push(format!("Config saved to: {}", path.display()));
    }

    if show {
        out.extend(describe(&config, path));
    }

    Ok(out)
}

/// Current configuration, one line per setting
fn describe(config: &Config, path: &Path) -> Vec<String> {
    let catalog = match &config.catalog_dir {
        Some(dir) => dir.display().to_string(),
        None => "(bundled catalog)".to_string(),
    };
    vec![
        format!("Catalog directory: {}", catalog),
        format!("Endpoint: {}", config.endpoint()),
        format!("Debounce: {} ms", config.debounce().as_millis()),
        format!("Output mode: {}", config.output_mode()),
        format!("Config file: {}", path.display()),
    ]
}

fn usage() -> Vec<String> {
    vec![
        "Usage: bl4-builder configure --catalog-dir DIR".to_string(),
        "   or: bl4-builder configure --endpoint URL --debounce-ms 600 --mode ids".to_string(),
        "   or: bl4-builder configure --show".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_prints_usage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let lines = configure(&path, Changes::default(), false).unwrap();
        assert!(lines[0].starts_with("Usage:"));
        assert!(!path.exists());
    }

    #[test]
    fn test_show_with_changes_saves_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let changes = Changes {
            debounce_ms: Some(250),
            ..Default::default()
        };

        let lines = configure(&path, changes, true).unwrap();
        assert_eq!(lines[0], "Debounce: 250 ms");
        assert!(lines.iter().any(|l| l.starts_with("Config saved to:")));
        assert!(lines.iter().any(|l| l == "Output mode: strings"));
        assert_eq!(lines.iter().filter(|l| *l == "Debounce: 250 ms").count(), 2);

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.debounce_ms, Some(250));
    }

    #[test]
    fn test_show_alone_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let lines = configure(&path, Changes::default(), true).unwrap();
        assert!(lines.contains(&"Catalog directory: (bundled catalog)".to_string()));
        assert!(!path.exists());
    }

    #[test]
    fn test_config_path_exists() {
        assert!(Config::config_path().is_ok());
    }

    #[test]
    fn test_apply_changes() {
        let mut config = Config::default();
        let changes = Changes {
            endpoint: Some("http://localhost/api".into()),
            mode: Some(OutputMode::Ids),
            ..Default::default()
        };
        assert!(!changes.is_empty());

        let lines = changes.apply(&mut config);
        assert_eq!(lines, vec!["Endpoint: http://localhost/api", "Output mode: ids"]);
        assert_eq!(config.endpoint(), "http://localhost/api");
        assert_eq!(config.output_mode(), OutputMode::Ids);
        assert_eq!(config.catalog_dir, None);
    }

    #[test]
    fn test_empty_changes() {
        assert!(Changes::default().is_empty());
    }
}
