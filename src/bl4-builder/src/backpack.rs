//! Backpack export
//!
//! Collects reserialized weapon serials and renders them as the
//! `slot_<n>` entries of a save file's backpack section, ready to paste
//! under the backpack key.

/// Every valid serial starts with this character
pub const SERIAL_PREFIX: char = '@';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackpackError {
    #[error("Invalid serial format (expected a leading '@'): {0}")]
    InvalidSerial(String),
}

/// Serials collected during a session, in storage order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Backpack {
    serials: Vec<String>,
}

impl Backpack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a serial; returns its slot index
    pub fn store(&mut self, serial: &str) -> Result<usize, BackpackError> {
        let serial = serial.trim();
        if !serial.starts_with(SERIAL_PREFIX) {
            tracing::warn!(serial, "rejected serial without '@' prefix");
            return Err(BackpackError::InvalidSerial(serial.to_string()));
        }

        self.serials.push(serial.to_string());
        tracing::debug!(slot = self.serials.len() - 1, "serial stored");
        Ok(self.serials.len() - 1)
    }

    pub fn clear(&mut self) {
        self.serials.clear();
    }

    pub fn len(&self) -> usize {
        self.serials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serials.is_empty()
    }

    pub fn serials(&self) -> &[String] {
        &self.serials
    }

    pub fn render(&self) -> String {
        render_backpack(&self.serials)
    }
}

/// Render serials as backpack slot entries.
///
/// Empty serials are skipped but still consume a slot number.
pub fn render_backpack<S: AsRef<str>>(serials: &[S]) -> String {
    let mut out = String::new();
    for (i, serial) in serials.iter().enumerate() {
        let serial = serial.as_ref();
        if serial.is_empty() {
            continue;
        }
        out.push_str(&format!("        slot_{}:\n", i));
        out.push_str(&format!("          serial: '{}'\n", serial));
    }
    out
}
