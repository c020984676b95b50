//! Reserialize gateway
//!
//! The external service turns a deserialized string into a game serial.
//! The [`Reserializer`] trait is the seam; [`HttpReserializer`] talks to
//! the public endpoint and [`Debouncer`] coalesces bursts of edits into a
//! single call for the latest string.

use crate::encode::with_delimiter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://borderlands4-deserializer.nicnl.com/api/v1/reserialize";

/// Quiet period before a burst of edits is sent
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("No deserialized string available.")]
    Empty,

    #[error("HTTP {status} {reason}{}", body_suffix(.body))]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("{0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" - {}", body)
    }
}

#[derive(Debug, Serialize)]
pub struct ReserializeRequest<'a> {
    pub deserialized: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ReserializeResponse {
    #[serde(default)]
    pub serial_b85: Option<String>,
}

impl ReserializeResponse {
    pub fn into_serial(self) -> Result<String, GatewayError> {
        self.serial_b85
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GatewayError::MalformedResponse("missing serial_b85".to_string()))
    }
}

/// Converts a deserialized string into a serial
pub trait Reserializer {
    /// `deserialized` already ends with the delimiter
    fn reserialize(&self, deserialized: &str) -> Result<String, GatewayError>;
}

impl<T: Reserializer + ?Sized> Reserializer for &T {
    fn reserialize(&self, deserialized: &str) -> Result<String, GatewayError> {
        (**self).reserialize(deserialized)
    }
}

impl<T: Reserializer + ?Sized> Reserializer for Box<T> {
    fn reserialize(&self, deserialized: &str) -> Result<String, GatewayError> {
        (**self).reserialize(deserialized)
    }
}

/// Trim and add the trailing delimiter; empty input stays empty
pub fn normalize_deserialized(encoded: &str) -> String {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        with_delimiter(trimmed)
    }
}

/// Normalize an encoded string and send it through a gateway
pub fn reserialize_encoded<G: Reserializer + ?Sized>(
    gateway: &G,
    encoded: &str,
) -> Result<String, GatewayError> {
    let deserialized = normalize_deserialized(encoded);
    if deserialized.is_empty() {
        return Err(GatewayError::Empty);
    }

    let result = gateway.reserialize(&deserialized);
    match &result {
        Ok(serial) => tracing::info!(%serial, "reserialized"),
        Err(e) => tracing::warn!(error = %e, "reserialize failed"),
    }
    result
}

/// Result of one reserialize attempt, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserializeOutcome {
    /// The encoded string the attempt was made for
    pub encoded: String,
    pub result: Result<String, GatewayError>,
}

impl ReserializeOutcome {
    pub fn serial(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }
}

impl fmt::Display for ReserializeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(serial) => f.write_str(serial),
            Err(e) => write!(f, "Error: {}", e),
        }
    }
}

/// Gateway backed by the HTTP reserialize endpoint
#[cfg(feature = "http")]
pub struct HttpReserializer {
    endpoint: String,
    agent: ureq::Agent,
}

#[cfg(feature = "http")]
impl HttpReserializer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(feature = "http")]
impl Default for HttpReserializer {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(feature = "http")]
impl Reserializer for HttpReserializer {
    fn reserialize(&self, deserialized: &str) -> Result<String, GatewayError> {
        tracing::debug!(endpoint = %self.endpoint, "posting deserialized string");

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(ReserializeRequest { deserialized });

        match response {
            Ok(resp) => {
                let body: ReserializeResponse = resp
                    .into_json()
                    .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
                body.into_serial()
            }
            Err(ureq::Error::Status(status, resp)) => {
                let reason = resp.status_text().to_string();
                let body = resp.into_string().unwrap_or_default();
                Err(GatewayError::Status {
                    status,
                    reason,
                    body: body.trim().to_string(),
                })
            }
            Err(e) => Err(GatewayError::Transport(e.to_string())),
        }
    }
}

/// Background worker that sends only the latest string of each burst.
///
/// Each [`submit`](Debouncer::submit) restarts the quiet period. When it
/// elapses the most recent string goes to the gateway and the outcome is
/// handed to the callback. A call already in flight is not cancelled; its
/// outcome is simply followed by the newer one.
pub struct Debouncer {
    tx: Option<Sender<String>>,
    handle: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn spawn<G, F>(gateway: G, quiet: Duration, mut on_outcome: F) -> Self
    where
        G: Reserializer + Send + 'static,
        F: FnMut(ReserializeOutcome) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<String>();

        let handle = thread::spawn(move || {
            while let Ok(mut latest) = rx.recv() {
                let mut open = true;
                loop {
                    match rx.recv_timeout(quiet) {
                        Ok(next) => latest = next,
                        Err(RecvTimeoutError::Timeout) => break,
                        Err(RecvTimeoutError::Disconnected) => {
                            open = false;
                            break;
                        }
                    }
                }

                let result = reserialize_encoded(&gateway, &latest);
                on_outcome(ReserializeOutcome {
                    encoded: latest,
                    result,
                });

                if !open {
                    break;
                }
            }
            tracing::debug!("debouncer stopped");
        });

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Queue a new encoded string, replacing any pending one
    pub fn submit(&self, encoded: impl Into<String>) {
        if let Some(tx) = &self.tx {
            if tx.send(encoded.into()).is_err() {
                tracing::warn!("debouncer worker is gone");
            }
        }
    }

    /// Flush the pending string, if any, and wait for the worker to finish
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("debouncer worker panicked");
            }
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.stop();
    }
}
