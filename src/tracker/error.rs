//! Error types for the issue tracker client.
//!
//! Defines [`TrackerError`] with variants for API errors, malformed
//! responses and network failures. Uses `thiserror` to derive `Display`
//! and `Error` from the `#[error(...)]` attributes.

use thiserror::Error;

/// Errors that can occur while talking to the issue tracker.
///
/// The variants cover the three failure scenarios the triage batch has to
/// distinguish:
/// - [`Api`](TrackerError::Api) — the tracker answered with an HTTP error status
/// - [`Malformed`](TrackerError::Malformed) — the body did not have the expected shape
/// - [`Network`](TrackerError::Network) — the request never got a usable answer
///
/// All of them are per-ticket transient from the batch's point of view: the
/// affected ticket is reported and skipped, the run continues.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The tracker returned an HTTP error (e.g. 401 bad credentials,
    /// 404 unknown issue, 500 internal error).
    #[error("tracker API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be parsed into the expected shape.
    #[error("malformed tracker response: {0}")]
    Malformed(String),

    /// Underlying network failure (DNS, connection refused, timeout).
    /// Wraps the original `reqwest` error via `#[from]`.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
