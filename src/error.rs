use thiserror::Error;

use crate::tracker::TrackerError;

/// Top-level error type for the closeout binary.
///
/// Tracker failures during the batch are handled per ticket and never
/// reach this level; what does is fatal-before-work: bad configuration,
/// an unusable release version, or the initial search query failing.
#[derive(Debug, Error)]
pub enum CloseoutError {
    #[error("config error: {0}")]
    Config(String),

    #[error("tracker error: {0}")]
    Tracker(#[from] TrackerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
