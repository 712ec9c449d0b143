use thiserror::Error;

/// Errors raised while constructing blob properties.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The blob size is negative.
    #[error("invalid blob size: {0}")]
    InvalidBlobSize(i64),

    /// The time-to-live is negative and not the infinite sentinel.
    #[error("invalid time-to-live: {0} seconds")]
    InvalidTimeToLive(i64),
}
