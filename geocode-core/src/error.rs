use thiserror::Error;

/// Failure of a single geocoding call.
///
/// `NoResult` is the "address not found" case and is kept apart from the
/// transport and decode failures so callers can branch on it with `matches!`.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The request could not be sent, the body could not be read, or the
    /// provider answered with a non-success status.
    #[error("Request to geocoding provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not JSON of the expected shape.
    #[error("Failed to parse geocoding response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No result found")]
    NoResult,
}

impl GeocodeError {
    pub const fn is_no_result(&self) -> bool {
        matches!(self, Self::NoResult)
    }
}

pub type Result<T, E = GeocodeError> = std::result::Result<T, E>;
