use thiserror::Error;

/// Failures surfaced by the tracking operations
#[derive(Debug, Error)]
pub enum TrackError {
    /// The collect payload could not be encoded to JSON
    #[error("marshal error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request never got a response (DNS, refused connection, timeout)
    #[error("request error: {0}")]
    Network(#[from] ureq::Error),

    /// The collector answered with something other than 200
    #[error("unexpected status: {0}")]
    UnexpectedStatus(u16),
}

impl TrackError {
    /// The status code carried by an `UnexpectedStatus` error
    pub fn status(&self) -> Option<u16> {
        match self {
            TrackError::UnexpectedStatus(code) => Some(*code),
            _ => None,
        }
    }
}
