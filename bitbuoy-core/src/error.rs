use thiserror::Error;

/// Why a request to the measurement API failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connection, CORS, timeout).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status code.
    #[error("server responded with status {0}")]
    Status(u16),
    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// No usable token could be obtained for the request.
    #[error("not authorized: {0}")]
    Unauthorized(String),
}

impl FetchError {
    /// True for 401/403 responses and failed session exchanges.
    pub fn is_auth(&self) -> bool {
        matches!(self, FetchError::Unauthorized(_) | FetchError::Status(401 | 403))
    }
}
