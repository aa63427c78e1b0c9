//! Tagged error type for REST calls.
//!
//! DESIGN
//! ======
//! The API returns untyped JSON error bodies. Callers branch on
//! [`ApiError::kind`] rather than inspecting payload shapes; the payload is
//! retained on `Rejected` for programmatic consumers.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Coarse failure category exposed to the UI layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered and refused the request.
    Rejected,
    /// Transport failure or a response body that could not be parsed.
    Network,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server returned a non-success status, or a success status without
    /// the data the operation requires.
    #[error("request rejected: status {status}")]
    Rejected { status: u16, payload: serde_json::Value },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not the expected JSON.
    #[error("response parse failed: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Transport(_) | Self::Decode(_) => ErrorKind::Network,
        }
    }

    /// Server payload attached to a rejection.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Rejected { payload, .. } => Some(payload),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// True when the server refused the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}
