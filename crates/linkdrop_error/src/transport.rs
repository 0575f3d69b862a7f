//! Chat transport error types.

/// Error kinds for chat transport operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// HTTP request failed
    #[display("HTTP request failed: {}", _0)]
    Http(String),

    /// Platform rejected the call
    #[display("API error: {}", _0)]
    Api(String),

    /// Request or response body could not be (de)serialized
    #[display("Serialization error: {}", _0)]
    Serialization(String),
}

/// Transport error with location tracking.
///
/// # Examples
///
/// ```
/// use linkdrop_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Api("Bad Request: chat not found".into()));
/// assert!(format!("{}", err).contains("chat not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The error kind
    pub kind: TransportErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(feature = "transport")]
impl From<reqwest::Error> for TransportError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::new(TransportErrorKind::Serialization(err.to_string()))
        } else {
            TransportError::new(TransportErrorKind::Http(err.to_string()))
        }
    }
}

#[cfg(feature = "transport")]
impl From<serde_json::Error> for TransportError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        TransportError::new(TransportErrorKind::Serialization(err.to_string()))
    }
}
