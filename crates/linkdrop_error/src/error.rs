//! Top-level error wrapper types.

use crate::{ConfigError, DatabaseError, ServerError, TransportError};

/// Every error condition a linkdrop operation can surface.
///
/// # Examples
///
/// ```
/// use linkdrop_error::{LinkdropError, LinkdropErrorKind, TransportError, TransportErrorKind};
///
/// let transport_err = TransportError::new(TransportErrorKind::Http("timed out".into()));
/// let err: LinkdropError = transport_err.into();
/// assert!(matches!(err.kind(), LinkdropErrorKind::Transport(_)));
/// assert!(format!("{}", err).contains("Transport Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LinkdropErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Mapping store error
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Chat transport error
    #[from(TransportError)]
    Transport(TransportError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Linkdrop error with kind discrimination.
///
/// # Examples
///
/// ```
/// use linkdrop_error::{ConfigError, LinkdropResult};
///
/// fn might_fail() -> LinkdropResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Linkdrop Error: {}", _0)]
pub struct LinkdropError(Box<LinkdropErrorKind>);

impl LinkdropError {
    /// Create a new error from a kind.
    pub fn new(kind: LinkdropErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LinkdropErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to LinkdropErrorKind
impl<T> From<T> for LinkdropError
where
    T: Into<LinkdropErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for linkdrop operations.
pub type LinkdropResult<T> = std::result::Result<T, LinkdropError>;
