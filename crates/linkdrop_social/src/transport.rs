//! Chat transport abstraction.
//!
//! The delivery protocol only needs a handful of outbound calls. Keeping them
//! behind a trait lets tests record the exact sequence of calls.

use async_trait::async_trait;
use linkdrop_error::TransportError;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// How the platform should render a text reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextFormat {
    /// Text is shown as-is
    #[default]
    Plain,
    /// Text contains HTML markup (`<b>`, `<code>`)
    Html,
}

/// A single button that sends `token` back when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfirmationControl {
    /// Visible button text
    pub label: String,
    /// Opaque callback payload
    pub token: String,
}

impl ConfirmationControl {
    /// Create a control with the given label and token.
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Outbound calls into the chat platform.
///
/// # Tracing
///
/// Implementations should instrument each call with the target chat ID and
/// never record bot credentials.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a text reply to a chat.
    async fn send_text(&self, chat_id: i64, text: &str, format: TextFormat)
    -> TransportResult<()>;

    /// Send a text with one confirmation button attached.
    async fn send_confirmation(
        &self,
        chat_id: i64,
        text: &str,
        control: &ConfirmationControl,
    ) -> TransportResult<()>;

    /// Acknowledge a pending button activation.
    async fn answer_activation(&self, activation_id: &str, text: &str) -> TransportResult<()>;

    /// Deliver a photo by handle.
    async fn send_photo(
        &self,
        chat_id: i64,
        media_handle: &str,
        caption: Option<&str>,
    ) -> TransportResult<()>;

    /// Deliver a video by handle.
    async fn send_video(
        &self,
        chat_id: i64,
        media_handle: &str,
        caption: Option<&str>,
    ) -> TransportResult<()>;

    /// Deliver a document by handle.
    async fn send_document(
        &self,
        chat_id: i64,
        media_handle: &str,
        caption: Option<&str>,
    ) -> TransportResult<()>;
}
