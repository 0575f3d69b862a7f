//! Serde types for the Telegram Bot API.
//!
//! Only the fields linkdrop reads are deserialized; everything else in the
//! payload is ignored.

use crate::{ControlActivation, IncomingMessage, InboundEvent};
use serde::{Deserialize, Serialize};

/// Generic Telegram API response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded
    pub ok: bool,
    /// Error description when `ok` is false
    pub description: Option<String>,
    /// Call result when `ok` is true
    pub result: Option<T>,
}

/// A Telegram Update, from `getUpdates` or a webhook POST.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier
    pub update_id: i64,
    /// New incoming message
    pub message: Option<Message>,
    /// Inline button press
    pub callback_query: Option<CallbackQuery>,
}

/// A Telegram Message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message identifier within the chat
    pub message_id: i64,
    /// Sender, absent for channel posts
    pub from: Option<User>,
    /// Chat the message belongs to
    pub chat: Chat,
    /// Text body, absent for media messages
    pub text: Option<String>,
}

/// A Telegram User.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// User identifier
    pub id: i64,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Username without the leading `@`
    pub username: Option<String>,
}

/// A Telegram Chat.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Chat identifier
    pub id: i64,
    /// "private", "group", "supergroup" or "channel"
    #[serde(rename = "type")]
    pub chat_type: Option<String>,
}

/// A Telegram callback query from an inline keyboard button press.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Identifier used with `answerCallbackQuery`
    pub id: String,
    /// User who pressed the button
    pub from: User,
    /// Message the button was attached to
    pub message: Option<Message>,
    /// Callback payload
    pub data: Option<String>,
}

/// Inline keyboard markup for message buttons.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    /// Rows of buttons
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// A single inline keyboard button.
#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    /// Visible label
    pub text: String,
    /// Payload sent back on press
    pub callback_data: String,
}

impl Update {
    /// Convert into the event the bot understands.
    ///
    /// Returns `None` for updates linkdrop does not react to: non-text
    /// messages, messages without a sender, and button presses without a
    /// payload.
    pub fn into_event(self) -> Option<InboundEvent> {
        if let Some(message) = self.message {
            let sender = message.from?;
            let text = message.text?;
            return Some(InboundEvent::Message(IncomingMessage {
                chat_id: message.chat.id,
                sender_id: sender.id,
                text,
            }));
        }

        let query = self.callback_query?;
        let token = query.data?;
        // Inline-mode presses carry no message; deliver to the presser directly
        let chat_id = query
            .message
            .as_ref()
            .map(|m| m.chat.id)
            .unwrap_or(query.from.id);

        Some(InboundEvent::Activation(ControlActivation {
            activation_id: query.id,
            chat_id,
            sender_id: query.from.id,
            token,
        }))
    }
}
