//! Telegram Bot API transport.
//!
//! - [`TelegramApi`] - JSON client for the handful of Bot API methods linkdrop
//!   calls, and the [`ChatTransport`](crate::ChatTransport) implementation
//! - [`poll_loop`] - `getUpdates` long-polling loop used in polling mode
//! - [`Update`] - Inbound update payload shared by polling and the webhook
//!   route

mod api;
mod poller;
mod types;

pub use api::{TelegramApi, build_keyboard};
pub use poller::poll_loop;
pub use types::{
    ApiResponse, CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message,
    Update, User,
};
