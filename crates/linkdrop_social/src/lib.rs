//! Chat-facing side of linkdrop.
//!
//! This crate turns inbound chat events into store operations and replies:
//!
//! # Command Handling
//!
//! - [`BotCommand`] - Tokenizer that classifies `/start`, `/add`, `/status`
//!   and `/help` messages
//! - [`AdminGate`] - Single privileged identity check
//! - [`LinkdropBot`] - Two-phase resolution and delivery protocol
//!
//! # Transport
//!
//! The protocol talks to the chat platform through the [`ChatTransport`]
//! trait. The `telegram` module implements it on top of the Telegram Bot API
//! and provides the long-polling loop and update decoding used by the server.

#![warn(missing_docs)]

mod access;
mod bot;
mod command;
mod replies;
mod transport;

pub mod telegram;

pub use access::AdminGate;
pub use bot::{
    BotSettings, BotSettingsBuilder, ControlActivation, DispatchOutcome, IncomingMessage,
    InboundEvent, LinkdropBot,
};
pub use command::BotCommand;
pub use replies::{deep_link, escape_html};
pub use transport::{ChatTransport, ConfirmationControl, TextFormat, TransportResult};
