//! Linkdrop: share Telegram media through short deep links.
//!
//! An administrator registers a slug for a file already uploaded to Telegram;
//! anyone opening `https://t.me/<bot>?start=<slug>` gets a confirmation button
//! and, on pressing it, the file.
//!
//! This crate wires the pieces into a process:
//!
//! - [`LinkdropConfig`] - Layered file and environment configuration
//! - [`create_router`] - Webhook intake plus `/` and `/health`
//! - [`serve`] - Store, bot context, polling or webhook intake, shutdown
//! - [`Cli`] - The `linkdrop` binary's commands

#![warn(missing_docs)]

mod cli;
mod config;
mod runtime;
mod server;

pub use cli::{Cli, Commands};
pub use config::{
    DEFAULT_ADMIN_ID, DEFAULT_POLL_TIMEOUT, DEFAULT_PORT, LinkdropConfig, OperatingMode,
    SeedEntry,
};
pub use runtime::{init_database, open_postgres, open_repository, seed_repository, serve};
pub use server::{AppState, SERVICE_NAME, create_router};

pub use linkdrop_error::{LinkdropError, LinkdropErrorKind, LinkdropResult};
