//! Error types for linkdrop.
//!
//! This crate provides the foundation error types used throughout the linkdrop workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use linkdrop_error::{ConfigError, LinkdropResult};
//!
//! fn load_token() -> LinkdropResult<String> {
//!     Err(ConfigError::new("BOT_TOKEN is not set"))?
//! }
//!
//! match load_token() {
//!     Ok(token) => println!("Got {} bytes", token.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
mod server;
mod transport;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{LinkdropError, LinkdropErrorKind, LinkdropResult};
pub use server::{ServerError, ServerErrorKind};
pub use transport::{TransportError, TransportErrorKind};
