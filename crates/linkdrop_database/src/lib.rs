//! Mapping store for linkdrop.
//!
//! This crate persists slug → media descriptor mappings and answers the three
//! queries the bot needs: point lookup, register-if-absent, and count.
//!
//! # Backends
//!
//! - [`PostgresMediaRepository`] - diesel + r2d2, uniqueness enforced by the
//!   `media_files` primary key
//! - [`InMemoryMediaRepository`] - `HashMap` behind an async `RwLock`, used in
//!   tests and dry runs
//!
//! # Example
//!
//! ```rust,ignore
//! use linkdrop_database::{MediaRepository, PostgresMediaRepository, RegisterOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = PostgresMediaRepository::connect("postgres://localhost/linkdrop", 4)?;
//! repo.ensure_schema().await?;
//!
//! match repo.register("promo", "ABC123", "video", Some("New Year Promo")).await? {
//!     RegisterOutcome::Registered(d) => println!("stored {}", d.slug()),
//!     RegisterOutcome::AlreadyExists => println!("taken"),
//!     RegisterOutcome::InvalidKind(kind) => println!("bad kind {kind}"),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod in_memory_repository;
mod models;
mod postgres_repository;
mod repository;

// Public modules for external access
pub mod schema;

pub use connection::{PgPool, establish_pool};
pub use in_memory_repository::InMemoryMediaRepository;
pub use models::{MediaRow, NewMediaRow};
pub use postgres_repository::PostgresMediaRepository;
pub use repository::{MediaRepository, RegisterOutcome};

use linkdrop_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
