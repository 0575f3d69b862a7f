//! Mapping store trait.

use crate::DatabaseResult;
use async_trait::async_trait;
use linkdrop_core::{MediaDescriptor, MediaKind};
use tracing::{debug, instrument};

/// Result of a registration attempt that reached the store.
///
/// Store failures are reported through the `Err` side of
/// [`DatabaseResult`]; these variants are the expected outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new descriptor was stored
    Registered(MediaDescriptor),
    /// The slug was already taken; nothing was written
    AlreadyExists,
    /// The kind was not photo/video/document; nothing was written
    InvalidKind(String),
}

/// Persistent registry from slug to media descriptor.
///
/// Implementations provide the three primitives; [`MediaRepository::register`]
/// validates the kind before any primitive runs, so every backend rejects
/// unknown kinds without touching storage.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Look up the descriptor for `slug`.
    async fn lookup(&self, slug: &str) -> DatabaseResult<Option<MediaDescriptor>>;

    /// Store `descriptor` unless its slug is already present.
    ///
    /// Returns `true` when a row was written. The check and the write must be
    /// atomic with respect to concurrent calls for the same slug.
    async fn insert_if_absent(&self, descriptor: &MediaDescriptor) -> DatabaseResult<bool>;

    /// Total number of stored descriptors.
    async fn count(&self) -> DatabaseResult<i64>;

    /// Register a new slug mapping.
    #[instrument(skip(self, media_handle, caption))]
    async fn register(
        &self,
        slug: &str,
        media_handle: &str,
        media_kind: &str,
        caption: Option<&str>,
    ) -> DatabaseResult<RegisterOutcome> {
        let kind = match media_kind.parse::<MediaKind>() {
            Ok(kind) => kind,
            Err(e) => {
                debug!(error = %e, "Rejecting registration");
                return Ok(RegisterOutcome::InvalidKind(e.0));
            }
        };

        let descriptor =
            MediaDescriptor::new(slug, media_handle, kind, caption.map(str::to_string));

        if self.insert_if_absent(&descriptor).await? {
            debug!("Descriptor stored");
            Ok(RegisterOutcome::Registered(descriptor))
        } else {
            debug!("Slug already registered");
            Ok(RegisterOutcome::AlreadyExists)
        }
    }
}
