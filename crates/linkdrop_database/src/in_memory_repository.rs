//! In-memory implementation of MediaRepository for testing.
//!
//! This module provides a simple HashMap-based store. Useful for unit tests
//! and for running the bot without a database.

use crate::{DatabaseResult, MediaRepository};
use async_trait::async_trait;
use linkdrop_core::MediaDescriptor;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

/// In-memory mapping store.
///
/// Descriptors live in a HashMap protected by an RwLock. The write lock is
/// held across the existence check and the insert, so concurrent
/// registrations of one slug cannot both succeed. All data is lost when the
/// last clone is dropped.
///
/// # Example
/// ```
/// use linkdrop_database::{InMemoryMediaRepository, MediaRepository, RegisterOutcome};
///
/// #[tokio::main]
/// async fn main() {
///     let repo = InMemoryMediaRepository::new();
///     let outcome = repo.register("promo", "ABC123", "video", None).await.unwrap();
///     assert!(matches!(outcome, RegisterOutcome::Registered(_)));
///     assert_eq!(repo.count().await.unwrap(), 1);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryMediaRepository {
    descriptors: Arc<RwLock<HashMap<String, MediaDescriptor>>>,
}

impl InMemoryMediaRepository {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the store is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.descriptors.read().await.is_empty()
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    #[instrument(skip(self))]
    async fn lookup(&self, slug: &str) -> DatabaseResult<Option<MediaDescriptor>> {
        Ok(self.descriptors.read().await.get(slug).cloned())
    }

    #[instrument(skip(self, descriptor), fields(slug = %descriptor.slug()))]
    async fn insert_if_absent(&self, descriptor: &MediaDescriptor) -> DatabaseResult<bool> {
        let mut descriptors = self.descriptors.write().await;

        match descriptors.entry(descriptor.slug().clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(descriptor.clone());
                Ok(true)
            }
        }
    }

    async fn count(&self) -> DatabaseResult<i64> {
        Ok(self.descriptors.read().await.len() as i64)
    }
}
