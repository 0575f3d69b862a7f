//! Registered media descriptor.

use crate::MediaKind;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A slug mapped to a transport media handle.
///
/// Descriptors are created once and never modified; the slug is the primary
/// key of the mapping store.
///
/// # Examples
///
/// ```
/// use linkdrop_core::{MediaDescriptorBuilder, MediaKind};
///
/// let descriptor = MediaDescriptorBuilder::default()
///     .slug("promo")
///     .media_handle("ABC123")
///     .media_kind(MediaKind::Video)
///     .caption(Some("New Year Promo".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(descriptor.slug(), "promo");
/// assert_eq!(descriptor.label(), "New Year Promo");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct MediaDescriptor {
    /// Unique identifier shared in deep links
    slug: String,
    /// Opaque handle issued by the transport for the uploaded media
    media_handle: String,
    /// Selects the delivery operation
    media_kind: MediaKind,
    /// Text shown alongside the media
    #[builder(default)]
    caption: Option<String>,
}

impl MediaDescriptor {
    /// Label used when no caption was registered.
    pub const FALLBACK_LABEL: &'static str = "File available";

    /// Create a descriptor from its parts.
    pub fn new(
        slug: impl Into<String>,
        media_handle: impl Into<String>,
        media_kind: MediaKind,
        caption: Option<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            media_handle: media_handle.into(),
            media_kind,
            caption,
        }
    }

    /// Human-readable label: the caption, or a generic fallback.
    pub fn label(&self) -> &str {
        self.caption
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(Self::FALLBACK_LABEL)
    }
}
