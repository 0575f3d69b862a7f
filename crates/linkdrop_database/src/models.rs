//! Diesel models for the `media_files` table.

use crate::schema::media_files;
use diesel::prelude::*;
use linkdrop_core::{MediaDescriptor, MediaKind};
use linkdrop_error::{DatabaseError, DatabaseErrorKind};

/// Database row for the media_files table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = media_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MediaRow {
    /// Primary key
    pub slug: String,
    /// Transport media handle
    pub file_id: String,
    /// Stored media kind name
    pub file_type: String,
    /// Optional caption
    pub caption: Option<String>,
}

impl TryFrom<MediaRow> for MediaDescriptor {
    type Error = DatabaseError;

    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        let kind = row
            .file_type
            .parse::<MediaKind>()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::UnknownMediaKind(e.0)))?;
        Ok(MediaDescriptor::new(row.slug, row.file_id, kind, row.caption))
    }
}

/// Insertable row borrowed from a descriptor.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = media_files)]
pub struct NewMediaRow<'a> {
    /// Primary key
    pub slug: &'a str,
    /// Transport media handle
    pub file_id: &'a str,
    /// Media kind name
    pub file_type: &'static str,
    /// Optional caption
    pub caption: Option<&'a str>,
}

impl<'a> From<&'a MediaDescriptor> for NewMediaRow<'a> {
    fn from(descriptor: &'a MediaDescriptor) -> Self {
        Self {
            slug: descriptor.slug(),
            file_id: descriptor.media_handle(),
            file_type: descriptor.media_kind().as_str(),
            caption: descriptor.caption().as_deref(),
        }
    }
}
