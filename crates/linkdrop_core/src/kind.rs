//! Media kind enumeration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of media behind a registered slug.
///
/// The kind selects which delivery call is made when the media is sent.
/// Parsing is case-sensitive: only `photo`, `video` and `document` are
/// recognized.
///
/// # Examples
///
/// ```
/// use linkdrop_core::MediaKind;
///
/// let kind: MediaKind = "video".parse().unwrap();
/// assert_eq!(kind, MediaKind::Video);
/// assert_eq!(kind.to_string(), "video");
///
/// assert!("Video".parse::<MediaKind>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image, delivered with `sendPhoto`
    #[display("photo")]
    Photo,
    /// Video clip, delivered with `sendVideo`
    #[display("video")]
    Video,
    /// Arbitrary file, delivered with `sendDocument`
    #[display("document")]
    Document,
}

impl MediaKind {
    /// All recognized kinds, in display order.
    pub const ALL: [MediaKind; 3] = [MediaKind::Photo, MediaKind::Video, MediaKind::Document];

    /// The canonical lowercase name stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Document => "document",
        }
    }
}

/// Returned when text does not name one of the three media kinds.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("unrecognized media kind '{}' (expected photo, video or document)", _0)]
pub struct UnrecognizedMediaKind(pub String);

impl std::error::Error for UnrecognizedMediaKind {}

impl FromStr for MediaKind {
    type Err = UnrecognizedMediaKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnrecognizedMediaKind(s.to_string()))
    }
}
