use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of slides in one carousel.
pub const MAX_SLIDES: usize = 6;

/// Opaque handle of an image already uploaded to the platform (a Telegram `file_id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoRef(pub String);

impl PhotoRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Picks the highest-resolution variant of a photo.
    ///
    /// Telegram delivers every photo as several sizes; on equal area the later
    /// (larger-declared) entry wins. Returns `None` for an empty list.
    pub fn best_of(variants: &[PhotoVariant]) -> Option<PhotoRef> {
        variants
            .iter()
            .max_by_key(|v| u64::from(v.width) * u64::from(v.height))
            .map(|v| v.photo.clone())
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One size of a received photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoVariant {
    pub photo: PhotoRef,
    pub width: u32,
    pub height: u32,
}

/// A photo with its caption. Position in the owning list is the page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub photo: PhotoRef,
    pub caption: String,
}

impl Slide {
    pub fn new(photo: PhotoRef, caption: impl Into<String>) -> Self {
        Self {
            photo,
            caption: caption.into(),
        }
    }
}
