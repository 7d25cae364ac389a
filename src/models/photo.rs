use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

use super::{non_blank, read_json, DataError};

pub const LANDSCAPE_TAG: &str = "landscape";
pub const PORTRAIT_TAG: &str = "portrait";

/// Tags that carry layout metadata rather than a content category.
pub const ORIENTATION_TAGS: [&str; 2] = [LANDSCAPE_TAG, PORTRAIT_TAG];

pub fn is_orientation_tag(tag: &str) -> bool {
    ORIENTATION_TAGS.contains(&tag)
}

/// Natural pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Dimensions { width, height })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoRecord {
    pub path: String,
    pub caption: String,
    pub tags: BTreeSet<String>,
    pub dimensions: Option<Dimensions>,
}

/// On-disk shape of one `photos.json` entry.
#[derive(Debug, Deserialize)]
struct RawPhoto {
    #[serde(default, alias = "path")]
    src: Option<String>,
    #[serde(default, alias = "caption")]
    alt: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    w: Option<u32>,
    #[serde(default)]
    h: Option<u32>,
}

impl TryFrom<RawPhoto> for PhotoRecord {
    type Error = &'static str;

    fn try_from(raw: RawPhoto) -> Result<Self, Self::Error> {
        let path = non_blank(raw.src).ok_or("missing image path")?;
        let tags = raw
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let dimensions = match (raw.w, raw.h) {
            (Some(w), Some(h)) => Dimensions::new(w, h),
            _ => None,
        };
        Ok(PhotoRecord {
            path,
            caption: raw.alt.map(|a| a.trim().to_string()).unwrap_or_default(),
            tags,
            dimensions,
        })
    }
}

impl PhotoRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Parse a decoded `photos.json` document. Entries that fail validation
    /// are skipped with a warning.
    pub fn from_json(value: Value) -> Option<Vec<Self>> {
        let entries = match value {
            Value::Array(entries) => entries,
            _ => return None,
        };
        let mut photos = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.into_iter().enumerate() {
            let parsed = serde_json::from_value::<RawPhoto>(entry)
                .map_err(|e| e.to_string())
                .and_then(|raw| PhotoRecord::try_from(raw).map_err(str::to_string));
            match parsed {
                Ok(photo) => photos.push(photo),
                Err(reason) => warn!("Skipping photo entry #{}: {}", idx, reason),
            }
        }
        Some(photos)
    }

    pub fn load(path: &Path) -> Result<Vec<Self>, DataError> {
        let value = read_json(path)?;
        Self::from_json(value).ok_or_else(|| DataError::Shape {
            path: path.to_path_buf(),
            expected: "an array of photos",
        })
    }
}
