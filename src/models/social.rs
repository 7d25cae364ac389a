use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use super::{non_blank, read_json, DataError};

/// Number of post wells shown beside each profile card.
pub const POST_WELLS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Tiktok,
    Youtube,
    Instagram,
}

impl Platform {
    /// Order in which platforms appear on the social page.
    pub const PAGE_ORDER: [Platform; 4] = [
        Platform::Facebook,
        Platform::Tiktok,
        Platform::Youtube,
        Platform::Instagram,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Platform::PAGE_ORDER
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Tiktok => "TikTok",
            Platform::Youtube => "YouTube",
            Platform::Instagram => "Instagram",
        }
    }

    /// Brand gradient for the card header.
    pub fn gradient(self) -> &'static str {
        match self {
            Platform::Facebook => "linear-gradient(90deg,#1877F2,#0e52ac)",
            Platform::Tiktok => "linear-gradient(90deg,#25F4EE,#000000,#FE2C55)",
            Platform::Youtube => "linear-gradient(90deg,#ff0000,#b80000)",
            Platform::Instagram => "linear-gradient(90deg,#f9ce34,#ee2a7b,#6228d7)",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRecord {
    pub url: String,
    pub label: Option<String>,
    pub avatar_override: Option<String>,
}

/// A profile entry is either a bare URL or an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawProfile {
    Url(String),
    Full {
        url: String,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        avatar: Option<String>,
    },
}

impl TryFrom<RawProfile> for ProfileRecord {
    type Error = &'static str;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        let (url, label, avatar) = match raw {
            RawProfile::Url(url) => (url, None, None),
            RawProfile::Full { url, label, avatar } => (url, label, avatar),
        };
        let url = non_blank(Some(url)).ok_or("empty profile url")?;
        Ok(ProfileRecord {
            url,
            label: non_blank(label),
            avatar_override: non_blank(avatar),
        })
    }
}

/// Each platform's value is checked on its own so one bad entry only costs
/// that entry.
#[derive(Debug, Deserialize)]
struct RawSocials {
    #[serde(default)]
    profiles: Option<BTreeMap<String, Value>>,
    #[serde(default, rename = "postsByProfile")]
    posts_by_profile: Option<BTreeMap<String, Value>>,
    /// Platform-level post lists live at the top level, keyed by platform.
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

/// Array entries of `value`; `null` counts as empty, anything else that
/// isn't an array is logged and dropped.
fn entries(value: Value, what: &str) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            warn!("Ignoring {}: expected a list, got {}", what, other);
            Vec::new()
        }
    }
}

/// Trimmed, non-empty string posts; anything else is skipped.
fn post_list(value: Value, what: &str) -> Vec<String> {
    let mut posts = Vec::new();
    for (idx, item) in entries(value, what).into_iter().enumerate() {
        match item.as_str().map(str::trim) {
            Some(post) if !post.is_empty() => posts.push(post.to_string()),
            _ => warn!("Skipping {} post #{}: not a URL string", what, idx),
        }
    }
    posts
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SocialData {
    pub profiles: BTreeMap<Platform, Vec<ProfileRecord>>,
    pub posts_by_platform: BTreeMap<Platform, Vec<String>>,
    pub posts_by_profile: BTreeMap<Platform, BTreeMap<String, Vec<String>>>,
}

/// One block of the social page: a platform with one of its profiles, or an
/// empty slot when the platform has none.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub platform: Platform,
    pub profile: Option<&'a ProfileRecord>,
    pub posts: Vec<&'a str>,
}

impl SocialData {
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let raw: RawSocials = serde_json::from_value(value)?;
        let mut data = SocialData::default();

        for (key, value) in raw.profiles.unwrap_or_default() {
            let Some(platform) = Platform::from_key(&key) else {
                warn!("Skipping profiles for unknown platform '{}'", key);
                continue;
            };
            let list = data.profiles.entry(platform).or_default();
            let what = format!("{} profiles", platform);
            for (idx, entry) in entries(value, &what).into_iter().enumerate() {
                let parsed = serde_json::from_value::<RawProfile>(entry)
                    .map_err(|e| e.to_string())
                    .and_then(|r| ProfileRecord::try_from(r).map_err(str::to_string));
                match parsed {
                    Ok(profile) => list.push(profile),
                    Err(reason) => warn!("Skipping {} profile #{}: {}", platform, idx, reason),
                }
            }
        }

        for (key, value) in raw.rest {
            let Some(platform) = Platform::from_key(&key) else {
                continue;
            };
            let posts = post_list(value, platform.key());
            data.posts_by_platform.insert(platform, posts);
        }

        for (key, value) in raw.posts_by_profile.unwrap_or_default() {
            let Some(platform) = Platform::from_key(&key) else {
                warn!("Skipping postsByProfile for unknown platform '{}'", key);
                continue;
            };
            let by_url = match value {
                Value::Object(map) => map,
                Value::Null => continue,
                other => {
                    warn!("Ignoring postsByProfile.{}: expected an object, got {}", platform, other);
                    continue;
                }
            };
            let cleaned = by_url
                .into_iter()
                .map(|(url, posts)| {
                    let what = format!("{} {}", platform, url);
                    (url, post_list(posts, &what))
                })
                .collect();
            data.posts_by_profile.insert(platform, cleaned);
        }

        Ok(data)
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let value = read_json(path)?;
        if !value.is_object() {
            return Err(DataError::Shape {
                path: path.to_path_buf(),
                expected: "an object",
            });
        }
        Self::from_json(value).map_err(|e| DataError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn profiles_for(&self, platform: Platform) -> &[ProfileRecord] {
        self.profiles
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Posts for the wells next to a profile: that profile's own posts when
    /// listed, otherwise the first platform-level posts.
    pub fn posts_for(&self, platform: Platform, profile_url: Option<&str>) -> Vec<&str> {
        let own = profile_url.and_then(|url| {
            self.posts_by_profile
                .get(&platform)
                .and_then(|by_url| by_url.get(url))
        });
        let source = match own {
            Some(posts) => posts,
            None => match self.posts_by_platform.get(&platform) {
                Some(posts) => posts,
                None => return Vec::new(),
            },
        };
        source.iter().take(POST_WELLS).map(String::as_str).collect()
    }

    /// One section per profile, in page order; platforms without profiles
    /// still get a single empty section.
    pub fn sections(&self) -> Vec<Section<'_>> {
        let mut sections = Vec::new();
        for platform in Platform::PAGE_ORDER {
            let profiles = self.profiles_for(platform);
            if profiles.is_empty() {
                sections.push(Section {
                    platform,
                    profile: None,
                    posts: self.posts_for(platform, None),
                });
                continue;
            }
            for profile in profiles {
                sections.push(Section {
                    platform,
                    profile: Some(profile),
                    posts: self.posts_for(platform, Some(&profile.url)),
                });
            }
        }
        sections
    }
}
