//! Profile avatars with graceful fallback.
//!
//! A profile URL yields a handle, the handle yields an ordered list of avatar
//! sources, and the page walks that list on every load error until it runs
//! out and shows an initials badge instead.

use serde::Serialize;
use std::fmt;
use url::Url;

use crate::models::social::{Platform, ProfileRecord};
use crate::render::url_encode_component;

pub const DEFAULT_AVATAR_SERVICE: &str = "https://unavatar.io";

/// Badge text when a name has nothing usable.
pub const EMPTY_INITIALS: &str = "•";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handle {
    Empty,
    Name(String),
    /// Facebook `profile.php?id=<n>` profiles.
    NumericId(String),
}

impl Handle {
    fn name(s: &str) -> Self {
        if s.is_empty() {
            Handle::Empty
        } else {
            Handle::Name(s.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Handle::Empty)
    }
}

/// Numeric ids render as `id:<n>`.
impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Empty => Ok(()),
            Handle::Name(n) => f.write_str(n),
            Handle::NumericId(id) => write!(f, "id:{}", id),
        }
    }
}

pub fn parse_handle(platform: Platform, url: &str) -> Handle {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return Handle::Empty,
    };
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();
    let first = segments.first().copied().unwrap_or("");

    match platform {
        Platform::Youtube => {
            if let Some(name) = first.strip_prefix('@') {
                Handle::name(name)
            } else if first == "channel" {
                Handle::name(segments.get(1).copied().unwrap_or(""))
            } else {
                Handle::Empty
            }
        }
        Platform::Instagram | Platform::Tiktok => {
            Handle::name(first.strip_prefix('@').unwrap_or(first))
        }
        Platform::Facebook => {
            let id = parsed
                .query_pairs()
                .find(|(k, _)| k == "id")
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty());
            match id {
                Some(id) => Handle::NumericId(id),
                None => Handle::name(first),
            }
        }
    }
}

/// Ordered avatar sources: manual override, platform lookups keyed by the
/// handle, then a lookup keyed by the whole profile URL.
pub fn candidates(
    service: &str,
    platform: Platform,
    handle: &Handle,
    url: &str,
    avatar_override: Option<&str>,
) -> Vec<String> {
    let service = service.trim_end_matches('/');
    let mut list = Vec::new();
    if let Some(manual) = avatar_override.filter(|a| !a.is_empty()) {
        list.push(manual.to_string());
    }
    if !handle.is_empty() {
        let key = platform.key();
        list.push(format!(
            "{}/{}/{}",
            service,
            key,
            url_encode_component(&handle.to_string())
        ));
        match handle {
            Handle::Name(name) if platform == Platform::Youtube => {
                list.push(format!(
                    "{}/youtube/{}",
                    service,
                    url_encode_component(&format!("@{}", name))
                ));
            }
            Handle::NumericId(id) => {
                list.push(format!("{}/facebook/{}", service, url_encode_component(id)));
            }
            _ => {}
        }
    }
    list.push(format!("{}/{}", service, url_encode_component(url)));
    list
}

/// What the avatar slot currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarView<'a> {
    Image(&'a str),
    Initials,
}

/// Candidate list plus a cursor. Each load error moves the cursor one step;
/// past the end the chain stays on initials.
#[derive(Debug, Clone)]
pub struct AvatarChain {
    candidates: Vec<String>,
    cursor: usize,
}

impl AvatarChain {
    pub fn new(candidates: Vec<String>) -> Self {
        AvatarChain {
            candidates,
            cursor: 0,
        }
    }

    pub fn current(&self) -> AvatarView<'_> {
        match self.candidates.get(self.cursor) {
            Some(src) => AvatarView::Image(src),
            None => AvatarView::Initials,
        }
    }

    /// Returns false once exhausted; further errors change nothing.
    pub fn on_error(&mut self) -> bool {
        if self.cursor < self.candidates.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Step past candidates already known to fail, the same way a load
    /// error would. Returns how many were skipped.
    pub fn skip_unavailable(&mut self, unavailable: impl Fn(&str) -> bool) -> usize {
        let mut skipped = 0;
        while !self.is_exhausted() {
            let dead = match self.current() {
                AvatarView::Image(src) => unavailable(src),
                AvatarView::Initials => false,
            };
            if !dead {
                break;
            }
            self.on_error();
            skipped += 1;
        }
        skipped
    }
}

/// Label, else handle (never a bare numeric id), else the URL's host (with
/// any explicit port) without `www.`, else the platform name.
pub fn display_name(platform: Platform, label: Option<&str>, handle: &Handle, url: &str) -> String {
    if let Some(label) = label.filter(|l| !l.trim().is_empty()) {
        return label.to_string();
    }
    if let Handle::Name(name) = handle {
        return name.clone();
    }
    let host = Url::parse(url).ok().and_then(|u| {
        let name = u.host_str()?;
        let name = name.strip_prefix("www.").unwrap_or(name);
        if name.is_empty() {
            return None;
        }
        Some(match u.port() {
            Some(port) => format!("{}:{}", name, port),
            None => name.to_string(),
        })
    });
    host.unwrap_or_else(|| platform.display_name().to_string())
}

/// "Nick Kidd" → "NK", "@nick_k" → "NK", "" → "•".
pub fn initials(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '@' || c == '_' { ' ' } else { c })
        .collect();
    let out: String = spaced
        .split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if out.is_empty() {
        EMPTY_INITIALS.to_string()
    } else {
        out
    }
}

/// Everything a page needs to draw one profile card.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileCard {
    pub platform: Platform,
    pub url: String,
    pub handle: String,
    pub display_name: String,
    pub initials: String,
    pub candidates: Vec<String>,
}

impl ProfileCard {
    pub fn resolve(service: &str, platform: Platform, profile: &ProfileRecord) -> Self {
        let handle = parse_handle(platform, &profile.url);
        let display_name = display_name(platform, profile.label.as_deref(), &handle, &profile.url);
        let candidates = candidates(
            service,
            platform,
            &handle,
            &profile.url,
            profile.avatar_override.as_deref(),
        );
        ProfileCard {
            platform,
            url: profile.url.clone(),
            handle: handle.to_string(),
            initials: initials(&display_name),
            display_name,
            candidates,
        }
    }

    pub fn chain(&self) -> AvatarChain {
        AvatarChain::new(self.candidates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_handles() {
        assert_eq!(
            parse_handle(Platform::Youtube, "https://youtube.com/@nickkvideos"),
            Handle::Name("nickkvideos".into())
        );
        assert_eq!(
            parse_handle(Platform::Youtube, "https://youtube.com/channel/UC123"),
            Handle::Name("UC123".into())
        );
        assert_eq!(
            parse_handle(Platform::Youtube, "https://youtube.com/user/old"),
            Handle::Empty
        );
    }

    #[test]
    fn facebook_numeric_id() {
        let handle = parse_handle(Platform::Facebook, "https://facebook.com/profile.php?id=42");
        assert_eq!(handle, Handle::NumericId("42".into()));
        assert_eq!(handle.to_string(), "id:42");
        assert_eq!(
            parse_handle(Platform::Facebook, "https://www.facebook.com/nick.kidd/"),
            Handle::Name("nick.kidd".into())
        );
    }

    #[test]
    fn instagram_and_tiktok_strip_at() {
        assert_eq!(
            parse_handle(Platform::Tiktok, "https://www.tiktok.com/@nickk"),
            Handle::Name("nickk".into())
        );
        assert_eq!(
            parse_handle(Platform::Instagram, "https://instagram.com/nickckidd/"),
            Handle::Name("nickckidd".into())
        );
        assert_eq!(parse_handle(Platform::Instagram, "https://instagram.com/"), Handle::Empty);
    }

    #[test]
    fn unparseable_url_is_empty() {
        assert_eq!(parse_handle(Platform::Tiktok, "not a url"), Handle::Empty);
    }

    #[test]
    fn candidate_order() {
        let handle = Handle::Name("nickkvideos".into());
        let list = candidates(
            DEFAULT_AVATAR_SERVICE,
            Platform::Youtube,
            &handle,
            "https://youtube.com/@nickkvideos",
            Some("/social/yt.jpg"),
        );
        assert_eq!(
            list,
            vec![
                "/social/yt.jpg",
                "https://unavatar.io/youtube/nickkvideos",
                "https://unavatar.io/youtube/%40nickkvideos",
                "https://unavatar.io/https%3A%2F%2Fyoutube.com%2F%40nickkvideos",
            ]
        );
    }

    #[test]
    fn facebook_id_candidates() {
        let handle = Handle::NumericId("42".into());
        let list = candidates(
            "https://unavatar.io/",
            Platform::Facebook,
            &handle,
            "https://facebook.com/profile.php?id=42",
            None,
        );
        assert_eq!(list[0], "https://unavatar.io/facebook/id%3A42");
        assert_eq!(list[1], "https://unavatar.io/facebook/42");
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn empty_handle_only_has_url_fallback() {
        let list = candidates(DEFAULT_AVATAR_SERVICE, Platform::Tiktok, &Handle::Empty, "x", None);
        assert_eq!(list, vec!["https://unavatar.io/x"]);
    }

    #[test]
    fn chain_walks_to_initials() {
        let mut chain = AvatarChain::new(vec!["a".into(), "b".into()]);
        assert_eq!(chain.current(), AvatarView::Image("a"));
        assert!(chain.on_error());
        assert_eq!(chain.current(), AvatarView::Image("b"));
        assert!(chain.on_error());
        assert_eq!(chain.current(), AvatarView::Initials);
        assert!(chain.is_exhausted());
        assert!(!chain.on_error());
        assert_eq!(chain.current(), AvatarView::Initials);
    }

    #[test]
    fn skip_unavailable_moves_cursor_like_errors() {
        let mut chain = AvatarChain::new(vec!["/gone.jpg".into(), "https://a/x".into()]);
        assert_eq!(chain.skip_unavailable(|src| src.starts_with('/')), 1);
        assert_eq!(chain.position(), 1);
        assert_eq!(chain.current(), AvatarView::Image("https://a/x"));

        let mut all_dead = AvatarChain::new(vec!["/a".into(), "/b".into()]);
        assert_eq!(all_dead.skip_unavailable(|_| true), 2);
        assert_eq!(all_dead.current(), AvatarView::Initials);
        assert_eq!(all_dead.candidates().len(), 2);
    }

    #[test]
    fn initials_rules() {
        assert_eq!(initials("Nick Kidd"), "NK");
        assert_eq!(initials("@nickkvideos"), "N");
        assert_eq!(initials("nick_k_videos"), "NK");
        assert_eq!(initials("  "), "•");
        assert_eq!(initials("@_"), "•");
    }

    #[test]
    fn display_name_priority() {
        let url = "https://www.facebook.com/profile.php?id=42";
        let id = Handle::NumericId("42".into());
        assert_eq!(display_name(Platform::Facebook, Some("Nick"), &id, url), "Nick");
        assert_eq!(display_name(Platform::Facebook, None, &id, url), "facebook.com");
        assert_eq!(
            display_name(Platform::Facebook, None, &Handle::Name("nk".into()), url),
            "nk"
        );
        assert_eq!(display_name(Platform::Youtube, None, &Handle::Empty, "???"), "YouTube");
    }

    #[test]
    fn display_name_keeps_explicit_port() {
        assert_eq!(
            display_name(Platform::Tiktok, None, &Handle::Empty, "https://www.example.com:8080/x"),
            "example.com:8080"
        );
        assert_eq!(
            display_name(Platform::Tiktok, None, &Handle::Empty, "https://example.com:443/x"),
            "example.com"
        );
    }
}
