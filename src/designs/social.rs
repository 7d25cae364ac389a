//! Social page: one section per profile with its card and two post wells.

use log::debug;

use crate::avatar::{AvatarChain, AvatarView, ProfileCard};
use crate::designs::common::initials_badge;
use crate::designs::embed::render_embed;
use crate::gallery::measure::ImageHeaders;
use crate::models::social::{Section, SocialData, POST_WELLS};
use crate::render::html_escape;

/// `public` is the served directory; local avatar overrides missing from it
/// are skipped before the page is sent.
pub fn render_social(data: &SocialData, avatar_service: &str, public: &ImageHeaders) -> String {
    // The handler has to exist before the first avatar can fail.
    let mut html = String::from(AVATAR_SCRIPT);
    for section in data.sections() {
        html.push_str(&render_section(&section, avatar_service, public));
    }
    html
}

/// Chain for a card, already advanced past local files that don't exist.
pub fn card_chain(card: &ProfileCard, public: &ImageHeaders) -> AvatarChain {
    let mut chain = card.chain();
    let skipped = chain.skip_unavailable(|src| {
        public.resolve(src).map_or(false, |file| !file.is_file())
    });
    if skipped > 0 {
        debug!("Skipped {} missing avatar file(s) for {}", skipped, card.url);
    }
    chain
}

fn render_section(section: &Section, avatar_service: &str, public: &ImageHeaders) -> String {
    let platform = section.platform;
    let heading = match section.profile.and_then(|p| p.label.as_deref()) {
        Some(label) => format!("{} — {}", platform, html_escape(label)),
        None => platform.to_string(),
    };
    let status = if section.posts.is_empty() {
        "Showing profile card until posts are added"
    } else {
        "Showing latest posts"
    };

    let card = match section.profile {
        Some(profile) => {
            let card = ProfileCard::resolve(avatar_service, platform, profile);
            render_profile_card(&card, &card_chain(&card, public))
        }
        None => format!(
            r#"<div class="empty-card">Add a profile link for {}.</div>"#,
            platform
        ),
    };

    let wells = if section.posts.is_empty() {
        r#"<div class="well"><div><div class="well-title">Post area</div><p>The two newest posts for this profile will appear here automatically.</p></div></div>
<div class="well">Second post slot</div>"#
            .to_string()
    } else {
        section
            .posts
            .iter()
            .take(POST_WELLS)
            .map(|url| format!(r#"<div class="well"><div class="well-inner">{}</div></div>"#, render_embed(url)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<section class="social-section" data-platform="{platform}">
<div class="social-heading"><h2>{heading}</h2><span class="social-status">{status}</span></div>
<div class="social-row">
    <div class="social-card">{card}</div>
    <div class="social-wells">{wells}</div>
</div>
</section>
"#,
        platform = platform,
        heading = heading,
        status = status,
        card = card,
        wells = wells,
    )
}

/// Profile card. The avatar `<img>` carries its whole candidate list and the
/// chain's position in it; its `onerror` advances through the rest and swaps
/// in the initials badge when it runs out.
pub fn render_profile_card(card: &ProfileCard, chain: &AvatarChain) -> String {
    let platform = card.platform;
    let candidates_json = serde_json::to_string(chain.candidates()).unwrap_or_default();

    let avatar = match chain.current() {
        AvatarView::Image(src) => format!(
            r#"<img class="avatar" src="{src}" alt="{name} avatar" data-candidates="{list}" data-index="{index}" onerror="avatarFallback(this)" referrerpolicy="no-referrer">{badge}"#,
            src = html_escape(src),
            name = platform.display_name(),
            list = html_escape(&candidates_json),
            index = chain.position(),
            badge = initials_badge(&card.initials, &card.display_name, true),
        ),
        AvatarView::Initials => {
            initials_badge(&card.initials, &card.display_name, false)
        }
    };

    format!(
        r#"<a href="{url}" target="_blank" rel="noreferrer" class="profile-card">
    <div class="profile-card-header" style="background:{gradient}">Follow on {name}</div>
    <div class="profile-card-body">
        {avatar}
        <div class="profile-text">
            <div class="profile-name">{display}</div>
            <div class="profile-url">{url}</div>
        </div>
        <span class="profile-open">Open</span>
    </div>
</a>"#,
        url = html_escape(&card.url),
        gradient = platform.gradient(),
        name = platform.display_name(),
        avatar = avatar,
        display = html_escape(&card.display_name),
    )
}

const AVATAR_SCRIPT: &str = r#"<script>
function avatarFallback(img){
    var list=[];
    try{list=JSON.parse(img.dataset.candidates);}catch(e){}
    var next=parseInt(img.dataset.index||'0',10)+1;
    if(next<list.length){img.dataset.index=next;img.src=list[next];return;}
    img.onerror=null;
    var badge=img.nextElementSibling;
    img.remove();
    if(badge)badge.style.display='';
}
</script>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::social::{Platform, ProfileRecord};

    fn card(avatar: Option<&str>) -> ProfileCard {
        let profile = ProfileRecord {
            url: "https://www.tiktok.com/@nickk".into(),
            label: None,
            avatar_override: avatar.map(str::to_string),
        };
        ProfileCard::resolve("https://unavatar.io", Platform::Tiktok, &profile)
    }

    #[test]
    fn missing_local_override_is_skipped() {
        let card = card(Some("/social/missing.jpg"));
        let public = ImageHeaders::new("does-not-exist");
        let chain = card_chain(&card, &public);
        assert_eq!(chain.position(), 1);
        let html = render_profile_card(&card, &chain);
        assert!(html.contains(r#"src="https://unavatar.io/tiktok/nickk""#));
        assert!(html.contains(r#"data-index="1""#));
        assert!(html.contains(r#"onerror="avatarFallback(this)""#));
    }

    #[test]
    fn remote_candidates_are_left_to_the_browser() {
        let card = card(Some("https://cdn.example.com/me.jpg"));
        let chain = card_chain(&card, &ImageHeaders::new("does-not-exist"));
        assert_eq!(chain.position(), 0);
        let html = render_profile_card(&card, &chain);
        assert!(html.contains(r#"data-index="0""#));
        assert!(html.contains("display:none"));
    }

    #[test]
    fn handler_precedes_cards() {
        let data = SocialData::default();
        let html = render_social(&data, "https://unavatar.io", &ImageHeaders::new("public"));
        assert!(html.starts_with("<script>"));
        assert!(html.contains("function avatarFallback(img)"));
    }
}
