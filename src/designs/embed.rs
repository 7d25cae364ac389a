use crate::render::html_escape;

const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".webp", ".avif"];

/// Local screenshots and plain image URLs show as images rather than embeds.
pub fn is_image_like(url: &str) -> bool {
    if url.starts_with("/social_shots/") {
        return true;
    }
    let path = url.split('?').next().unwrap_or("").to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Video id from `watch?v=<id>` or the last path segment (`youtu.be/<id>`).
pub fn youtube_id(url: &str) -> &str {
    match url.split_once("v=") {
        Some((_, rest)) => rest.split('&').next().unwrap_or(""),
        None => url.rsplit('/').next().unwrap_or(""),
    }
}

/// Markup for one post well. Unknown URLs render nothing.
pub fn render_embed(url: &str) -> String {
    let safe = html_escape(url);
    if is_image_like(url) {
        return format!(
            r#"<img src="{}" alt="" class="post-shot" loading="lazy" decoding="async">"#,
            safe
        );
    }
    if url.contains("youtube.com") || url.contains("youtu.be") {
        return format!(
            r#"<iframe class="post-video" src="https://www.youtube.com/embed/{}" allowfullscreen style="width:100%;aspect-ratio:16/9;border:0;border-radius:12px"></iframe>"#,
            html_escape(youtube_id(url))
        );
    }
    if url.contains("instagram.com") {
        return format!(
            r#"<blockquote class="instagram-media" data-instgrm-permalink="{}" data-instgrm-version="14"></blockquote>"#,
            safe
        );
    }
    if url.contains("tiktok.com") {
        return format!(
            r#"<blockquote class="tiktok-embed" cite="{0}" style="max-width:605px;min-width:325px"><a href="{0}"> </a></blockquote>"#,
            safe
        );
    }
    if url.contains("facebook.com") {
        return format!(
            r#"<div class="fb-post" data-href="{}" data-show-text="true"></div>"#,
            safe
        );
    }
    String::new()
}
