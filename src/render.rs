/// Wrap a page body in the site shell: head, nav, stylesheet and footer.
pub fn render_page(site_title: &str, page_title: &str, active_nav: &str, body: &str) -> String {
    let nav_link = |href: &str, label: &str| -> String {
        let class = if label == active_nav { " class=\"active\"" } else { "" };
        format!(r#"<a href="{}"{}>{}</a>"#, href, class, label)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_title} · {site_title}</title>
<style>{css}</style>
</head>
<body>
<header class="site-header">
    <a class="site-title" href="/">{site_title}</a>
    <nav>{portfolio} {social}</nav>
</header>
<main>
{body}
</main>
<footer class="site-footer">&copy; {site_title}</footer>
</body>
</html>"#,
        page_title = html_escape(page_title),
        site_title = html_escape(site_title),
        css = SITE_CSS,
        portfolio = nav_link("/portfolio", "Portfolio"),
        social = nav_link("/social", "Social"),
        body = body,
    )
}

/// Grid spans per breakpoint. Class names come from `Cell::span_classes`.
const SITE_CSS: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#0f0f10;color:#eee}\
a{color:inherit}\
.site-header{display:flex;justify-content:space-between;align-items:center;padding:16px 24px}\
.site-header nav a{margin-left:16px;text-decoration:none;opacity:.7}\
.site-header nav a.active{opacity:1;text-decoration:underline}\
main{max-width:1200px;margin:0 auto;padding:32px 16px}\
.site-footer{text-align:center;padding:32px;opacity:.5;font-size:13px}\
.tag-filter{display:flex;flex-wrap:wrap;gap:8px;margin-bottom:24px}\
.tag-filter a{padding:4px 12px;border:1px solid #444;border-radius:4px;text-decoration:none}\
.tag-filter a.active{background:#fff;color:#000}\
.gallery{display:grid;gap:24px;grid-template-columns:repeat(1,1fr)}\
.gallery-item{display:block;overflow:hidden;border-radius:12px;border:1px solid #333}\
.gallery-item img{width:100%;height:auto;display:block;object-fit:cover}\
.span-1{grid-column:span 1}\
@media(min-width:640px){.gallery{grid-template-columns:repeat(2,1fr)}.sm-span-1{grid-column:span 1}.sm-span-2{grid-column:span 2}}\
@media(min-width:1024px){.gallery{grid-template-columns:repeat(3,1fr)}.lg-span-1{grid-column:span 1}.lg-span-3{grid-column:span 3}}\
@media(min-width:1280px){.gallery{grid-template-columns:repeat(4,1fr)}.xl-span-1{grid-column:span 1}.xl-span-2{grid-column:span 2}}\
.lightbox{position:fixed;inset:0;background:rgba(0,0,0,.8);display:none;align-items:center;justify-content:center;z-index:50}\
.lightbox.open{display:flex}\
.lightbox img{max-height:90vh;max-width:90vw;border-radius:12px}\
.social-section{margin-bottom:64px}\
.social-section h2{text-transform:capitalize;font-family:serif;font-size:2rem}\
.social-row{display:grid;gap:24px;grid-template-columns:1fr}\
@media(min-width:1024px){.social-row{grid-template-columns:1fr 2fr}}\
.profile-card{display:block;border:1px solid #333;border-radius:16px;overflow:hidden;text-decoration:none}\
.profile-card-header{color:#fff;padding:12px 24px;font-size:12px;text-transform:uppercase;letter-spacing:.1em}\
.profile-card-body{display:flex;align-items:center;gap:16px;padding:24px}\
.avatar{width:64px;height:64px;border-radius:50%;object-fit:cover;border:1px solid #444}\
.avatar-initials{display:grid;place-items:center;background:linear-gradient(135deg,#262626,#404040);font-weight:600}\
.profile-name{font-size:1.1rem;font-weight:500}\
.profile-url{font-size:12px;opacity:.6;word-break:break-all}\
.empty-card,.well{border:1px solid #333;border-radius:16px;padding:24px}\
.well{min-height:360px;display:grid;place-items:center;margin-bottom:24px}\
.well img{max-width:100%;height:auto;border-radius:12px}\
";

/// Percent-encode like JavaScript's `encodeURIComponent`.
pub fn url_encode_component(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => {
                result.push(b as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", b));
            }
        }
    }
    result
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn render_404() -> String {
    r#"<div style="text-align:center;padding:80px 0">
    <h1>404</h1>
    <p>Page not found.</p>
    <a href="/">← Back to home</a>
</div>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(url_encode_component("@nick"), "%40nick");
        assert_eq!(url_encode_component("id:42"), "id%3A42");
        assert_eq!(url_encode_component("a b/c?d=e"), "a%20b%2Fc%3Fd%3De");
        assert_eq!(url_encode_component("it's(ok)!*~"), "it's(ok)!*~");
        assert_eq!(url_encode_component("é"), "%C3%A9");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(html_escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn page_marks_active_nav() {
        let html = render_page("Nick <Kidd>", "Social", "Social", "<p>body</p>");
        assert!(html.contains(r#"<a href="/social" class="active">Social</a>"#));
        assert!(html.contains(r#"<a href="/portfolio">Portfolio</a>"#));
        assert!(html.contains("Nick &lt;Kidd&gt;"));
        assert!(html.contains("<p>body</p>"));
    }
}
