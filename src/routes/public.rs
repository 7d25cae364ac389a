use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::State;

use crate::config::SiteConfig;
use crate::designs;
use crate::gallery::measure::ImageHeaders;
use crate::render;

use super::{load_photos, load_socials, measured_gallery};

#[get("/")]
pub fn homepage() -> Redirect {
    Redirect::to(uri!("/portfolio"))
}

// ── Portfolio ──────────────────────────────────────────

#[get("/portfolio?<tag>")]
pub fn portfolio(config: &State<SiteConfig>, tag: Option<&str>) -> RawHtml<String> {
    let photos = load_photos(config);
    let gallery = measured_gallery(config, &photos, tag);
    let body = designs::portfolio::render_gallery(&gallery);
    RawHtml(render::render_page(
        &config.site_title,
        "Portfolio",
        "Portfolio",
        &body,
    ))
}

// ── Social ─────────────────────────────────────────────

#[get("/social")]
pub fn social(config: &State<SiteConfig>) -> RawHtml<String> {
    let data = load_socials(config);
    let public = ImageHeaders::new(&config.public_dir);
    let body = designs::social::render_social(&data, &config.avatar_service, &public);
    RawHtml(render::render_page(&config.site_title, "Social", "Social", &body))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![homepage, portfolio, social]
}
