#[macro_use]
extern crate rocket;

use rocket::fs::FileServer;
use rocket::response::content::RawHtml;
use rocket::{Build, Request, Rocket};

mod avatar;
mod boot;
mod config;
mod designs;
mod gallery;
mod models;
mod render;
mod routes;


use config::SiteConfig;

#[catch(404)]
fn not_found(req: &Request) -> RawHtml<String> {
    let site_title = req
        .rocket()
        .state::<SiteConfig>()
        .map(|c| c.site_title.as_str())
        .unwrap_or("");
    RawHtml(render::render_page(site_title, "Not found", "", &render::render_404()))
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Home</a></body></html>".to_string())
}

/// Assemble the server for a given configuration. The public directory must
/// already exist.
pub fn build(config: SiteConfig) -> Rocket<Build> {
    let public_dir = config.public_dir.clone();
    rocket::build()
        .manage(config)
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .mount("/", FileServer::from(public_dir))
        .register("/", catchers![not_found, server_error])
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = SiteConfig::from_figment(&rocket::Config::figment());

    // Boot check — verify/create directories, warn about missing data
    boot::run(&config);

    log::info!(
        "Serving data from {} and files from {}",
        config.data_dir.display(),
        config.public_dir.display()
    );

    build(config)
}
