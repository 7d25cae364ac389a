use log::warn;
use rocket::figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::avatar::DEFAULT_AVATAR_SERVICE;

/// Site settings, read from the `site` table of Rocket's figment
/// (`Rocket.toml` `[default.site]` or `ROCKET_SITE={...}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_title: String,
    /// Directory holding `photos.json` and `socials.json`.
    pub data_dir: PathBuf,
    /// Directory served as static files at `/`.
    pub public_dir: PathBuf,
    pub photos_file: String,
    pub socials_file: String,
    /// Base URL of the avatar lookup service.
    pub avatar_service: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_title: "Nick Kidd".to_string(),
            data_dir: PathBuf::from("data"),
            public_dir: PathBuf::from("public"),
            photos_file: "photos.json".to_string(),
            socials_file: "socials.json".to_string(),
            avatar_service: DEFAULT_AVATAR_SERVICE.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_figment(figment: &Figment) -> Self {
        if !figment.contains("site") {
            return SiteConfig::default();
        }
        match figment.extract_inner::<SiteConfig>("site") {
            Ok(config) => config,
            Err(e) => {
                warn!("Invalid [site] config, using defaults: {}", e);
                SiteConfig::default()
            }
        }
    }

    pub fn photos_path(&self) -> PathBuf {
        self.data_dir.join(&self.photos_file)
    }

    pub fn socials_path(&self) -> PathBuf {
        self.data_dir.join(&self.socials_file)
    }
}
