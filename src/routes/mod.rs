pub mod api;
pub mod public;

use crate::config::SiteConfig;
use crate::gallery::measure::{ImageHeaders, Measure, RecordedDimensions};
use crate::gallery::Gallery;
use crate::models;
use crate::models::photo::PhotoRecord;
use crate::models::social::SocialData;

pub(crate) fn load_photos(config: &SiteConfig) -> Vec<PhotoRecord> {
    models::or_empty(PhotoRecord::load(&config.photos_path()))
}

pub(crate) fn load_socials(config: &SiteConfig) -> SocialData {
    models::or_empty(SocialData::load(&config.socials_path()))
}

/// Gallery for one request, with every orientation the server can learn
/// up front already recorded.
pub(crate) fn measured_gallery<'a>(
    config: &SiteConfig,
    photos: &'a [PhotoRecord],
    tag: Option<&str>,
) -> Gallery<'a> {
    let mut gallery = Gallery::new(photos);
    gallery.select(tag);
    let headers = ImageHeaders::new(&config.public_dir);
    let sources: [&dyn Measure; 2] = [&RecordedDimensions, &headers];
    gallery.measure(&sources);
    gallery
}
