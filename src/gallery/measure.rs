use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::models::photo::{Dimensions, PhotoRecord};

/// Something that can tell the natural pixel size of a photo.
pub trait Measure {
    fn measure(&self, photo: &PhotoRecord) -> Option<Dimensions>;
}

/// Dimensions written into the photo list ahead of time.
pub struct RecordedDimensions;

impl Measure for RecordedDimensions {
    fn measure(&self, photo: &PhotoRecord) -> Option<Dimensions> {
        photo.dimensions
    }
}

/// Reads the image header from the public directory the site serves from.
pub struct ImageHeaders {
    root: PathBuf,
}

impl ImageHeaders {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ImageHeaders { root: root.into() }
    }

    /// Map a site path like `/portfolio/a.jpg` to a file under the root.
    /// Remote URLs and anything escaping the root resolve to `None`.
    pub fn resolve(&self, site_path: &str) -> Option<PathBuf> {
        if site_path.contains("://") || site_path.starts_with("//") {
            return None;
        }
        let rel = site_path.split(['?', '#']).next().unwrap_or("");
        let rel = Path::new(rel.trim_start_matches('/'));
        if rel.as_os_str().is_empty() {
            return None;
        }
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.root.join(rel))
    }
}

impl Measure for ImageHeaders {
    fn measure(&self, photo: &PhotoRecord) -> Option<Dimensions> {
        let file = self.resolve(&photo.path)?;
        match image::image_dimensions(&file) {
            Ok((w, h)) => Dimensions::new(w, h),
            Err(e) => {
                debug!("No dimensions for {}: {}", file.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_stays_under_root() {
        let headers = ImageHeaders::new("public");
        assert_eq!(
            headers.resolve("/portfolio/a.jpg"),
            Some(PathBuf::from("public/portfolio/a.jpg"))
        );
        assert_eq!(
            headers.resolve("/portfolio/a.jpg?v=2"),
            Some(PathBuf::from("public/portfolio/a.jpg"))
        );
        assert_eq!(headers.resolve("/../secret.jpg"), None);
        assert_eq!(headers.resolve("https://cdn.example.com/a.jpg"), None);
        assert_eq!(headers.resolve("//cdn.example.com/a.jpg"), None);
        assert_eq!(headers.resolve("/"), None);
    }

    #[test]
    fn missing_file_measures_nothing() {
        let headers = ImageHeaders::new("does-not-exist");
        let photo = PhotoRecord {
            path: "/portfolio/nope.jpg".into(),
            caption: String::new(),
            tags: Default::default(),
            dimensions: None,
        };
        assert_eq!(headers.measure(&photo), None);
        assert_eq!(RecordedDimensions.measure(&photo), None);
    }
}
