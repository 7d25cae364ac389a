//! Portfolio gallery layout.
//!
//! Decides whether each photo renders landscape and how many grid columns it
//! spans at each responsive breakpoint. An explicit orientation tag always
//! beats the measured aspect ratio; untagged photos fall back to their
//! measurement and render single-column until one arrives.

pub mod measure;

use log::debug;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::models::photo::{is_orientation_tag, PhotoRecord, LANDSCAPE_TAG, PORTRAIT_TAG};

use self::measure::Measure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationSource {
    Tag,
    Measured,
    Pending,
}

impl OrientationSource {
    pub fn as_str(self) -> &'static str {
        match self {
            OrientationSource::Tag => "tag",
            OrientationSource::Measured => "measured",
            OrientationSource::Pending => "pending",
        }
    }
}

/// The four responsive grid widths: 1, 2, 3 and 4 columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Breakpoint {
    One,
    Two,
    Three,
    Four,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 4] = [
        Breakpoint::One,
        Breakpoint::Two,
        Breakpoint::Three,
        Breakpoint::Four,
    ];

    pub fn columns(self) -> u8 {
        match self {
            Breakpoint::One => 1,
            Breakpoint::Two => 2,
            Breakpoint::Three => 3,
            Breakpoint::Four => 4,
        }
    }

    /// Class prefix used by the stylesheet's media queries.
    pub fn class_prefix(self) -> &'static str {
        match self {
            Breakpoint::One => "",
            Breakpoint::Two => "sm-",
            Breakpoint::Three => "lg-",
            Breakpoint::Four => "xl-",
        }
    }
}

/// Columns a photo occupies at a breakpoint. Landscape fills the row up to
/// three columns and takes half of a four-column row, so at most two
/// landscape photos share a row.
pub fn column_span(landscape: bool, breakpoint: Breakpoint) -> u8 {
    if !landscape {
        return 1;
    }
    match breakpoint {
        Breakpoint::Four => 2,
        other => other.columns(),
    }
}

pub fn resolve_landscape(tags: &BTreeSet<String>, measured: Option<bool>) -> bool {
    if tags.contains(LANDSCAPE_TAG) {
        return true;
    }
    if tags.contains(PORTRAIT_TAG) {
        return false;
    }
    measured.unwrap_or(false)
}

/// Landscape flag plus where it came from.
pub fn resolve_orientation(
    tags: &BTreeSet<String>,
    measured: Option<bool>,
) -> (bool, OrientationSource) {
    let source = if tags.contains(LANDSCAPE_TAG) || tags.contains(PORTRAIT_TAG) {
        OrientationSource::Tag
    } else if measured.is_some() {
        OrientationSource::Measured
    } else {
        OrientationSource::Pending
    };
    (resolve_landscape(tags, measured), source)
}

/// Runtime orientation measurements keyed by photo path. Owned by a single
/// gallery instance; nothing is shared or persisted.
#[derive(Debug, Clone, Default)]
pub struct OrientationState {
    measured: HashMap<String, bool>,
}

impl OrientationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `width > height` for `path`. Returns false when the value was
    /// already known.
    pub fn record(&mut self, path: &str, width: u32, height: u32) -> bool {
        let landscape = width > height;
        match self.measured.get(path) {
            Some(&known) if known == landscape => false,
            _ => {
                self.measured.insert(path.to_string(), landscape);
                true
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<bool> {
        self.measured.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.measured.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Cell<'a> {
    pub photo: &'a PhotoRecord,
    pub landscape: bool,
    pub source: OrientationSource,
    /// Spans at the 1/2/3/4-column breakpoints.
    pub spans: [u8; 4],
}

impl Cell<'_> {
    pub fn span_at(&self, breakpoint: Breakpoint) -> u8 {
        self.spans[breakpoint.columns() as usize - 1]
    }

    /// e.g. `span-1 sm-span-2 lg-span-3 xl-span-2`
    pub fn span_classes(&self) -> String {
        Breakpoint::ALL
            .iter()
            .map(|bp| format!("{}span-{}", bp.class_prefix(), self.span_at(*bp)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Content tags offered as filters: sorted, de-duplicated, orientation tags
/// left out.
pub fn filter_vocabulary(photos: &[PhotoRecord]) -> Vec<String> {
    let tags: BTreeSet<&str> = photos
        .iter()
        .flat_map(|p| p.tags.iter())
        .map(String::as_str)
        .filter(|t| !is_orientation_tag(t))
        .collect();
    tags.into_iter().map(str::to_string).collect()
}

/// `None` shows everything; a tag nobody carries yields an empty list.
pub fn filter<'a>(photos: &'a [PhotoRecord], active: Option<&str>) -> Vec<&'a PhotoRecord> {
    match active {
        None => photos.iter().collect(),
        Some(tag) => photos.iter().filter(|p| p.has_tag(tag)).collect(),
    }
}

pub fn layout<'a>(filtered: &[&'a PhotoRecord], state: &OrientationState) -> Vec<Cell<'a>> {
    filtered
        .iter()
        .map(|&photo| {
            let (landscape, source) = resolve_orientation(&photo.tags, state.get(&photo.path));
            let mut spans = [1u8; 4];
            for (slot, bp) in spans.iter_mut().zip(Breakpoint::ALL) {
                *slot = column_span(landscape, bp);
            }
            Cell {
                photo,
                landscape,
                source,
                spans,
            }
        })
        .collect()
}

/// One rendering of the portfolio: the photo list, the selected filter and
/// whatever orientations have been measured so far.
pub struct Gallery<'a> {
    photos: &'a [PhotoRecord],
    active: Option<String>,
    orientation: OrientationState,
}

impl<'a> Gallery<'a> {
    /// Starts unfiltered with nothing measured.
    pub fn new(photos: &'a [PhotoRecord]) -> Self {
        Gallery {
            photos,
            active: None,
            orientation: OrientationState::new(),
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Blank tags clear the filter.
    pub fn select(&mut self, tag: Option<&str>) {
        self.active = tag
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
    }

    pub fn vocabulary(&self) -> Vec<String> {
        filter_vocabulary(self.photos)
    }

    pub fn record(&mut self, path: &str, width: u32, height: u32) -> bool {
        self.orientation.record(path, width, height)
    }

    /// Measure every untagged photo that has no orientation yet. Sources are
    /// tried in order; the first that knows the size wins. Returns how many
    /// photos gained a measurement.
    pub fn measure(&mut self, sources: &[&dyn Measure]) -> usize {
        let mut recorded = 0;
        for photo in self.photos {
            if photo.has_tag(LANDSCAPE_TAG) || photo.has_tag(PORTRAIT_TAG) {
                continue;
            }
            if self.orientation.get(&photo.path).is_some() {
                continue;
            }
            let found = sources.iter().find_map(|s| s.measure(photo));
            if let Some(dims) = found {
                if self.record(&photo.path, dims.width, dims.height) {
                    recorded += 1;
                }
            }
        }
        debug!(
            "Orientation known for {} of {} photos",
            self.orientation.len(),
            self.photos.len()
        );
        recorded
    }

    pub fn cells(&self) -> Vec<Cell<'a>> {
        let filtered = filter(self.photos, self.active.as_deref());
        layout(&filtered, &self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(path: &str, tags: &[&str]) -> PhotoRecord {
        PhotoRecord {
            path: path.to_string(),
            caption: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            dimensions: None,
        }
    }

    #[test]
    fn landscape_tag_beats_measurement() {
        let tags: BTreeSet<String> = [LANDSCAPE_TAG.to_string()].into();
        assert!(resolve_landscape(&tags, Some(false)));
        assert!(resolve_landscape(&tags, None));
    }

    #[test]
    fn portrait_tag_beats_measurement() {
        let tags: BTreeSet<String> = [PORTRAIT_TAG.to_string()].into();
        assert!(!resolve_landscape(&tags, Some(true)));
    }

    #[test]
    fn untagged_follows_measurement() {
        let tags = BTreeSet::new();
        assert_eq!(
            resolve_orientation(&tags, None),
            (false, OrientationSource::Pending)
        );
        assert_eq!(
            resolve_orientation(&tags, Some(true)),
            (true, OrientationSource::Measured)
        );
    }

    #[test]
    fn spans_per_breakpoint() {
        assert_eq!(column_span(true, Breakpoint::One), 1);
        assert_eq!(column_span(true, Breakpoint::Two), 2);
        assert_eq!(column_span(true, Breakpoint::Three), 3);
        assert_eq!(column_span(true, Breakpoint::Four), 2);
        for bp in Breakpoint::ALL {
            assert_eq!(column_span(false, bp), 1);
        }
    }

    #[test]
    fn record_is_idempotent() {
        let mut state = OrientationState::new();
        assert!(state.record("/a.jpg", 300, 200));
        assert!(!state.record("/a.jpg", 600, 400));
        assert_eq!(state.get("/a.jpg"), Some(true));
        assert!(state.record("/a.jpg", 200, 300));
        assert_eq!(state.get("/a.jpg"), Some(false));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn square_is_not_landscape() {
        let mut state = OrientationState::new();
        state.record("/sq.jpg", 500, 500);
        assert_eq!(state.get("/sq.jpg"), Some(false));
    }

    #[test]
    fn vocabulary_skips_orientation_tags() {
        let photos = vec![
            photo("/1.jpg", &["street", "landscape"]),
            photo("/2.jpg", &["portrait", "family", "street"]),
        ];
        assert_eq!(filter_vocabulary(&photos), vec!["family", "street"]);
    }

    #[test]
    fn filter_by_unknown_tag_is_empty() {
        let photos = vec![photo("/1.jpg", &["street"])];
        assert!(filter(&photos, Some("weddings")).is_empty());
        assert_eq!(filter(&photos, None).len(), 1);
    }

    #[test]
    fn layout_uses_state_and_classes() {
        let photos = vec![photo("/wide.jpg", &[]), photo("/tall.jpg", &[])];
        let mut gallery = Gallery::new(&photos);
        gallery.record("/wide.jpg", 1600, 900);
        let cells = gallery.cells();
        assert!(cells[0].landscape);
        assert_eq!(cells[0].span_classes(), "span-1 sm-span-2 lg-span-3 xl-span-2");
        assert!(!cells[1].landscape);
        assert_eq!(cells[1].source, OrientationSource::Pending);
        assert_eq!(cells[1].span_classes(), "span-1 sm-span-1 lg-span-1 xl-span-1");
    }

    #[test]
    fn selecting_a_tag_relayouts() {
        let photos = vec![photo("/1.jpg", &["street"]), photo("/2.jpg", &["family"])];
        let mut gallery = Gallery::new(&photos);
        assert_eq!(gallery.cells().len(), 2);
        gallery.select(Some("family"));
        let cells = gallery.cells();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].photo.path, "/2.jpg");
        gallery.select(Some("  "));
        assert_eq!(gallery.active(), None);
        assert_eq!(gallery.cells().len(), 2);
    }
}
