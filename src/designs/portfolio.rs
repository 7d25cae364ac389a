//! Portfolio gallery page.
//! Filter chips, the responsive photo grid, and a lightbox.

use crate::gallery::{column_span, Breakpoint, Gallery, OrientationSource};
use crate::render::{html_escape, url_encode_component};

/// Render the filter bar and grid for one gallery state.
pub fn render_gallery(gallery: &Gallery) -> String {
    let cells = gallery.cells();
    let vocabulary = gallery.vocabulary();
    let mut html = String::new();

    if !vocabulary.is_empty() {
        html.push_str(&render_tag_filter(&vocabulary, gallery.active()));
    }

    if cells.is_empty() {
        let msg = match gallery.active() {
            Some(tag) => format!("No photos tagged “{}”.", html_escape(tag)),
            None => "No photos yet.".to_string(),
        };
        html.push_str(&format!(r#"<p class="gallery-empty">{}</p>"#, msg));
        return html;
    }

    // Spans a pending photo switches to if the browser finds it landscape.
    let landscape_classes = Breakpoint::ALL
        .iter()
        .map(|bp| format!("{}span-{}", bp.class_prefix(), column_span(true, *bp)))
        .collect::<Vec<_>>()
        .join(" ");

    html.push_str(&format!(
        r#"<div class="gallery" data-landscape-classes="{}">"#,
        landscape_classes
    ));
    for cell in &cells {
        let photo = cell.photo;
        let src = html_escape(&photo.path);
        let alt = html_escape(&photo.caption);
        html.push_str(&format!(
            r#"
    <a href="{src}" class="gallery-item {spans}" data-orientation="{source}" aria-label="Open {alt}">
        <img src="{src}" alt="{alt}" loading="lazy">
    </a>"#,
            src = src,
            alt = alt,
            spans = cell.span_classes(),
            source = cell.source.as_str(),
        ));
    }
    html.push_str("\n</div>\n");
    html.push_str(GALLERY_SCRIPT);

    let pending = cells
        .iter()
        .filter(|c| c.source == OrientationSource::Pending)
        .count();
    if pending > 0 {
        log::debug!("{} photo(s) left for the browser to measure", pending);
    }

    html
}

fn render_tag_filter(tags: &[String], active: Option<&str>) -> String {
    let mut html = String::from(r#"<div class="tag-filter-wrap"><div class="filter-label">Filter</div><div class="tag-filter">"#);
    let all_class = if active.is_none() { " class=\"active\"" } else { "" };
    html.push_str(&format!(r#"<a href="/portfolio"{}>All</a>"#, all_class));
    for tag in tags {
        let class = if active == Some(tag.as_str()) {
            " class=\"active\""
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<a href="/portfolio?tag={}"{}>{}</a>"#,
            url_encode_component(tag),
            class,
            html_escape(tag)
        ));
    }
    html.push_str("</div></div>");
    html
}

/// Pending photos reflow once their natural size is known; clicks open the
/// lightbox, Escape or a click closes it.
const GALLERY_SCRIPT: &str = r#"<div class="lightbox" role="dialog" aria-modal="true"><img src="" alt=""></div>
<script>
(function(){
var grid=document.querySelector('.gallery');
if(!grid)return;
var wide=grid.dataset.landscapeClasses;
grid.querySelectorAll('.gallery-item[data-orientation=pending] img').forEach(function(img){
    var apply=function(){
        if(!img.naturalWidth)return;
        var item=img.parentNode;
        item.className='gallery-item '+(img.naturalWidth>img.naturalHeight?wide:'span-1 sm-span-1 lg-span-1 xl-span-1');
        item.dataset.orientation='measured';
    };
    if(img.complete)apply();else img.addEventListener('load',apply);
});
var box=document.querySelector('.lightbox');
var boxImg=box.querySelector('img');
var close=function(){box.classList.remove('open');boxImg.src='';};
grid.addEventListener('click',function(e){
    var item=e.target.closest('.gallery-item');
    if(!item)return;
    e.preventDefault();
    var img=item.querySelector('img');
    boxImg.src=img.src;boxImg.alt=img.alt;
    box.classList.add('open');
});
box.addEventListener('click',close);
document.addEventListener('keydown',function(e){if(e.key==='Escape')close();});
})();
</script>"#;
