use crate::render::html_escape;

/// Circular initials badge, tinted by a hue derived from the name.
pub(crate) fn initials_badge(initials: &str, name: &str, hidden: bool) -> String {
    format!(
        "<div class=\"avatar avatar-initials\" style=\"background:hsl({},35%,30%){}\">{}</div>",
        name_hue(name),
        if hidden { ";display:none" } else { "" },
        html_escape(initials)
    )
}

/// Derive a consistent hue (0–360) from a name string for avatar color.
pub(crate) fn name_hue(name: &str) -> u32 {
    let mut hash: u32 = 0;
    for b in name.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(b as u32);
    }
    hash % 360
}
