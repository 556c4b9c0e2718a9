pub const NAVBAR_SHADOW_RESTING: &str = "0 1px 2px 0 rgba(0, 0, 0, 0.05)";
pub const NAVBAR_SHADOW_ELEVATED: &str =
    "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)";

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

pub fn navbar_shadow(scroll_y: f64, threshold: f64) -> &'static str {
    if scroll_y > threshold {
        NAVBAR_SHADOW_ELEVATED
    } else {
        NAVBAR_SHADOW_RESTING
    }
}

// Overlapping sections resolve to the later one in document order.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, offset: f64) -> Option<&str> {
    let position = scroll_y + offset;

    sections
        .iter()
        .filter(|section| section.contains(position))
        .last()
        .map(|section| section.id.as_str())
}

pub fn section_href(id: &str) -> String {
    format!("#{id}")
}

/// Whether each nav link should carry the active class. With no active
/// section every link is cleared.
pub fn nav_link_states<S: AsRef<str>>(hrefs: &[Option<S>], active_section: Option<&str>) -> Vec<bool> {
    let active_href = active_section.map(section_href);

    hrefs
        .iter()
        .map(|href| match (href, active_href.as_deref()) {
            (Some(href), Some(active)) => href.as_ref() == active,
            _ => false,
        })
        .collect()
}

pub fn anchor_target(href: &str) -> Option<&str> {
    let href = href.trim();
    if href.len() <= 1 || !href.starts_with('#') {
        return None;
    }

    Some(href)
}

pub fn smooth_scroll_top(section_top: f64, offset: f64) -> f64 {
    section_top - offset
}
