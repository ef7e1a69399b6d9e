use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// A section counts as current once its top is this close to the viewport top.
    pub active_offset_px: f64,
    /// Height of the fixed header that anchor scrolling must clear.
    pub header_offset_px: f64,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            active_offset_px: 150.0,
            header_offset_px: 80.0,
        }
    }
}

/// Index of the section the reader is in, given document-relative section tops
/// in page order. `None` above the first section.
pub fn active_section(config: &SectionConfig, section_tops: &[f64], scroll_y: f64) -> Option<usize> {
    let probe = scroll_y + config.active_offset_px;
    section_tops.iter().rposition(|top| *top <= probe)
}

/// Scroll offset that puts an anchor target just below the fixed header.
pub fn anchor_scroll_target(config: &SectionConfig, target_document_top: f64) -> f64 {
    (target_document_top - config.header_offset_px).max(0.0)
}

/// Extract the fragment id from an in-page link (`"#features"` -> `"features"`).
pub fn in_page_anchor(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() { None } else { Some(id) }
}
