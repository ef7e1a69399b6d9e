/// Raw document scroll geometry, read from the window on each scroll frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, viewport_height: f64, document_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_height,
            document_height,
        }
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    /// Fraction of the page scrolled, clamped to `[0, 1]`. A page that fits in
    /// the viewport reports zero.
    pub fn progress(&self) -> f64 {
        let max = self.max_scroll();
        if max <= 0.0 {
            return 0.0;
        }
        (self.scroll_y / max).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollMetrics;

    #[test]
    fn progress_is_clamped_fraction_of_max_scroll() {
        let m = ScrollMetrics::new(500.0, 1000.0, 3000.0);
        assert_eq!(m.max_scroll(), 2000.0);
        assert_eq!(m.progress(), 0.25);
        assert_eq!(ScrollMetrics::new(2100.0, 1000.0, 3000.0).progress(), 1.0);
        assert_eq!(ScrollMetrics::new(-40.0, 1000.0, 3000.0).progress(), 0.0);
    }

    #[test]
    fn short_page_has_no_progress() {
        assert_eq!(ScrollMetrics::new(0.0, 1000.0, 800.0).progress(), 0.0);
    }
}
