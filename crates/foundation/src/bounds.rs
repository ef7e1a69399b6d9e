/// Viewport-relative bounding box, as reported by `getBoundingClientRect`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Rect {
            top,
            bottom,
            left,
            right,
        }
    }

    /// A full-width box spanning `top..top + height`.
    pub fn vertical(top: f64, height: f64) -> Self {
        Rect::new(top, top + height.max(0.0), 0.0, 0.0)
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// True when any part of the box lies inside the vertical band `lo..hi`.
    pub fn intersects_band(&self, lo: f64, hi: f64) -> bool {
        self.top < hi && self.bottom > lo
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn band_intersection_is_exclusive_at_edges() {
        let r = Rect::vertical(100.0, 50.0);
        assert!(r.intersects_band(0.0, 120.0));
        assert!(!r.intersects_band(0.0, 100.0));
        assert!(!r.intersects_band(150.0, 300.0));
        assert!(r.intersects_band(149.0, 300.0));
    }
}
