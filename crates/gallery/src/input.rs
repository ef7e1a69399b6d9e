//! Keyboard and touch input resolution for the gallery.

use serde::{Deserialize, Serialize};

use crate::controller::Navigation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKey {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

impl GalleryKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(GalleryKey::ArrowLeft),
            "ArrowRight" | "Right" => Some(GalleryKey::ArrowRight),
            "Home" => Some(GalleryKey::Home),
            "End" => Some(GalleryKey::End),
            _ => None,
        }
    }

    pub fn navigation(self) -> Navigation {
        match self {
            GalleryKey::ArrowLeft => Navigation::Previous,
            GalleryKey::ArrowRight => Navigation::Next,
            GalleryKey::Home => Navigation::First,
            GalleryKey::End => Navigation::Last,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub threshold_px: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self { threshold_px: 50.0 }
    }
}

/// Resolve a completed touch into a navigation step.
///
/// Displacement is measured as `start - end`, so dragging the finger to the left
/// is positive and moves to the next entry. The horizontal component has to
/// beat both the threshold and the vertical component.
pub fn resolve_swipe(config: &SwipeConfig, start: TouchPoint, end: TouchPoint) -> Option<Navigation> {
    let dx = start.x - end.x;
    let dy = start.y - end.y;
    if dx.abs() <= config.threshold_px || dx.abs() <= dy.abs() {
        return None;
    }
    if dx > 0.0 {
        Some(Navigation::Next)
    } else {
        Some(Navigation::Previous)
    }
}

/// Tracks the start of a touch between `touchstart` and `touchend`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    start: Option<TouchPoint>,
}

impl SwipeTracker {
    pub fn begin(&mut self, at: TouchPoint) {
        self.start = Some(at);
    }

    pub fn finish(&mut self, config: &SwipeConfig, at: TouchPoint) -> Option<Navigation> {
        let start = self.start.take()?;
        resolve_swipe(config, start, at)
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{GalleryKey, SwipeConfig, SwipeTracker, TouchPoint, resolve_swipe};
    use crate::controller::Navigation;

    #[test]
    fn maps_dom_key_names() {
        assert_eq!(GalleryKey::from_key_name("End"), Some(GalleryKey::End));
        assert_eq!(GalleryKey::from_key_name("Home"), Some(GalleryKey::Home));
        assert_eq!(GalleryKey::from_key_name("Right"), Some(GalleryKey::ArrowRight));
        assert_eq!(GalleryKey::from_key_name("Enter"), None);
    }

    #[test]
    fn wide_flat_swipe_navigates_in_its_direction() {
        let cfg = SwipeConfig::default();
        let left = resolve_swipe(&cfg, TouchPoint::new(200.0, 100.0), TouchPoint::new(140.0, 110.0));
        assert_eq!(left, Some(Navigation::Next));
        let right = resolve_swipe(&cfg, TouchPoint::new(140.0, 100.0), TouchPoint::new(200.0, 90.0));
        assert_eq!(right, Some(Navigation::Previous));
    }

    #[test]
    fn short_or_vertical_swipes_are_ignored() {
        let cfg = SwipeConfig::default();
        assert_eq!(
            resolve_swipe(&cfg, TouchPoint::new(100.0, 0.0), TouchPoint::new(70.0, 0.0)),
            None
        );
        assert_eq!(
            resolve_swipe(&cfg, TouchPoint::new(100.0, 0.0), TouchPoint::new(20.0, 120.0)),
            None
        );
    }

    #[test]
    fn tracker_needs_a_start() {
        let cfg = SwipeConfig::default();
        let mut t = SwipeTracker::default();
        assert_eq!(t.finish(&cfg, TouchPoint::new(0.0, 0.0)), None);
        t.begin(TouchPoint::new(300.0, 0.0));
        assert_eq!(t.finish(&cfg, TouchPoint::new(200.0, 0.0)), Some(Navigation::Next));
        assert_eq!(t.finish(&cfg, TouchPoint::new(0.0, 0.0)), None);
    }
}
