use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Widths strictly below this are treated as mobile.
    pub mobile_breakpoint_px: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: 900.0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

/// Snapshot of everything the visual triggers read.
///
/// Handlers copy this out of the tracker once per event, so every trigger in a
/// frame sees the same values.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scroll_y: f64,
    pub scroll_direction: ScrollDirection,
    pub is_mobile: bool,
    pub reduced_motion: bool,
}

#[derive(Debug, Clone)]
pub struct ViewportTracker {
    config: ViewportConfig,
    state: ViewportState,
}

impl ViewportTracker {
    pub fn new(config: ViewportConfig, width: f64, scroll_y: f64, reduced_motion: bool) -> Self {
        let mut tracker = Self {
            config,
            state: ViewportState {
                scroll_y,
                reduced_motion,
                ..ViewportState::default()
            },
        };
        tracker.on_resize(width);
        tracker
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Record a new scroll offset and derive the direction.
    ///
    /// Any positive delta means down, any negative delta means up, and a zero
    /// delta keeps the previous direction.
    pub fn on_scroll(&mut self, scroll_y: f64) -> ViewportState {
        let delta = scroll_y - self.state.scroll_y;
        if delta > 0.0 {
            self.state.scroll_direction = ScrollDirection::Down;
        } else if delta < 0.0 {
            self.state.scroll_direction = ScrollDirection::Up;
        }
        self.state.scroll_y = scroll_y;
        self.state
    }

    pub fn on_resize(&mut self, width: f64) -> ViewportState {
        let is_mobile = width < self.config.mobile_breakpoint_px;
        if is_mobile != self.state.is_mobile {
            tracing::debug!(width, is_mobile, "device class changed");
        }
        self.state.is_mobile = is_mobile;
        self.state
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) -> ViewportState {
        if reduced != self.state.reduced_motion {
            tracing::info!(reduced, "motion preference changed");
        }
        self.state.reduced_motion = reduced;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::{ScrollDirection, ViewportConfig, ViewportTracker};

    fn tracker(width: f64) -> ViewportTracker {
        ViewportTracker::new(ViewportConfig::default(), width, 0.0, false)
    }

    #[test]
    fn mobile_iff_width_below_breakpoint() {
        let mut t = tracker(1200.0);
        for (width, mobile) in [(899.0, true), (900.0, false), (320.0, true), (1920.0, false)] {
            assert_eq!(t.on_resize(width).is_mobile, mobile, "width {width}");
        }
    }

    #[test]
    fn initial_width_sets_device_class() {
        assert!(tracker(400.0).state().is_mobile);
        assert!(!tracker(1024.0).state().is_mobile);
    }

    #[test]
    fn direction_follows_delta_sign() {
        let mut t = tracker(1200.0);
        assert_eq!(t.on_scroll(10.0).scroll_direction, ScrollDirection::Down);
        assert_eq!(t.on_scroll(4.0).scroll_direction, ScrollDirection::Up);
        assert_eq!(t.on_scroll(4.0).scroll_direction, ScrollDirection::Up);
        assert_eq!(t.on_scroll(4.5).scroll_direction, ScrollDirection::Down);
        assert_eq!(t.state().scroll_y, 4.5);
    }

    #[test]
    fn motion_preference_is_live() {
        let mut t = tracker(1200.0);
        assert!(!t.state().reduced_motion);
        assert!(t.set_reduced_motion(true).reduced_motion);
        assert!(!t.set_reduced_motion(false).reduced_motion);
    }
}
