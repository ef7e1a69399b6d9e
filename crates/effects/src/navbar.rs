use serde::{Deserialize, Serialize};
use viewport::ViewportState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Offset past which the bar switches to its compact "scrolled" style.
    pub scrolled_threshold_px: f64,
    /// Minimum movement since the last accepted check before the bar toggles.
    pub hide_delta_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold_px: 50.0,
            hide_delta_px: 5.0,
        }
    }
}

impl NavbarConfig {
    /// The bar only auto-hides once it is this far down the page.
    pub fn hide_offset_px(&self) -> f64 {
        self.scrolled_threshold_px * 2.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavbarPresentation {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Hide-on-scroll-down navigation bar.
///
/// Small jitters accumulate against the last accepted offset until they exceed
/// `hide_delta_px`; only then does the bar react. That is the whole of the
/// hysteresis, there is no cooldown.
#[derive(Debug, Clone)]
pub struct NavbarAutoHide {
    config: NavbarConfig,
    last_checked_y: f64,
    hidden: bool,
}

impl NavbarAutoHide {
    pub fn new(config: NavbarConfig, scroll_y: f64) -> Self {
        Self {
            config,
            last_checked_y: scroll_y,
            hidden: false,
        }
    }

    pub fn presentation(&self, scroll_y: f64) -> NavbarPresentation {
        NavbarPresentation {
            scrolled: scroll_y > self.config.scrolled_threshold_px,
            hidden: self.hidden,
        }
    }

    pub fn update(&mut self, state: &ViewportState) -> NavbarPresentation {
        let y = state.scroll_y;
        if y <= self.config.scrolled_threshold_px || state.is_mobile {
            self.hidden = false;
            self.last_checked_y = y;
            return self.presentation(y);
        }

        let delta = y - self.last_checked_y;
        if delta.abs() <= self.config.hide_delta_px {
            return self.presentation(y);
        }

        if delta > 0.0 && y > self.config.hide_offset_px() {
            self.hidden = true;
        } else if delta < 0.0 {
            self.hidden = false;
        }
        self.last_checked_y = y;
        self.presentation(y)
    }
}

#[cfg(test)]
mod tests {
    use super::{NavbarAutoHide, NavbarConfig};
    use viewport::ViewportState;

    fn at(y: f64) -> ViewportState {
        ViewportState {
            scroll_y: y,
            ..ViewportState::default()
        }
    }

    #[test]
    fn hides_on_downward_scroll_past_double_threshold() {
        let mut nav = NavbarAutoHide::new(NavbarConfig::default(), 0.0);
        let p = nav.update(&at(60.0));
        assert!(p.scrolled);
        assert!(!p.hidden);
        assert!(nav.update(&at(120.0)).hidden);
    }

    #[test]
    fn does_not_hide_below_hide_offset() {
        let mut nav = NavbarAutoHide::new(NavbarConfig::default(), 0.0);
        nav.update(&at(60.0));
        assert!(!nav.update(&at(95.0)).hidden);
    }

    #[test]
    fn small_jitters_accumulate_before_toggling() {
        let mut nav = NavbarAutoHide::new(NavbarConfig::default(), 200.0);
        assert!(!nav.update(&at(203.0)).hidden);
        assert!(!nav.update(&at(205.0)).hidden);
        // 6px past the last accepted offset.
        assert!(nav.update(&at(206.0)).hidden);
        // Upward jitter under the delta keeps it hidden.
        assert!(nav.update(&at(202.0)).hidden);
        assert!(!nav.update(&at(199.0)).hidden);
    }

    #[test]
    fn always_shown_near_top_and_on_mobile() {
        let mut nav = NavbarAutoHide::new(NavbarConfig::default(), 200.0);
        assert!(nav.update(&at(400.0)).hidden);
        let p = nav.update(&at(40.0));
        assert!(!p.hidden);
        assert!(!p.scrolled);

        nav.update(&at(400.0));
        let mobile = ViewportState {
            scroll_y: 800.0,
            is_mobile: true,
            ..ViewportState::default()
        };
        assert!(!nav.update(&mobile).hidden);
    }
}
