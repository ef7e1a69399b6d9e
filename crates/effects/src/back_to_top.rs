use serde::{Deserialize, Serialize};
use viewport::ScrollMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackToTopConfig {
    pub show_threshold_px: f64,
    /// Radius of the SVG progress ring.
    pub ring_radius: f64,
}

impl Default for BackToTopConfig {
    fn default() -> Self {
        Self {
            show_threshold_px: 300.0,
            ring_radius: 20.0,
        }
    }
}

impl BackToTopConfig {
    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.ring_radius
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BackToTopFrame {
    pub visible: bool,
    /// Scroll progress in `[0, 1]`.
    pub progress: f64,
    /// Drawn length of the ring, `progress * circumference`.
    pub stroke_length: f64,
    /// Matching `stroke-dashoffset`, `circumference - stroke_length`.
    pub dash_offset: f64,
    /// Set on the single frame where the button first appears this session.
    pub play_attention: bool,
}

#[derive(Debug, Clone)]
pub struct BackToTop {
    config: BackToTopConfig,
    visible: bool,
    attention_played: bool,
}

impl BackToTop {
    pub fn new(config: BackToTopConfig) -> Self {
        Self {
            config,
            visible: false,
            attention_played: false,
        }
    }

    pub fn config(&self) -> &BackToTopConfig {
        &self.config
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn update(&mut self, metrics: &ScrollMetrics) -> BackToTopFrame {
        let visible = metrics.scroll_y > self.config.show_threshold_px;
        let play_attention = visible && !self.attention_played;
        if play_attention {
            self.attention_played = true;
        }
        self.visible = visible;

        let progress = metrics.progress();
        let circumference = self.config.circumference();
        let stroke_length = progress * circumference;
        BackToTopFrame {
            visible,
            progress,
            stroke_length,
            dash_offset: circumference - stroke_length,
            play_attention,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BackToTop, BackToTopConfig};
    use viewport::ScrollMetrics;

    #[test]
    fn visible_only_past_threshold() {
        let mut b = BackToTop::new(BackToTopConfig::default());
        assert!(!b.update(&ScrollMetrics::new(300.0, 800.0, 4_000.0)).visible);
        assert!(b.update(&ScrollMetrics::new(301.0, 800.0, 4_000.0)).visible);
    }

    #[test]
    fn progress_spans_zero_to_full_circumference() {
        let mut b = BackToTop::new(BackToTopConfig::default());
        let c = b.config().circumference();
        let top = b.update(&ScrollMetrics::new(0.0, 800.0, 4_000.0));
        assert_eq!(top.stroke_length, 0.0);
        assert_eq!(top.dash_offset, c);
        let bottom = b.update(&ScrollMetrics::new(3_200.0, 800.0, 4_000.0));
        assert_eq!(bottom.progress, 1.0);
        assert_eq!(bottom.stroke_length, c);
        assert_eq!(bottom.dash_offset, 0.0);
    }

    #[test]
    fn attention_plays_once_per_session() {
        let mut b = BackToTop::new(BackToTopConfig::default());
        assert!(b.update(&ScrollMetrics::new(500.0, 800.0, 4_000.0)).play_attention);
        assert!(!b.update(&ScrollMetrics::new(600.0, 800.0, 4_000.0)).play_attention);
        b.update(&ScrollMetrics::new(0.0, 800.0, 4_000.0));
        assert!(!b.update(&ScrollMetrics::new(500.0, 800.0, 4_000.0)).play_attention);
    }
}
