use serde::{Deserialize, Serialize};
use viewport::ViewportState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { factor: 0.3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParallaxUpdate {
    /// Translate the element down by this many pixels.
    Translate(f64),
    /// Reduced motion: no transform at all.
    Disabled,
}

pub fn parallax_update(
    config: &ParallaxConfig,
    state: &ViewportState,
    viewport_height: f64,
) -> ParallaxUpdate {
    if state.reduced_motion {
        return ParallaxUpdate::Disabled;
    }
    // Motion stops after the first viewport; past it the offset stays at
    // its full extent.
    let y = state.scroll_y.clamp(0.0, viewport_height.max(0.0));
    ParallaxUpdate::Translate(y * config.factor)
}

#[cfg(test)]
mod tests {
    use super::{ParallaxConfig, ParallaxUpdate, parallax_update};
    use viewport::ViewportState;

    fn state(y: f64, reduced: bool) -> ViewportState {
        ViewportState {
            scroll_y: y,
            reduced_motion: reduced,
            ..ViewportState::default()
        }
    }

    #[test]
    fn translates_within_first_viewport() {
        let cfg = ParallaxConfig::default();
        match parallax_update(&cfg, &state(100.0, false), 800.0) {
            ParallaxUpdate::Translate(px) => assert!((px - 30.0).abs() < 1e-9),
            other => panic!("expected translate, got {other:?}"),
        }
    }

    #[test]
    fn jump_past_first_viewport_lands_on_full_offset() {
        let cfg = ParallaxConfig::default();
        let full = 800.0 * 0.3;
        for y in [801.0, 1_600.0, 50_000.0] {
            match parallax_update(&cfg, &state(y, false), 800.0) {
                ParallaxUpdate::Translate(px) => assert!((px - full).abs() < 1e-9, "{y}: {px}"),
                other => panic!("expected translate, got {other:?}"),
            }
        }
    }

    #[test]
    fn reduced_motion_never_translates() {
        let cfg = ParallaxConfig::default();
        for y in [0.0, 100.0, 500.0, 5_000.0] {
            assert_eq!(
                parallax_update(&cfg, &state(y, true), 800.0),
                ParallaxUpdate::Disabled
            );
        }
    }
}
