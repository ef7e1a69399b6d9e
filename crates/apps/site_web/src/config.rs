use effects::{
    BackToTopConfig, CounterConfig, NavbarConfig, ParallaxConfig, ParticleConfig, RevealConfig,
    SectionConfig,
};
use gallery::GalleryConfig;
use serde::{Deserialize, Serialize};
use viewport::ViewportConfig;

/// Attribute on `<body>` that may carry a partial JSON override.
pub const CONFIG_ATTRIBUTE: &str = "data-site-config";

/// Every tunable threshold, duration and breakpoint in one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub viewport: ViewportConfig,
    pub navbar: NavbarConfig,
    pub reveal: RevealConfig,
    pub back_to_top: BackToTopConfig,
    pub parallax: ParallaxConfig,
    pub counter: CounterConfig,
    pub sections: SectionConfig,
    pub particles: ParticleConfig,
    pub gallery: GalleryConfig,
    pub resize_debounce_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            navbar: NavbarConfig::default(),
            reveal: RevealConfig::default(),
            back_to_top: BackToTopConfig::default(),
            parallax: ParallaxConfig::default(),
            counter: CounterConfig::default(),
            sections: SectionConfig::default(),
            particles: ParticleConfig::default(),
            gallery: GalleryConfig::default(),
            resize_debounce_ms: 150,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Defaults, overridden by the body attribute when it parses.
    pub fn from_attribute(raw: Option<String>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => {
                tracing::debug!("site config override applied");
                config
            }
            Err(err) => {
                tracing::warn!(%err, "ignoring invalid {CONFIG_ATTRIBUTE}");
                Self::default()
            }
        }
    }
}
