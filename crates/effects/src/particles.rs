use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub min_size_px: f64,
    pub max_size_px: f64,
    pub max_delay_s: f64,
    pub min_duration_s: f64,
    pub max_duration_s: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 30,
            min_size_px: 2.0,
            max_size_px: 6.0,
            max_delay_s: 15.0,
            min_duration_s: 10.0,
            max_duration_s: 20.0,
        }
    }
}

/// Placement and timing of one decorative particle. The float animation
/// itself lives in CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub left_pct: f64,
    pub size_px: f64,
    pub delay_s: f64,
    pub duration_s: f64,
}

fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    lo + (hi - lo) * t.clamp(0.0, 1.0)
}

/// Build the particle field from a uniform `[0, 1)` source. Nothing is spawned
/// under reduced motion.
pub fn spawn_particles(
    config: &ParticleConfig,
    reduced_motion: bool,
    mut random: impl FnMut() -> f64,
) -> Vec<Particle> {
    if reduced_motion {
        return Vec::new();
    }
    (0..config.count)
        .map(|_| Particle {
            left_pct: lerp(0.0, 100.0, random()),
            size_px: lerp(config.min_size_px, config.max_size_px, random()),
            delay_s: lerp(0.0, config.max_delay_s, random()),
            duration_s: lerp(config.min_duration_s, config.max_duration_s, random()),
        })
        .collect()
}
