use foundation::bounds::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Elements reveal this far before they actually scroll into view.
    pub margin_px: f64,
    /// Minimum spacing of bounding-box checks when polling on scroll.
    pub poll_throttle_ms: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            margin_px: 100.0,
            poll_throttle_ms: 100.0,
        }
    }
}

impl RevealConfig {
    /// `rootMargin` for an intersection observer with the same trigger band.
    pub fn root_margin(&self) -> String {
        format!("{m}px 0px {m}px 0px", m = self.margin_px)
    }

    pub fn in_trigger_band(&self, rect: &Rect, viewport_height: f64) -> bool {
        rect.intersects_band(-self.margin_px, viewport_height + self.margin_px)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStrategy {
    /// Native visibility observation.
    Observer,
    /// Scroll-driven bounding-box checks.
    Polling,
    /// Everything shown up front (reduced motion).
    Immediate,
}

impl RevealStrategy {
    pub fn choose(reduced_motion: bool, observer_available: bool) -> Self {
        if reduced_motion {
            RevealStrategy::Immediate
        } else if observer_available {
            RevealStrategy::Observer
        } else {
            RevealStrategy::Polling
        }
    }
}

/// One-way visibility flags for every element tagged for reveal.
#[derive(Debug, Clone)]
pub struct RevealSet {
    config: RevealConfig,
    revealed: Vec<bool>,
}

impl RevealSet {
    pub fn new(config: RevealConfig, count: usize) -> Self {
        Self {
            config,
            revealed: vec![false; count],
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|r| *r)
    }

    /// Mark one element visible. Returns `true` only on the first call.
    pub fn mark(&mut self, index: usize) -> bool {
        match self.revealed.get_mut(index) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    pub fn reveal_all(&mut self) -> Vec<usize> {
        (0..self.revealed.len()).filter(|&i| self.mark(i)).collect()
    }

    /// Polling check. `rect_of` is only asked about elements still hidden.
    pub fn check(
        &mut self,
        viewport_height: f64,
        mut rect_of: impl FnMut(usize) -> Option<Rect>,
    ) -> Vec<usize> {
        let mut newly = Vec::new();
        for i in 0..self.revealed.len() {
            if self.revealed[i] {
                continue;
            }
            let Some(rect) = rect_of(i) else {
                continue;
            };
            if self.config.in_trigger_band(&rect, viewport_height) {
                self.revealed[i] = true;
                newly.push(i);
            }
        }
        if !newly.is_empty() {
            tracing::debug!(count = newly.len(), "revealed elements");
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::{RevealConfig, RevealSet, RevealStrategy};
    use foundation::bounds::Rect;
    use pretty_assertions::assert_eq;

    #[test]
    fn reveals_within_margin_before_entering() {
        let mut set = RevealSet::new(RevealConfig::default(), 3);
        let rects = [
            Rect::vertical(850.0, 100.0),
            Rect::vertical(1_050.0, 100.0),
            Rect::vertical(1_200.0, 100.0),
        ];
        let newly = set.check(1_000.0, |i| Some(rects[i]));
        assert_eq!(newly, vec![0, 1]);
        assert!(!set.is_revealed(2));
    }

    #[test]
    fn revealed_elements_never_hide_again() {
        let mut set = RevealSet::new(RevealConfig::default(), 1);
        set.check(1_000.0, |_| Some(Rect::vertical(500.0, 50.0)));
        assert!(set.is_revealed(0));
        // Scrolled far past: the element is now well above the band.
        let newly = set.check(1_000.0, |_| Some(Rect::vertical(-5_000.0, 50.0)));
        assert!(newly.is_empty());
        assert!(set.is_revealed(0));
    }

    #[test]
    fn revealed_elements_are_not_measured() {
        let mut set = RevealSet::new(RevealConfig::default(), 2);
        set.mark(0);
        let mut asked = Vec::new();
        set.check(1_000.0, |i| {
            asked.push(i);
            None
        });
        assert_eq!(asked, vec![1]);
    }

    #[test]
    fn reveal_all_reports_only_new_indices() {
        let mut set = RevealSet::new(RevealConfig::default(), 3);
        set.mark(1);
        assert_eq!(set.reveal_all(), vec![0, 2]);
        assert!(set.all_revealed());
        assert!(!set.mark(1));
    }

    #[test]
    fn strategy_prefers_immediate_then_observer() {
        assert_eq!(RevealStrategy::choose(true, true), RevealStrategy::Immediate);
        assert_eq!(RevealStrategy::choose(false, true), RevealStrategy::Observer);
        assert_eq!(RevealStrategy::choose(false, false), RevealStrategy::Polling);
    }

    #[test]
    fn root_margin_matches_band() {
        assert_eq!(RevealConfig::default().root_margin(), "100px 0px 100px 0px");
    }
}
