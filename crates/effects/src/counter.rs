use foundation::time::{Time, TimeSpan};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2_000.0,
        }
    }
}

/// `1 - (1 - t)^4`, with `t` clamped to `[0, 1]`.
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Counts a display up from zero to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    span: TimeSpan,
}

impl CounterAnimation {
    pub fn new(config: &CounterConfig, target: u64, start: Time) -> Self {
        Self {
            target,
            span: TimeSpan::new(start, config.duration_ms),
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn value_at(&self, now: Time) -> u64 {
        if self.span.is_finished_at(now) {
            return self.target;
        }
        let eased = ease_out_quart(self.span.progress_at(now));
        ((self.target as f64) * eased).floor() as u64
    }

    pub fn is_finished_at(&self, now: Time) -> bool {
        self.span.is_finished_at(now)
    }
}

/// Tracks which counters have already started so each fires exactly once.
#[derive(Debug, Clone, Default)]
pub struct CounterBank {
    started: Vec<bool>,
}

impl CounterBank {
    pub fn new(count: usize) -> Self {
        Self {
            started: vec![false; count],
        }
    }

    /// Returns `true` the first time `index` is started, `false` afterwards.
    pub fn start(&mut self, index: usize) -> bool {
        match self.started.get_mut(index) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    pub fn has_started(&self, index: usize) -> bool {
        self.started.get(index).copied().unwrap_or(false)
    }
}

/// Counters currently animating, each with the handle it writes to.
#[derive(Debug, Clone)]
pub struct CounterRuns<T> {
    runs: Vec<(T, CounterAnimation)>,
}

impl<T> Default for CounterRuns<T> {
    fn default() -> Self {
        Self { runs: Vec::new() }
    }
}

impl<T> CounterRuns<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Returns `true` when this is the first running counter, i.e. the caller
    /// has to start driving frames.
    pub fn push(&mut self, handle: T, animation: CounterAnimation) -> bool {
        self.runs.push((handle, animation));
        self.runs.len() == 1
    }

    /// Write every counter's value at `now` and drop the finished ones.
    /// Returns `true` while any counter is still running.
    pub fn step(&mut self, now: Time, mut write: impl FnMut(&T, u64)) -> bool {
        self.runs.retain(|(handle, animation)| {
            write(handle, animation.value_at(now));
            !animation.is_finished_at(now)
        });
        !self.runs.is_empty()
    }

    /// Jump every running counter to its target and stop them all.
    pub fn finish_all(&mut self, mut write: impl FnMut(&T, u64)) -> usize {
        let finished = self.runs.len();
        for (handle, animation) in self.runs.drain(..) {
            write(&handle, animation.target());
        }
        finished
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }
}

/// Parse a counter target such as `"1,250"` or `" 42 "`.
pub fn parse_counter_target(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{
        CounterAnimation, CounterBank, CounterConfig, CounterRuns, ease_out_quart,
        parse_counter_target,
    };
    use foundation::time::Time;

    #[test]
    fn reaches_target_exactly_at_duration() {
        let anim = CounterAnimation::new(&CounterConfig::default(), 1_000, Time(0.0));
        assert_eq!(anim.value_at(Time(0.0)), 0);
        assert_eq!(anim.value_at(Time(2_000.0)), 1_000);
        assert_eq!(anim.value_at(Time(9_000.0)), 1_000);
        assert!(anim.is_finished_at(Time(2_000.0)));
    }

    #[test]
    fn is_monotonic_over_duration() {
        let anim = CounterAnimation::new(&CounterConfig::default(), 1_000, Time(0.0));
        let mut prev = 0;
        for ms in (0..=2_000).step_by(5) {
            let v = anim.value_at(Time(f64::from(ms)));
            assert!(v >= prev, "value dropped at {ms}ms: {prev} -> {v}");
            assert!(v <= 1_000);
            prev = v;
        }
    }

    #[test]
    fn midpoint_follows_quartic_curve() {
        let anim = CounterAnimation::new(&CounterConfig::default(), 1_000, Time(500.0));
        // t = 0.5 -> 1 - 0.0625
        assert_eq!(anim.value_at(Time(1_500.0)), 937);
        assert_eq!(ease_out_quart(-1.0), 0.0);
        assert_eq!(ease_out_quart(2.0), 1.0);
    }

    #[test]
    fn bank_starts_each_counter_once() {
        let mut bank = CounterBank::new(2);
        assert!(bank.start(0));
        assert!(!bank.start(0));
        assert!(bank.has_started(0));
        assert!(!bank.has_started(1));
        assert!(!bank.start(7));
    }

    #[test]
    fn parses_grouped_targets() {
        assert_eq!(parse_counter_target("1,250"), Some(1_250));
        assert_eq!(parse_counter_target(" 42 "), Some(42));
        assert_eq!(parse_counter_target("lots"), None);
    }

    #[test]
    fn runs_step_until_every_counter_finishes() {
        let cfg = CounterConfig::default();
        let mut runs = CounterRuns::new();
        assert!(runs.push("a", CounterAnimation::new(&cfg, 100, Time(0.0))));
        assert!(!runs.push("b", CounterAnimation::new(&cfg, 50, Time(1_000.0))));

        let mut written = Vec::new();
        assert!(runs.step(Time(2_000.0), |h, v| written.push((*h, v))));
        assert_eq!(written[0], ("a", 100));
        assert_eq!(runs.len(), 1);

        written.clear();
        assert!(!runs.step(Time(3_000.0), |h, v| written.push((*h, v))));
        assert_eq!(written, vec![("b", 50)]);
        assert!(runs.is_empty());
    }

    #[test]
    fn finish_all_jumps_running_counters_to_target() {
        let cfg = CounterConfig::default();
        let mut runs = CounterRuns::new();
        runs.push(0, CounterAnimation::new(&cfg, 1_000, Time(0.0)));
        runs.push(1, CounterAnimation::new(&cfg, 25, Time(10.0)));

        let mut written = Vec::new();
        assert_eq!(runs.finish_all(|h, v| written.push((*h, v))), 2);
        assert_eq!(written, vec![(0, 1_000), (1, 25)]);
        assert!(runs.is_empty());
        assert!(!runs.step(Time(20.0), |_, _| panic!("finished counter written")));
    }
}
