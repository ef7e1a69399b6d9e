/// Time primitives
///
/// Timestamps follow the browser's `performance.now()` convention: milliseconds
/// since an arbitrary origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Time(pub f64); // milliseconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_ms(ms: f64) -> Self {
        Time(ms)
    }

    pub fn as_ms(self) -> f64 {
        self.0
    }

    pub fn add_ms(self, ms: f64) -> Self {
        Time(self.0 + ms)
    }

    /// Milliseconds elapsed since `earlier`, never negative.
    pub fn elapsed_since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn new(start: Time, duration_ms: f64) -> Self {
        Self {
            start,
            end: start.add_ms(duration_ms.max(0.0)),
        }
    }

    pub fn instant(t: Time) -> Self {
        Self { start: t, end: t }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// Normalized progress through the span, clamped to `[0, 1]`.
    ///
    /// A zero-length span is complete as soon as it starts.
    pub fn progress_at(&self, t: Time) -> f64 {
        let d = self.duration();
        if d <= 0.0 {
            return if t.0 >= self.start.0 { 1.0 } else { 0.0 };
        }
        (t.elapsed_since(self.start) / d).clamp(0.0, 1.0)
    }

    pub fn is_finished_at(&self, t: Time) -> bool {
        t.0 >= self.end.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Time, TimeSpan};

    #[test]
    fn progress_is_clamped() {
        let span = TimeSpan::new(Time(100.0), 200.0);
        assert_eq!(span.progress_at(Time(0.0)), 0.0);
        assert_eq!(span.progress_at(Time(200.0)), 0.5);
        assert_eq!(span.progress_at(Time(1_000.0)), 1.0);
    }

    #[test]
    fn zero_length_span_completes_immediately() {
        let span = TimeSpan::instant(Time(5.0));
        assert_eq!(span.progress_at(Time(4.0)), 0.0);
        assert_eq!(span.progress_at(Time(5.0)), 1.0);
        assert!(span.is_finished_at(Time(5.0)));
    }

    #[test]
    fn elapsed_never_negative() {
        assert_eq!(Time(10.0).elapsed_since(Time(20.0)), 0.0);
        assert_eq!(Time(30.0).elapsed_since(Time(20.0)), 10.0);
    }
}
