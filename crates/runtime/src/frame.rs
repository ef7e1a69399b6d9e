use foundation::time::Time;

/// Metadata for one rendering frame.
///
/// The browser layer builds one of these per `requestAnimationFrame` tick; tests
/// build them by hand so frame-aligned work stays deterministic.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Timestamp handed to the frame callback (milliseconds).
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, time: Time) -> Self {
        Self { index, time }
    }

    pub fn next(self, time: Time) -> Self {
        Self::new(self.index + 1, time)
    }
}
