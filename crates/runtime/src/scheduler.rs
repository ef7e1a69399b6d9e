use foundation::time::Time;

use crate::frame::Frame;

pub type FrameCallback = Box<dyn FnOnce(Frame)>;

/// Frame-aligned work collected between two paints.
///
/// Callbacks run in registration order. Requesting the same key again before the
/// frame runs replaces the callback but keeps its original slot, so a burst of
/// scroll events collapses into one invocation carrying the latest state.
#[derive(Default)]
pub struct FrameScheduler {
    next_order: u64,
    frame_index: u64,
    frame_requested: bool,
    pending: Vec<(u64, &'static str, FrameCallback)>,
}

/// Callbacks drained for one frame, detached from the scheduler so they may
/// request follow-up frames while running.
pub struct FrameBatch {
    pub frame: Frame,
    callbacks: Vec<(&'static str, FrameCallback)>,
}

impl FrameBatch {
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.callbacks.iter().map(|(key, _)| *key)
    }

    pub fn run(self) {
        let frame = self.frame;
        for (_key, cb) in self.callbacks {
            cb(frame);
        }
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `cb` for the next frame.
    ///
    /// Returns `true` when no platform frame is outstanding, i.e. the caller has
    /// to ask for one.
    pub fn request(&mut self, key: &'static str, cb: impl FnOnce(Frame) + 'static) -> bool {
        if let Some(slot) = self.pending.iter_mut().find(|(_, k, _)| *k == key) {
            slot.2 = Box::new(cb);
        } else {
            let order = self.next_order;
            self.next_order = self.next_order.wrapping_add(1);
            self.pending.push((order, key, Box::new(cb)));
        }
        !std::mem::replace(&mut self.frame_requested, true)
    }

    /// The platform refused the frame asked for by the last `request`; the
    /// next request asks again.
    pub fn frame_request_failed(&mut self) {
        self.frame_requested = false;
    }

    pub fn cancel(&mut self, key: &'static str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(_, k, _)| *k != key);
        before != self.pending.len()
    }

    pub fn is_pending(&self, key: &'static str) -> bool {
        self.pending.iter().any(|(_, k, _)| *k == key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.frame_requested = false;
    }

    /// Drain everything requested so far into a batch for the frame at `time`.
    pub fn take_frame(&mut self, time: Time) -> FrameBatch {
        self.frame_requested = false;
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by_key(|(order, _, _)| *order);
        let frame = Frame::new(self.frame_index, time);
        self.frame_index = self.frame_index.wrapping_add(1);
        FrameBatch {
            frame,
            callbacks: pending.into_iter().map(|(_, k, cb)| (k, cb)).collect(),
        }
    }

    /// Convenience for callers that do not need to release a borrow first.
    pub fn run_frame(&mut self, time: Time) -> usize {
        let batch = self.take_frame(time);
        let ran = batch.len();
        batch.run();
        ran
    }
}
