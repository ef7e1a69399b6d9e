//! Cancellable one-shot and repeating timers.
//!
//! Components talk to a [`TimerHost`] rather than to `window.setTimeout`
//! directly. The browser layer implements it on top of the window timers;
//! [`TimerQueue`] is a deterministic host driven by an explicit clock.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use foundation::ids::TimerId;
use foundation::time::Time;

pub type TimerCallback = Box<dyn FnMut()>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerError(pub String);

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer scheduling failed: {}", self.0)
    }
}

impl std::error::Error for TimerError {}

pub trait TimerHost {
    type Handle: Copy + Eq + fmt::Debug;

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback)
    -> Result<Self::Handle, TimerError>;

    fn set_interval(
        &self,
        period_ms: u32,
        callback: TimerCallback,
    ) -> Result<Self::Handle, TimerError>;

    /// Cancel a timer. Clearing an unknown or already-fired handle is a no-op.
    fn clear(&self, handle: Self::Handle);
}

struct Entry {
    id: TimerId,
    due: Time,
    period_ms: Option<f64>,
    // Taken out while the callback runs so the queue is not borrowed.
    callback: Option<TimerCallback>,
}

#[derive(Default)]
struct Inner {
    now: Time,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Deterministic timer host.
///
/// Due timers fire in `(deadline, creation order)` order. Cancelling a timer does
/// not perturb the order of the rest, and callbacks may freely schedule or
/// cancel timers (including themselves).
#[derive(Clone, Default)]
pub struct TimerQueue {
    inner: Rc<RefCell<Inner>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Time {
        self.inner.borrow().now
    }

    /// Number of live timers (one-shot timers that have not fired yet plus all
    /// uncancelled intervals).
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.inner.borrow().entries.iter().any(|e| e.id == id)
    }

    pub fn advance_by(&self, ms: f64) -> usize {
        let target = self.now().add_ms(ms);
        self.advance_to(target)
    }

    /// Fire every timer due at or before `target`. Returns how many callbacks ran.
    pub fn advance_to(&self, target: Time) -> usize {
        let mut fired = 0;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let idx = inner
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.due <= target && e.callback.is_some())
                    .min_by(|(_, a), (_, b)| {
                        a.due
                            .partial_cmp(&b.due)
                            .unwrap_or(std::cmp::Ordering::Equal)
                            .then_with(|| a.id.cmp(&b.id))
                    })
                    .map(|(i, _)| i);
                idx.map(|i| {
                    let due = inner.entries[i].due;
                    if due > inner.now {
                        inner.now = due;
                    }
                    let entry = &mut inner.entries[i];
                    (entry.id, entry.callback.take())
                })
            };
            let Some((id, Some(mut cb))) = next else {
                break;
            };

            cb();
            fired += 1;

            let mut inner = self.inner.borrow_mut();
            if let Some(pos) = inner.entries.iter().position(|e| e.id == id) {
                match inner.entries[pos].period_ms {
                    Some(period) => {
                        let entry = &mut inner.entries[pos];
                        entry.due = entry.due.add_ms(period);
                        entry.callback = Some(cb);
                    }
                    None => {
                        inner.entries.remove(pos);
                    }
                }
            }
        }
        let mut inner = self.inner.borrow_mut();
        if target > inner.now {
            inner.now = target;
        }
        fired
    }

    fn schedule(&self, delay_ms: u32, period_ms: Option<f64>, callback: TimerCallback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId::new(inner.next_id);
        inner.next_id += 1;
        let due = inner.now.add_ms(f64::from(delay_ms));
        inner.entries.push(Entry {
            id,
            due,
            period_ms,
            callback: Some(callback),
        });
        id
    }
}

impl TimerHost for TimerQueue {
    type Handle = TimerId;

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerId, TimerError> {
        Ok(self.schedule(delay_ms, None, callback))
    }

    fn set_interval(&self, period_ms: u32, callback: TimerCallback) -> Result<TimerId, TimerError> {
        // A zero period would spin forever inside `advance_to`.
        let period = period_ms.max(1);
        Ok(self.schedule(period, Some(f64::from(period)), callback))
    }

    fn clear(&self, handle: TimerId) {
        self.inner.borrow_mut().entries.retain(|e| e.id != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::{TimerHost, TimerQueue};
    use foundation::time::Time;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnMut()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        let make = move |name: &'static str| {
            let l = l.clone();
            Box::new(move || l.borrow_mut().push(name)) as Box<dyn FnMut()>
        };
        (log, make)
    }

    #[test]
    fn fires_in_deadline_then_creation_order() {
        let q = TimerQueue::new();
        let (log, make) = recorder();
        q.set_timeout(20, make("late")).unwrap();
        q.set_timeout(10, make("early-a")).unwrap();
        q.set_timeout(10, make("early-b")).unwrap();
        assert_eq!(q.advance_to(Time(100.0)), 3);
        assert_eq!(*log.borrow(), vec!["early-a", "early-b", "late"]);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn interval_repeats_until_cleared() {
        let q = TimerQueue::new();
        let (log, make) = recorder();
        let h = q.set_interval(100, make("tick")).unwrap();
        q.advance_to(Time(350.0));
        assert_eq!(log.borrow().len(), 3);
        q.clear(h);
        q.advance_to(Time(1_000.0));
        assert_eq!(log.borrow().len(), 3);
        assert!(!q.is_scheduled(h));
    }

    #[test]
    fn cancel_does_not_reorder_remaining() {
        let q = TimerQueue::new();
        let (log, make) = recorder();
        q.set_timeout(10, make("a")).unwrap();
        let b = q.set_timeout(10, make("b")).unwrap();
        q.set_timeout(10, make("c")).unwrap();
        q.clear(b);
        q.advance_by(10.0);
        assert_eq!(*log.borrow(), vec!["a", "c"]);
    }

    #[test]
    fn callback_may_clear_itself() {
        let q = TimerQueue::new();
        let count = Rc::new(RefCell::new(0));
        let handle = Rc::new(RefCell::new(None));
        let (qc, c, h) = (q.clone(), count.clone(), handle.clone());
        let id = q
            .set_interval(
                50,
                Box::new(move || {
                    *c.borrow_mut() += 1;
                    if let Some(id) = *h.borrow() {
                        qc.clear(id);
                    }
                }),
            )
            .unwrap();
        *handle.borrow_mut() = Some(id);
        q.advance_to(Time(500.0));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn callback_may_schedule_more_work() {
        let q = TimerQueue::new();
        let (log, make) = recorder();
        let qc = q.clone();
        let follow_up = RefCell::new(Some(make("second")));
        q.set_timeout(
            10,
            Box::new(move || {
                if let Some(cb) = follow_up.borrow_mut().take() {
                    qc.set_timeout(10, cb).unwrap();
                }
            }),
        )
        .unwrap();
        q.advance_to(Time(15.0));
        assert!(log.borrow().is_empty());
        q.advance_to(Time(20.0));
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn clock_tracks_advance_target() {
        let q = TimerQueue::new();
        q.advance_by(42.0);
        assert_eq!(q.now(), Time(42.0));
    }
}
