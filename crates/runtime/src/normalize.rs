//! Rate limiting for high-frequency input (scroll, resize, pointer move).
//!
//! These types only decide *whether* to invoke; the caller owns the callback
//! and whatever platform timer or frame request drives it.

use foundation::time::Time;

/// Throttle with leading and trailing edges: the first call fires
/// immediately, calls inside the window keep only their latest arguments, and
/// those fire once the window closes (see [`Throttle::poll`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle<A> {
    window_ms: f64,
    last_fire: Option<Time>,
    trailing: Option<A>,
}

impl<A> Throttle<A> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            last_fire: None,
            trailing: None,
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// Returns `Some(args)` when the call should be dispatched now. Otherwise
    /// the args replace any pending trailing call.
    pub fn call(&mut self, now: Time, args: A) -> Option<A> {
        match self.last_fire {
            Some(last) if now.elapsed_since(last) < self.window_ms => {
                self.trailing = Some(args);
                None
            }
            _ => {
                self.last_fire = Some(now);
                self.trailing = None;
                Some(args)
            }
        }
    }

    /// When the pending trailing call becomes due, if there is one.
    pub fn trailing_deadline(&self) -> Option<Time> {
        match (&self.trailing, self.last_fire) {
            (Some(_), Some(last)) => Some(last.add_ms(self.window_ms)),
            _ => None,
        }
    }

    /// Yields the trailing call once its window has closed. Firing it opens a
    /// new window.
    pub fn poll(&mut self, now: Time) -> Option<A> {
        let deadline = self.trailing_deadline()?;
        if now < deadline {
            return None;
        }
        self.last_fire = Some(now);
        self.trailing.take()
    }

    pub fn reset(&mut self) {
        self.last_fire = None;
        self.trailing = None;
    }
}

/// Trailing-edge debounce: dispatches the latest arguments once the source has
/// been quiet for the whole window.
#[derive(Debug, Clone, PartialEq)]
pub struct Debounce<A> {
    window_ms: f64,
    pending: Option<A>,
    deadline: Option<Time>,
}

impl<A> Debounce<A> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            pending: None,
            deadline: None,
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// Record a call and push the deadline out. Returns the new deadline.
    pub fn call(&mut self, now: Time, args: A) -> Time {
        let deadline = now.add_ms(self.window_ms);
        self.pending = Some(args);
        self.deadline = Some(deadline);
        deadline
    }

    pub fn deadline(&self) -> Option<Time> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Yields the latest arguments if the quiet window has elapsed.
    pub fn poll(&mut self, now: Time) -> Option<A> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }
}
