use std::cell::RefCell;

use foundation::time::Time;
use viewport::{ScrollMetrics, ViewportState};

/// Everything a scroll-driven trigger reads in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSnapshot {
    pub viewport: ViewportState,
    pub metrics: ScrollMetrics,
    pub time: Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportChange {
    Resized,
    MotionPreference,
}

type ScrollHandler = Box<dyn FnMut(&ScrollSnapshot)>;
type ViewportHandler = Box<dyn FnMut(ViewportChange, &ViewportState)>;

/// Fan-out from the normalized input path to the independent triggers.
///
/// Handlers run in registration order and must not register further handlers
/// while a dispatch is in progress.
#[derive(Default)]
pub struct Hub {
    scroll: RefCell<Vec<(&'static str, ScrollHandler)>>,
    viewport: RefCell<Vec<(&'static str, ViewportHandler)>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_scroll(&self, label: &'static str, handler: impl FnMut(&ScrollSnapshot) + 'static) {
        self.scroll.borrow_mut().push((label, Box::new(handler)));
    }

    pub fn on_viewport(
        &self,
        label: &'static str,
        handler: impl FnMut(ViewportChange, &ViewportState) + 'static,
    ) {
        self.viewport.borrow_mut().push((label, Box::new(handler)));
    }

    pub fn dispatch_scroll(&self, snapshot: &ScrollSnapshot) {
        for (_label, handler) in self.scroll.borrow_mut().iter_mut() {
            handler(snapshot);
        }
    }

    pub fn dispatch_viewport(&self, change: ViewportChange, state: &ViewportState) {
        for (label, handler) in self.viewport.borrow_mut().iter_mut() {
            tracing::trace!(label, ?change, "viewport change");
            handler(change, state);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.scroll.borrow().len() + self.viewport.borrow().len()
    }

    pub fn clear(&self) {
        self.scroll.borrow_mut().clear();
        self.viewport.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{Hub, ScrollSnapshot, ViewportChange};
    use foundation::time::Time;
    use std::cell::RefCell;
    use std::rc::Rc;
    use viewport::{ScrollMetrics, ViewportState};

    #[test]
    fn dispatches_in_registration_order() {
        let hub = Hub::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["navbar", "reveal", "parallax"] {
            let log = log.clone();
            hub.on_scroll(name, move |_| log.borrow_mut().push(name));
        }
        let snapshot = ScrollSnapshot {
            viewport: ViewportState::default(),
            metrics: ScrollMetrics::default(),
            time: Time::ZERO,
        };
        hub.dispatch_scroll(&snapshot);
        assert_eq!(*log.borrow(), vec!["navbar", "reveal", "parallax"]);
    }

    #[test]
    fn viewport_handlers_see_the_change_and_clear_empties() {
        let hub = Hub::new();
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        hub.on_viewport("menu", move |change, state| {
            *s.borrow_mut() = Some((change, state.is_mobile));
        });
        let state = ViewportState {
            is_mobile: true,
            ..ViewportState::default()
        };
        hub.dispatch_viewport(ViewportChange::Resized, &state);
        assert_eq!(*seen.borrow(), Some((ViewportChange::Resized, true)));
        hub.clear();
        assert_eq!(hub.handler_count(), 0);
    }
}
