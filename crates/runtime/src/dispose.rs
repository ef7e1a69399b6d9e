//! Teardown bookkeeping for listeners, observers and timers.

pub type Disposer = Box<dyn FnOnce()>;

/// Ordered set of teardown actions.
///
/// Actions run exactly once, newest first, either on [`DisposeBag::dispose`] or
/// when the bag is dropped.
#[derive(Default)]
pub struct DisposeBag {
    disposers: Vec<(&'static str, Disposer)>,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &'static str, disposer: impl FnOnce() + 'static) {
        self.disposers.push((label, Box::new(disposer)));
    }

    /// Take ownership of a value and drop it on dispose.
    pub fn hold<T: 'static>(&mut self, label: &'static str, value: T) {
        self.push(label, move || drop(value));
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.disposers.iter().map(|(label, _)| *label)
    }

    /// Run every pending disposer. Returns how many ran.
    pub fn dispose(&mut self) -> usize {
        let mut ran = 0;
        while let Some((label, disposer)) = self.disposers.pop() {
            tracing::debug!(label, "dispose");
            disposer();
            ran += 1;
        }
        ran
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::DisposeBag;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn disposes_newest_first_exactly_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bag = DisposeBag::new();
        for name in ["scroll", "resize", "timer"] {
            let log = log.clone();
            bag.push(name, move || log.borrow_mut().push(name));
        }
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.dispose(), 3);
        assert_eq!(bag.dispose(), 0);
        assert_eq!(*log.borrow(), vec!["timer", "resize", "scroll"]);
    }

    #[test]
    fn drop_runs_pending_disposers() {
        let hit = Rc::new(RefCell::new(false));
        {
            let mut bag = DisposeBag::new();
            let hit = hit.clone();
            bag.push("flag", move || *hit.borrow_mut() = true);
        }
        assert!(*hit.borrow());
    }

    #[test]
    fn hold_drops_value_on_dispose() {
        let token = Rc::new(());
        let mut bag = DisposeBag::new();
        bag.hold("token", token.clone());
        assert_eq!(Rc::strong_count(&token), 2);
        bag.dispose();
        assert_eq!(Rc::strong_count(&token), 1);
    }
}
