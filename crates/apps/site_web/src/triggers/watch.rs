//! "Tell me once when this element comes into view", with an intersection
//! observer when the platform has one and throttled scroll polling otherwise.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use effects::{RevealConfig, RevealSet};
use foundation::time::Time;
use js_sys::Array;
use runtime::dispose::DisposeBag;
use runtime::normalize::Throttle;
use runtime::timers::TimerHost;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::SiteError;
use crate::platform;
use crate::site::SiteContext;

pub fn watch_once(
    ctx: &Rc<SiteContext>,
    bag: &mut DisposeBag,
    label: &'static str,
    elements: Vec<Element>,
    config: RevealConfig,
    on_enter: impl FnMut(usize) + 'static,
) -> Result<(), SiteError> {
    let seen = Rc::new(RefCell::new(RevealSet::new(config, elements.len())));
    let on_enter = Rc::new(RefCell::new(on_enter));
    if platform::has_intersection_observer(&ctx.window) {
        observe(bag, label, elements, seen, on_enter)
    } else {
        tracing::debug!(label, "no IntersectionObserver, polling on scroll");
        poll(ctx, label, elements, seen, on_enter);
        Ok(())
    }
}

fn observe<F: FnMut(usize) + 'static>(
    bag: &mut DisposeBag,
    label: &'static str,
    elements: Vec<Element>,
    seen: Rc<RefCell<RevealSet>>,
    on_enter: Rc<RefCell<F>>,
) -> Result<(), SiteError> {
    let init = IntersectionObserverInit::new();
    init.set_root_margin(&seen.borrow().config().root_margin());

    let targets = elements.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let Some(index) = targets.iter().position(|e| *e == target) else {
                    continue;
                };
                observer.unobserve(&target);
                if seen.borrow_mut().mark(index) {
                    (on_enter.borrow_mut())(index);
                }
            }
        },
    );
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for element in &elements {
        observer.observe(element);
    }
    bag.push(label, move || {
        observer.disconnect();
        drop(callback);
    });
    Ok(())
}

/// What the polling fallback does with one scroll frame or timer wakeup.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PollStep {
    /// Measure now.
    Check,
    /// Scrolling went quiet inside the throttle window; check again after
    /// this many milliseconds.
    Arm(u32),
    Wait,
}

/// Throttled measuring with a trailing check, so the position scrolling
/// stops at is always measured.
struct PollGate {
    throttle: Throttle<()>,
    armed: bool,
}

impl PollGate {
    fn new(window_ms: f64) -> Self {
        Self {
            throttle: Throttle::new(window_ms),
            armed: false,
        }
    }

    fn on_scroll(&mut self, now: Time) -> PollStep {
        if self.throttle.call(now, ()).is_some() {
            return PollStep::Check;
        }
        self.arm(now)
    }

    /// The trailing timer fired. Timers may run a little before the
    /// performance clock reaches the deadline, so anything within 1ms counts.
    fn on_timer(&mut self, now: Time) -> PollStep {
        self.armed = false;
        let Some(due) = self.throttle.trailing_deadline() else {
            return PollStep::Wait;
        };
        if due.elapsed_since(now) > 1.0 {
            return self.arm(now);
        }
        let at = if now < due { due } else { now };
        match self.throttle.poll(at) {
            Some(()) => PollStep::Check,
            None => PollStep::Wait,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }

    fn arm(&mut self, now: Time) -> PollStep {
        if self.armed {
            return PollStep::Wait;
        }
        let Some(due) = self.throttle.trailing_deadline() else {
            return PollStep::Wait;
        };
        self.armed = true;
        PollStep::Arm(due.elapsed_since(now).max(0.0).ceil() as u32)
    }
}

type Check = Rc<dyn Fn(f64)>;

fn poll<F: FnMut(usize) + 'static>(
    ctx: &Rc<SiteContext>,
    label: &'static str,
    elements: Vec<Element>,
    seen: Rc<RefCell<RevealSet>>,
    on_enter: Rc<RefCell<F>>,
) {
    let gate = Rc::new(RefCell::new(PollGate::new(
        seen.borrow().config().poll_throttle_ms,
    )));
    let done = seen.clone();
    let check: Check = Rc::new(move |viewport_height: f64| {
        let newly = seen.borrow_mut().check(viewport_height, |i| {
            elements.get(i).map(platform::rect_of)
        });
        for index in newly {
            (on_enter.borrow_mut())(index);
        }
    });

    let weak = Rc::downgrade(ctx);
    ctx.hub.on_scroll(label, move |snapshot| {
        if done.borrow().all_revealed() {
            return;
        }
        let step = gate.borrow_mut().on_scroll(snapshot.time);
        match step {
            PollStep::Check => check(snapshot.metrics.viewport_height),
            PollStep::Arm(delay_ms) => arm_trailing(&weak, label, &gate, &check, delay_ms),
            PollStep::Wait => {}
        }
    });
}

fn arm_trailing(
    weak: &Weak<SiteContext>,
    label: &'static str,
    gate: &Rc<RefCell<PollGate>>,
    check: &Check,
    delay_ms: u32,
) {
    let Some(ctx) = weak.upgrade() else {
        return;
    };
    let (w, g, c) = (weak.clone(), gate.clone(), check.clone());
    let fire = Box::new(move || {
        let Some(ctx) = w.upgrade() else {
            return;
        };
        let step = g.borrow_mut().on_timer(ctx.now());
        match step {
            PollStep::Check => c(platform::viewport_height(&ctx.window)),
            PollStep::Arm(delay_ms) => arm_trailing(&w, label, &g, &c, delay_ms),
            PollStep::Wait => {}
        }
    });
    if let Err(err) = ctx.timers.set_timeout(delay_ms, fire) {
        tracing::warn!(label, %err, "trailing visibility check");
        gate.borrow_mut().disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::{PollGate, PollStep};
    use effects::{RevealConfig, RevealSet};
    use foundation::bounds::Rect;
    use foundation::time::Time;

    const VIEWPORT: f64 = 800.0;
    const ELEMENT_DOC_TOP: f64 = 2_000.0;

    fn measure(set: &mut RevealSet, scroll_y: f64) -> Vec<usize> {
        set.check(VIEWPORT, |_| {
            Some(Rect::vertical(ELEMENT_DOC_TOP - scroll_y, 100.0))
        })
    }

    #[test]
    fn burst_ending_inside_window_is_measured_at_rest() {
        let mut gate = PollGate::new(100.0);
        let mut set = RevealSet::new(RevealConfig::default(), 1);

        let frames = [(0.0, 0.0), (16.0, 600.0), (32.0, 1_200.0), (48.0, 1_500.0)];
        let mut steps = Vec::new();
        for (t, y) in frames {
            let step = gate.on_scroll(Time(t));
            if step == PollStep::Check {
                measure(&mut set, y);
            }
            steps.push(step);
        }
        assert_eq!(
            steps,
            vec![PollStep::Check, PollStep::Arm(84), PollStep::Wait, PollStep::Wait]
        );
        assert!(!set.is_revealed(0));

        // Scrolling stopped at 1500; the trailing timer measures the rest position.
        assert_eq!(gate.on_timer(Time(100.0)), PollStep::Check);
        assert_eq!(measure(&mut set, 1_500.0), vec![0]);
        assert!(set.is_revealed(0));
    }

    #[test]
    fn early_timer_tolerates_clock_skew_and_rearms_when_far_off() {
        let mut gate = PollGate::new(100.0);
        gate.on_scroll(Time(0.0));
        assert_eq!(gate.on_scroll(Time(10.0)), PollStep::Arm(90));
        assert_eq!(gate.on_timer(Time(99.5)), PollStep::Check);

        assert_eq!(gate.on_scroll(Time(250.0)), PollStep::Check);
        assert_eq!(gate.on_scroll(Time(260.0)), PollStep::Arm(90));
        assert_eq!(gate.on_timer(Time(270.0)), PollStep::Arm(80));
        assert_eq!(gate.on_timer(Time(350.0)), PollStep::Check);
    }

    #[test]
    fn leading_check_leaves_nothing_for_the_timer() {
        let mut gate = PollGate::new(100.0);
        gate.on_scroll(Time(0.0));
        assert_eq!(gate.on_scroll(Time(50.0)), PollStep::Arm(50));
        assert_eq!(gate.on_scroll(Time(100.0)), PollStep::Check);
        assert_eq!(gate.on_timer(Time(101.0)), PollStep::Wait);
        assert_eq!(gate.on_scroll(Time(120.0)), PollStep::Arm(80));
    }
}
