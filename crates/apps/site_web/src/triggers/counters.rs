use std::cell::RefCell;
use std::rc::{Rc, Weak};

use effects::{CounterAnimation, CounterBank, CounterRuns, RevealConfig, parse_counter_target};
use runtime::dispose::DisposeBag;
use web_sys::Element;

use crate::dom;
use crate::error::SiteError;
use crate::hub::ViewportChange;
use crate::site::SiteContext;
use crate::triggers::watch;

const TARGET_ATTRIBUTE: &str = "data-counter";
const SUFFIX_ATTRIBUTE: &str = "data-suffix";

struct CounterText {
    element: Element,
    suffix: String,
}

type RunningSet = Rc<RefCell<CounterRuns<CounterText>>>;

fn write(element: &Element, value: u64, suffix: &str) {
    element.set_text_content(Some(&format!("{value}{suffix}")));
}

pub fn install(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let elements = dom::require_any(&ctx.dom.counters, "counters")?;
    let mut bank = CounterBank::new(elements.len());
    let running: RunningSet = Rc::new(RefCell::new(CounterRuns::new()));

    let weak = Rc::downgrade(ctx);
    let targets = elements.clone();
    let active = running.clone();
    let in_view = RevealConfig {
        margin_px: 0.0,
        ..ctx.config.reveal
    };
    watch::watch_once(ctx, bag, "counters", elements, in_view, move |index| {
        if !bank.start(index) {
            return;
        }
        let (Some(ctx), Some(element)) = (weak.upgrade(), targets.get(index)) else {
            return;
        };
        let Some(target) = element
            .get_attribute(TARGET_ATTRIBUTE)
            .as_deref()
            .and_then(parse_counter_target)
        else {
            tracing::warn!(index, "counter without a numeric {TARGET_ATTRIBUTE}");
            return;
        };
        let suffix = element.get_attribute(SUFFIX_ATTRIBUTE).unwrap_or_default();
        if ctx.state().reduced_motion {
            write(element, target, &suffix);
            return;
        }
        let animation = CounterAnimation::new(&ctx.config.counter, target, ctx.now());
        write(element, 0, &suffix);
        let display = CounterText {
            element: element.clone(),
            suffix,
        };
        let first = active.borrow_mut().push(display, animation);
        if first {
            pump(Rc::downgrade(&ctx), active.clone());
        }
    })?;

    let active = running.clone();
    ctx.hub.on_viewport("counters", move |change, state| {
        if change == ViewportChange::MotionPreference && state.reduced_motion {
            let finished = active
                .borrow_mut()
                .finish_all(|d, value| write(&d.element, value, &d.suffix));
            if finished > 0 {
                tracing::debug!(finished, "counters jumped to target");
            }
        }
    });

    bag.push("counters", move || running.borrow_mut().clear());
    Ok(())
}

/// Advance every running counter once per frame until all have finished.
fn pump(weak: Weak<SiteContext>, running: RunningSet) {
    let Some(ctx) = weak.upgrade() else {
        return;
    };
    ctx.frames.request("counters", move |_frame| {
        let Some(ctx) = weak.upgrade() else {
            return;
        };
        // Sample the same clock the animations were started with.
        let now = ctx.now();
        let still_running = running
            .borrow_mut()
            .step(now, |d, value| write(&d.element, value, &d.suffix));
        if still_running {
            pump(weak, running);
        }
    });
}
