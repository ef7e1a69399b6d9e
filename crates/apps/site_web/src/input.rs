//! The normalized input path: raw window events into viewport updates.
//!
//! Scroll is coalesced to one dispatch per frame, resize is debounced, and the
//! motion preference is followed live through its media query.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use runtime::dispose::DisposeBag;
use runtime::normalize::Debounce;
use runtime::timers::TimerHost;

use crate::error::SiteError;
use crate::hub::ViewportChange;
use crate::listeners::EventListener;
use crate::platform;
use crate::site::SiteContext;

pub fn install(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    install_scroll(ctx, bag)?;
    install_resize(ctx, bag)?;
    install_motion(ctx, bag)
}

fn install_scroll(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let weak = Rc::downgrade(ctx);
    let listener = EventListener::passive(ctx.window.as_ref(), "scroll", move |_| {
        if let Some(ctx) = weak.upgrade() {
            ctx.schedule_scroll();
        }
    })?;
    bag.hold("scroll", listener);
    Ok(())
}

fn install_resize(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let debounce = Rc::new(RefCell::new(Debounce::<f64>::new(f64::from(
        ctx.config.resize_debounce_ms,
    ))));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let weak = Rc::downgrade(ctx);
    let (d, p) = (debounce.clone(), pending.clone());
    let listener = EventListener::passive(ctx.window.as_ref(), "resize", move |_| {
        let Some(ctx) = weak.upgrade() else {
            return;
        };
        d.borrow_mut()
            .call(ctx.now(), platform::viewport_width(&ctx.window));
        if let Some(handle) = p.take() {
            ctx.timers.clear(handle);
        }
        let (weak, d2, p2) = (weak.clone(), d.clone(), p.clone());
        let flush = Box::new(move || {
            p2.set(None);
            flush_resize(&weak, &d2);
        });
        match ctx.timers.set_timeout(ctx.config.resize_debounce_ms, flush) {
            Ok(handle) => p.set(Some(handle)),
            Err(err) => tracing::warn!(%err, "resize debounce timer"),
        }
    })?;
    bag.hold("resize", listener);

    let ctx = Rc::downgrade(ctx);
    bag.push("resize-debounce", move || {
        if let (Some(ctx), Some(handle)) = (ctx.upgrade(), pending.take()) {
            ctx.timers.clear(handle);
        }
        debounce.borrow_mut().cancel();
    });
    Ok(())
}

fn flush_resize(weak: &Weak<SiteContext>, debounce: &RefCell<Debounce<f64>>) {
    let Some(ctx) = weak.upgrade() else {
        return;
    };
    // This timer was armed for the current deadline; poll at it rather than at
    // the clock, which may trail the timer by a fraction of a millisecond.
    let width = {
        let mut d = debounce.borrow_mut();
        let Some(deadline) = d.deadline() else {
            return;
        };
        d.poll(deadline)
    };
    let Some(width) = width else {
        return;
    };
    let state = ctx.viewport.borrow_mut().on_resize(width);
    ctx.hub.dispatch_viewport(ViewportChange::Resized, &state);
    ctx.schedule_scroll();
}

fn install_motion(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let query = platform::reduced_motion_query(&ctx.window)
        .ok_or(SiteError::Unsupported("matchMedia"))?;
    let weak = Rc::downgrade(ctx);
    let q = query.clone();
    let listener = EventListener::new(query.as_ref(), "change", move |_| {
        let Some(ctx) = weak.upgrade() else {
            return;
        };
        let state = ctx.viewport.borrow_mut().set_reduced_motion(q.matches());
        ctx.hub
            .dispatch_viewport(ViewportChange::MotionPreference, &state);
        ctx.schedule_scroll();
    })?;
    bag.hold("reduced-motion", listener);
    Ok(())
}
