use std::rc::Rc;

use effects::BackToTop;
use runtime::dispose::DisposeBag;
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::dom::{self, classes};
use crate::error::SiteError;
use crate::listeners::EventListener;
use crate::site::SiteContext;

pub fn install(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let button = dom::require(&ctx.dom.back_to_top, "back-to-top button")?;
    let ring = ctx.dom.progress_ring.clone();
    let mut state = BackToTop::new(ctx.config.back_to_top);

    let circumference = state.config().circumference();
    if let Some(ring) = &ring {
        let dash = format!("{circumference:.2} {circumference:.2}");
        dom::set_attr(ring, "stroke-dasharray", &dash)?;
        dom::set_attr(ring, "stroke-dashoffset", &format!("{circumference:.2}"))?;
    }

    let b = button.clone();
    ctx.hub.on_scroll("back-to-top", move |snapshot| {
        let frame = state.update(&snapshot.metrics);
        dom::apply(dom::set_class(&b, classes::VISIBLE, frame.visible), "back-to-top");
        if frame.play_attention {
            dom::apply(dom::set_class(&b, classes::ATTENTION, true), "back-to-top");
        }
        if let Some(ring) = &ring {
            let offset = format!("{:.2}", frame.dash_offset);
            dom::apply(dom::set_attr(ring, "stroke-dashoffset", &offset), "progress ring");
        }
    });

    let weak = Rc::downgrade(ctx);
    let click = EventListener::new(button.as_ref(), "click", move |event| {
        event.prevent_default();
        let Some(ctx) = weak.upgrade() else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(if ctx.state().reduced_motion {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        });
        ctx.window.scroll_to_with_scroll_to_options(&options);
    })?;
    bag.hold("back-to-top", click);
    Ok(())
}
