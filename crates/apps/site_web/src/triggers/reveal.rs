use std::rc::Rc;

use effects::RevealStrategy;
use runtime::dispose::DisposeBag;
use web_sys::Element;

use crate::dom::{self, classes};
use crate::error::SiteError;
use crate::hub::ViewportChange;
use crate::platform;
use crate::site::SiteContext;
use crate::triggers::watch;

fn show(element: &Element) {
    dom::apply(dom::set_class(element, classes::VISIBLE, true), "reveal");
}

pub fn install(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let elements = dom::require_any(&ctx.dom.reveal, "reveal elements")?;
    let strategy = RevealStrategy::choose(
        ctx.state().reduced_motion,
        platform::has_intersection_observer(&ctx.window),
    );
    tracing::debug!(?strategy, count = elements.len(), "reveal");

    if strategy == RevealStrategy::Immediate {
        elements.iter().for_each(show);
        return Ok(());
    }

    // Turning on reduced motion mid-session shows whatever is still hidden.
    let all = elements.clone();
    ctx.hub.on_viewport("reveal", move |change, state| {
        if change == ViewportChange::MotionPreference && state.reduced_motion {
            all.iter().for_each(show);
        }
    });

    let targets = elements.clone();
    watch::watch_once(ctx, bag, "reveal", elements, ctx.config.reveal, move |index| {
        if let Some(element) = targets.get(index) {
            show(element);
        }
    })
}
