use std::cell::RefCell;
use std::rc::Rc;

use effects::{Particle, spawn_particles};
use runtime::dispose::DisposeBag;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom::{self, classes};
use crate::error::SiteError;
use crate::hub::ViewportChange;
use crate::platform;
use crate::site::SiteContext;

fn build(document: &Document, p: &Particle) -> Result<HtmlElement, SiteError> {
    let el: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| SiteError::Unsupported("HTMLElement"))?;
    el.set_class_name(classes::PARTICLE);
    el.set_attribute("aria-hidden", "true")?;
    dom::set_style(&el, "left", &format!("{:.2}%", p.left_pct))?;
    dom::set_style(&el, "width", &format!("{:.1}px", p.size_px))?;
    dom::set_style(&el, "height", &format!("{:.1}px", p.size_px))?;
    dom::set_style(&el, "animation-delay", &format!("{:.2}s", p.delay_s))?;
    dom::set_style(&el, "animation-duration", &format!("{:.2}s", p.duration_s))?;
    Ok(el)
}

fn remove_all(spawned: &RefCell<Vec<HtmlElement>>) {
    for el in spawned.borrow_mut().drain(..) {
        el.remove();
    }
}

pub fn install(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let container: Element = dom::require(&ctx.dom.particles, "particle container")?;
    let particles = spawn_particles(
        &ctx.config.particles,
        ctx.state().reduced_motion,
        platform::random,
    );

    let spawned = Rc::new(RefCell::new(Vec::with_capacity(particles.len())));
    for p in &particles {
        let el = build(&ctx.document, p)?;
        container.append_child(&el)?;
        spawned.borrow_mut().push(el);
    }
    tracing::debug!(count = particles.len(), "particles spawned");

    let s = spawned.clone();
    ctx.hub.on_viewport("particles", move |change, state| {
        if change == ViewportChange::MotionPreference && state.reduced_motion {
            remove_all(&s);
        }
    });
    bag.push("particles", move || remove_all(&spawned));
    Ok(())
}
