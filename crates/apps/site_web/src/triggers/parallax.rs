use std::rc::Rc;

use effects::{ParallaxUpdate, parallax_update};
use runtime::dispose::DisposeBag;

use crate::dom;
use crate::error::SiteError;
use crate::site::SiteContext;

pub fn install(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let element = dom::require(&ctx.dom.parallax, "parallax element")?;
    let config = ctx.config.parallax;
    let mut applied: Option<String> = None;

    let el = element.clone();
    ctx.hub.on_scroll("parallax", move |snapshot| {
        match parallax_update(&config, &snapshot.viewport, snapshot.metrics.viewport_height) {
            ParallaxUpdate::Translate(px) => {
                let value = format!("translate3d(0, {px:.1}px, 0)");
                if applied.as_deref() != Some(value.as_str()) {
                    dom::apply(dom::set_style(&el, "transform", &value), "parallax");
                    applied = Some(value);
                }
            }
            ParallaxUpdate::Disabled if applied.is_some() => {
                dom::apply(dom::clear_style(&el, "transform"), "parallax");
                applied = None;
            }
            ParallaxUpdate::Disabled => {}
        }
    });
    bag.push("parallax", move || {
        let _ = dom::clear_style(&element, "transform");
    });
    Ok(())
}
