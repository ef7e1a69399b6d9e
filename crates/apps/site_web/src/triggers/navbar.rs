use std::rc::Rc;

use effects::{NavbarAutoHide, NavbarPresentation};
use runtime::dispose::DisposeBag;
use web_sys::Element;

use crate::dom::{self, classes};
use crate::error::SiteError;
use crate::site::SiteContext;

pub fn install(ctx: &Rc<SiteContext>, _bag: &mut DisposeBag) -> Result<(), SiteError> {
    let navbar = dom::require(&ctx.dom.navbar, "navbar")?;
    let mut auto_hide = NavbarAutoHide::new(ctx.config.navbar, ctx.state().scroll_y);
    let mut shown: Option<NavbarPresentation> = None;
    ctx.hub.on_scroll("navbar", move |snapshot| {
        let presentation = auto_hide.update(&snapshot.viewport);
        if shown == Some(presentation) {
            return;
        }
        dom::apply(render(&navbar, presentation), "navbar");
        shown = Some(presentation);
    });
    Ok(())
}

fn render(navbar: &Element, p: NavbarPresentation) -> Result<(), SiteError> {
    dom::set_class(navbar, classes::SCROLLED, p.scrolled)?;
    dom::set_class(navbar, classes::NAV_HIDDEN, p.hidden)
}
