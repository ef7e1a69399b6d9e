use std::cell::RefCell;
use std::rc::Rc;

use effects::{MenuEvent, MobileMenu};
use runtime::dispose::DisposeBag;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::dom::{self, classes};
use crate::error::SiteError;
use crate::hub::ViewportChange;
use crate::listeners::EventListener;
use crate::site::SiteContext;

struct MenuDom {
    toggle: Element,
    menu: Element,
    body: Option<HtmlElement>,
}

impl MenuDom {
    fn render(&self, state: &MobileMenu) -> Result<(), SiteError> {
        let open = state.is_open();
        dom::set_class(&self.menu, classes::OPEN, open)?;
        dom::set_class(&self.toggle, classes::ACTIVE, open)?;
        dom::set_attr(&self.toggle, "aria-expanded", state.aria_expanded())?;
        if let Some(body) = &self.body {
            dom::set_class(body, classes::MENU_OPEN, open)?;
        }
        Ok(())
    }
}

pub fn install(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let view = Rc::new(MenuDom {
        toggle: dom::require(&ctx.dom.menu_toggle, "menu toggle")?,
        menu: dom::require(&ctx.dom.nav_menu, "nav menu")?,
        body: ctx.dom.body.clone(),
    });
    let menu = Rc::new(RefCell::new(MobileMenu::new()));
    view.render(&menu.borrow())?;

    let dispatch = {
        let (menu, view) = (menu.clone(), view.clone());
        Rc::new(move |event: MenuEvent| {
            let changed = menu.borrow_mut().handle(event);
            if let Some(open) = changed {
                tracing::debug!(open, ?event, "mobile menu");
                dom::apply(view.render(&menu.borrow()), "mobile menu");
            }
        })
    };

    let d = dispatch.clone();
    bag.hold(
        "menu-toggle",
        EventListener::new(view.toggle.as_ref(), "click", move |_| d(MenuEvent::Toggle))?,
    );

    let d = dispatch.clone();
    bag.hold(
        "menu-escape",
        EventListener::new(ctx.document.as_ref(), "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key.key() == "Escape" {
                d(MenuEvent::Escape);
            }
        })?,
    );

    for link in &ctx.dom.nav_links {
        let d = dispatch.clone();
        bag.hold(
            "menu-link",
            EventListener::new(link.as_ref(), "click", move |_| d(MenuEvent::LinkActivated))?,
        );
    }

    let d = dispatch.clone();
    ctx.hub.on_viewport("menu", move |change, state| {
        if change == ViewportChange::Resized {
            d(MenuEvent::DeviceClassChanged {
                is_mobile: state.is_mobile,
            });
        }
    });

    bag.push("menu", move || {
        menu.borrow_mut().handle(MenuEvent::Escape);
        dom::apply(view.render(&menu.borrow()), "mobile menu");
    });
    Ok(())
}
