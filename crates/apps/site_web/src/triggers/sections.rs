//! Active-section highlighting in the nav and offset-aware anchor scrolling.

use std::rc::Rc;

use effects::{active_section, anchor_scroll_target, in_page_anchor};
use runtime::dispose::DisposeBag;
use web_sys::{Element, ScrollBehavior, ScrollToOptions};

use crate::dom::{self, classes};
use crate::error::SiteError;
use crate::listeners::EventListener;
use crate::platform;
use crate::site::SiteContext;

pub fn install(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    install_anchors(ctx, bag)?;
    install_highlight(ctx)
}

fn install_anchors(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    for anchor in &ctx.dom.anchors {
        let Some(id) = anchor
            .get_attribute("href")
            .as_deref()
            .and_then(in_page_anchor)
            .map(str::to_owned)
        else {
            continue;
        };
        let weak = Rc::downgrade(ctx);
        let listener = EventListener::new(anchor.as_ref(), "click", move |event| {
            let Some(ctx) = weak.upgrade() else {
                return;
            };
            let Some(target) = ctx.document.get_element_by_id(&id) else {
                return;
            };
            event.prevent_default();
            let top = anchor_scroll_target(
                &ctx.config.sections,
                platform::document_top(&ctx.window, &target),
            );
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(if ctx.state().reduced_motion {
                ScrollBehavior::Instant
            } else {
                ScrollBehavior::Smooth
            });
            ctx.window.scroll_to_with_scroll_to_options(&options);
        })?;
        bag.hold("anchor", listener);
    }
    Ok(())
}

fn install_highlight(ctx: &Rc<SiteContext>) -> Result<(), SiteError> {
    dom::require_any(&ctx.dom.nav_links, "nav links")?;
    // Pair each section with the nav link that points at it.
    let pairs: Vec<(Element, Element)> = ctx
        .dom
        .sections
        .iter()
        .filter_map(|section| {
            let href = format!("#{}", section.id());
            let link = ctx
                .dom
                .nav_links
                .iter()
                .find(|l| l.get_attribute("href").as_deref() == Some(href.as_str()))?;
            Some((section.clone(), link.clone()))
        })
        .collect();
    if pairs.is_empty() {
        return Err(SiteError::MissingElement("sections linked from nav"));
    }

    let config = ctx.config.sections;
    let window = ctx.window.clone();
    let mut current: Option<usize> = None;
    ctx.hub.on_scroll("sections", move |snapshot| {
        let tops: Vec<f64> = pairs
            .iter()
            .map(|(section, _)| platform::document_top(&window, section))
            .collect();
        let active = active_section(&config, &tops, snapshot.viewport.scroll_y);
        if active == current {
            return;
        }
        for (i, (_, link)) in pairs.iter().enumerate() {
            dom::apply(dom::set_class(link, classes::ACTIVE, Some(i) == active), "nav link");
        }
        current = active;
    });
    Ok(())
}
