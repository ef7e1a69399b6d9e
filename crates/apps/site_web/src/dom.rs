//! Element lookups, resolved once at startup.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::error::SiteError;

pub mod selectors {
    pub const NAVBAR: &str = "#navbar";
    pub const MENU_TOGGLE: &str = ".nav-toggle";
    pub const NAV_MENU: &str = ".nav-links";
    pub const NAV_LINKS: &str = ".nav-links a[href^='#']";
    pub const SECTIONS: &str = "section[id]";
    pub const ANCHORS: &str = "a[href^='#']";
    pub const REVEAL: &str = ".reveal";
    pub const BACK_TO_TOP: &str = "#back-to-top";
    pub const PROGRESS_RING: &str = "#back-to-top .progress-ring-circle";
    pub const PARALLAX: &str = ".hero-parallax";
    pub const COUNTERS: &str = "[data-counter]";
    pub const PARTICLES: &str = ".particles";
    pub const GALLERY: &str = ".gallery";
    pub const GALLERY_SLIDES: &str = ".gallery .gallery-slide";
    pub const GALLERY_DOTS: &str = ".gallery .gallery-dot";
    pub const GALLERY_PREV: &str = ".gallery .gallery-prev";
    pub const GALLERY_NEXT: &str = ".gallery .gallery-next";
}

pub mod classes {
    pub const SCROLLED: &str = "scrolled";
    pub const NAV_HIDDEN: &str = "nav-hidden";
    pub const OPEN: &str = "open";
    pub const ACTIVE: &str = "active";
    pub const MENU_OPEN: &str = "menu-open";
    pub const VISIBLE: &str = "visible";
    pub const ATTENTION: &str = "attention";
    pub const PARTICLE: &str = "particle";
}

/// Every element the triggers touch. Absent markup stays `None` / empty and
/// the trigger that needs it skips itself.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    pub body: Option<HtmlElement>,
    pub navbar: Option<Element>,
    pub menu_toggle: Option<Element>,
    pub nav_menu: Option<Element>,
    pub nav_links: Vec<Element>,
    pub sections: Vec<Element>,
    pub anchors: Vec<Element>,
    pub reveal: Vec<Element>,
    pub back_to_top: Option<Element>,
    pub progress_ring: Option<Element>,
    pub parallax: Option<HtmlElement>,
    pub counters: Vec<Element>,
    pub particles: Option<Element>,
    pub gallery: Option<Element>,
    pub gallery_slides: Vec<Element>,
    pub gallery_dots: Vec<Element>,
    pub gallery_prev: Option<Element>,
    pub gallery_next: Option<Element>,
}

impl Dom {
    pub fn resolve(document: &Document) -> Self {
        let dom = Self {
            body: document.body(),
            navbar: query(document, selectors::NAVBAR),
            menu_toggle: query(document, selectors::MENU_TOGGLE),
            nav_menu: query(document, selectors::NAV_MENU),
            nav_links: query_all(document, selectors::NAV_LINKS),
            sections: query_all(document, selectors::SECTIONS),
            anchors: query_all(document, selectors::ANCHORS),
            reveal: query_all(document, selectors::REVEAL),
            back_to_top: query(document, selectors::BACK_TO_TOP),
            progress_ring: query(document, selectors::PROGRESS_RING),
            parallax: query(document, selectors::PARALLAX).and_then(|e| e.dyn_into().ok()),
            counters: query_all(document, selectors::COUNTERS),
            particles: query(document, selectors::PARTICLES),
            gallery: query(document, selectors::GALLERY),
            gallery_slides: query_all(document, selectors::GALLERY_SLIDES),
            gallery_dots: query_all(document, selectors::GALLERY_DOTS),
            gallery_prev: query(document, selectors::GALLERY_PREV),
            gallery_next: query(document, selectors::GALLERY_NEXT),
        };
        tracing::debug!(
            reveal = dom.reveal.len(),
            counters = dom.counters.len(),
            slides = dom.gallery_slides.len(),
            "dom resolved"
        );
        dom
    }
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn require<T: Clone>(slot: &Option<T>, what: &'static str) -> Result<T, SiteError> {
    slot.clone().ok_or(SiteError::MissingElement(what))
}

pub fn require_any<T: Clone>(items: &[T], what: &'static str) -> Result<Vec<T>, SiteError> {
    if items.is_empty() {
        return Err(SiteError::MissingElement(what));
    }
    Ok(items.to_vec())
}

pub fn set_class(element: &Element, class: &str, on: bool) -> Result<(), SiteError> {
    element.class_list().toggle_with_force(class, on)?;
    Ok(())
}

pub fn set_attr(element: &Element, name: &str, value: &str) -> Result<(), SiteError> {
    element.set_attribute(name, value)?;
    Ok(())
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<(), SiteError> {
    element.style().set_property(property, value)?;
    Ok(())
}

pub fn clear_style(element: &HtmlElement, property: &str) -> Result<(), SiteError> {
    element.style().remove_property(property)?;
    Ok(())
}

/// Log a failed presentation update without interrupting the handler.
pub fn apply(result: Result<(), SiteError>, what: &'static str) {
    if let Err(err) = result {
        tracing::warn!(%err, what, "dom update failed");
    }
}
