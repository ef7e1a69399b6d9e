use std::cell::RefCell;
use std::rc::Rc;

use gallery::{
    Gallery, GalleryKey, GalleryView, Navigation, PageConditions, SharedGallery, SwipeTracker,
    TouchPoint,
};
use runtime::dispose::DisposeBag;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, TouchEvent};

use crate::dom::{self, classes};
use crate::error::SiteError;
use crate::hub::ViewportChange;
use crate::listeners::EventListener;
use crate::site::SiteContext;
use crate::timers::WindowTimers;

/// Slides and dots share the active index; screen readers get matching
/// `aria-hidden` / `aria-selected`.
pub struct DomGalleryView {
    slides: Vec<Element>,
    dots: Vec<Element>,
}

impl DomGalleryView {
    fn mark(&self, index: usize, active: bool) -> Result<(), SiteError> {
        if let Some(slide) = self.slides.get(index) {
            dom::set_class(slide, classes::ACTIVE, active)?;
            dom::set_attr(slide, "aria-hidden", if active { "false" } else { "true" })?;
        }
        if let Some(dot) = self.dots.get(index) {
            dom::set_class(dot, classes::ACTIVE, active)?;
            dom::set_attr(dot, "aria-selected", if active { "true" } else { "false" })?;
        }
        Ok(())
    }
}

impl GalleryView for DomGalleryView {
    fn render(&mut self, active: usize, previous: Option<usize>) {
        let result = match previous {
            Some(prev) => self.mark(prev, false),
            // First render: normalize whatever the markup shipped with.
            None => (0..self.slides.len())
                .filter(|i| *i != active)
                .try_for_each(|i| self.mark(i, false)),
        };
        dom::apply(result.and_then(|()| self.mark(active, true)), "gallery");
    }
}

type PageGallery = SharedGallery<WindowTimers, DomGalleryView>;

fn touch_point(event: &Event) -> Option<TouchPoint> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(TouchPoint::new(
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
    ))
}

fn on_click(
    gallery: &PageGallery,
    target: &Element,
    nav: Navigation,
) -> Result<EventListener, SiteError> {
    let g = gallery.clone();
    EventListener::new(target.as_ref(), "click", move |_| {
        if let Err(err) = g.borrow_mut().navigate(nav) {
            tracing::warn!(%err, "gallery navigation");
        }
    })
}

pub fn install(ctx: &Rc<SiteContext>, bag: &mut DisposeBag) -> Result<(), SiteError> {
    let root = dom::require(&ctx.dom.gallery, "gallery")?;
    let slides = dom::require_any(&ctx.dom.gallery_slides, "gallery slides")?;
    let view = DomGalleryView {
        dots: ctx.dom.gallery_dots.clone(),
        slides,
    };
    let len = view.slides.len();
    let gallery = Gallery::new_shared(
        len,
        view,
        ctx.timers.clone(),
        ctx.config.gallery,
        PageConditions {
            reduced_motion: ctx.state().reduced_motion,
            document_hidden: ctx.document.hidden(),
        },
    )?;
    tracing::debug!(len, autoplay = gallery.borrow().is_autoplaying(), "gallery ready");

    for (i, dot) in ctx.dom.gallery_dots.iter().enumerate().take(len) {
        bag.hold("gallery-dot", on_click(&gallery, dot, Navigation::Index(i))?);
    }
    if let Some(prev) = &ctx.dom.gallery_prev {
        bag.hold("gallery-prev", on_click(&gallery, prev, Navigation::Previous)?);
    }
    if let Some(next) = &ctx.dom.gallery_next {
        bag.hold("gallery-next", on_click(&gallery, next, Navigation::Next)?);
    }

    if !root.has_attribute("tabindex") {
        dom::set_attr(&root, "tabindex", "0")?;
    }
    let g = gallery.clone();
    bag.hold(
        "gallery-keys",
        EventListener::new(root.as_ref(), "keydown", move |event| {
            let Some(key) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|k| GalleryKey::from_key_name(&k.key()))
            else {
                return;
            };
            event.prevent_default();
            g.borrow_mut().on_key(key);
        })?,
    );

    let swipe = Rc::new(RefCell::new(SwipeTracker::default()));
    let s = swipe.clone();
    bag.hold(
        "gallery-touchstart",
        EventListener::passive(root.as_ref(), "touchstart", move |event| {
            if let Some(at) = touch_point(&event) {
                s.borrow_mut().begin(at);
            }
        })?,
    );
    let (g, s) = (gallery.clone(), swipe.clone());
    let swipe_config = ctx.config.gallery.swipe;
    bag.hold(
        "gallery-touchend",
        EventListener::passive(root.as_ref(), "touchend", move |event| {
            let Some(at) = touch_point(&event) else {
                s.borrow_mut().cancel();
                return;
            };
            let Some(nav) = s.borrow_mut().finish(&swipe_config, at) else {
                return;
            };
            if let Err(err) = g.borrow_mut().navigate(nav) {
                tracing::warn!(%err, "gallery swipe");
            }
        })?,
    );

    let g = gallery.clone();
    let document = ctx.document.clone();
    bag.hold(
        "gallery-visibility",
        EventListener::new(ctx.document.as_ref(), "visibilitychange", move |_| {
            g.borrow_mut().set_document_hidden(document.hidden());
        })?,
    );

    let g = gallery.clone();
    ctx.hub.on_viewport("gallery", move |change, state| {
        if change == ViewportChange::MotionPreference {
            g.borrow_mut().set_reduced_motion(state.reduced_motion);
        }
    });

    bag.push("gallery", move || gallery.borrow_mut().dispose());
    Ok(())
}
