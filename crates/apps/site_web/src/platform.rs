//! Reads of platform signals: scroll geometry, viewport size, motion
//! preference, clocks and feature detection.

use foundation::bounds::Rect;
use foundation::time::Time;
use viewport::ScrollMetrics;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, MediaQueryList, Window};

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub fn now(window: &Window) -> Time {
    let ms = window
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now);
    Time::from_ms(ms)
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn scroll_metrics(window: &Window, document: &Document) -> ScrollMetrics {
    let document_height = document
        .document_element()
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0);
    ScrollMetrics::new(scroll_y(window), viewport_height(window), document_height)
}

pub fn rect_of(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.top(), r.bottom(), r.left(), r.right())
}

/// Top edge of `element` in document coordinates.
pub fn document_top(window: &Window, element: &Element) -> f64 {
    rect_of(element).top + scroll_y(window)
}

pub fn reduced_motion_query(window: &Window) -> Option<MediaQueryList> {
    window.match_media(REDUCED_MOTION_QUERY).ok().flatten()
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
    reduced_motion_query(window)
        .map(|q| q.matches())
        .unwrap_or(false)
}

pub fn has_intersection_observer(window: &Window) -> bool {
    js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

/// Uniform `[0, 1)` source for decorative randomness.
pub fn random() -> f64 {
    js_sys::Math::random()
}
