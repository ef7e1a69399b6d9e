#![cfg(target_arch = "wasm32")]

use site_web::Site;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn element(doc: &Document, tag: &str, class: &str) -> Element {
    let el = doc.create_element(tag).unwrap();
    el.set_class_name(class);
    el
}

fn click(el: &Element) {
    el.dyn_ref::<HtmlElement>().unwrap().click();
}

fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Appends a three-slide gallery to the body and returns (root, slides, dots, prev, next).
fn mount_gallery(doc: &Document) -> (Element, Vec<Element>, Vec<Element>, Element, Element) {
    let root = element(doc, "section", "gallery");
    let mut slides = Vec::new();
    let mut dots = Vec::new();
    for _ in 0..3 {
        let slide = element(doc, "div", "gallery-slide");
        root.append_child(&slide).unwrap();
        slides.push(slide);
    }
    for _ in 0..3 {
        let dot = element(doc, "button", "gallery-dot");
        root.append_child(&dot).unwrap();
        dots.push(dot);
    }
    let prev = element(doc, "button", "gallery-prev");
    let next = element(doc, "button", "gallery-next");
    root.append_child(&prev).unwrap();
    root.append_child(&next).unwrap();
    doc.body().unwrap().append_child(&root).unwrap();
    (root, slides, dots, prev, next)
}

#[wasm_bindgen_test]
fn init_is_idempotent_and_dispose_clears_it() {
    site_web::init().unwrap();
    site_web::init().unwrap();
    assert!(site_web::is_initialized());

    assert!(site_web::dispose().is_some());
    assert!(!site_web::is_initialized());
    assert_eq!(site_web::dispose(), None);
}

#[wasm_bindgen_test]
fn gallery_follows_dots_and_arrows() {
    let doc = document();
    let (root, slides, dots, prev, next) = mount_gallery(&doc);

    let site = Site::install(web_sys::window().unwrap()).unwrap();
    assert!(site.installed().contains(&"gallery"));
    assert!(has_class(&slides[0], "active"));
    assert_eq!(slides[1].get_attribute("aria-hidden").as_deref(), Some("true"));
    assert_eq!(root.get_attribute("tabindex").as_deref(), Some("0"));

    click(&dots[2]);
    assert!(has_class(&slides[2], "active"));
    assert!(has_class(&dots[2], "active"));
    assert!(!has_class(&slides[0], "active"));
    assert_eq!(dots[2].get_attribute("aria-selected").as_deref(), Some("true"));

    click(&next);
    assert!(has_class(&slides[0], "active"));
    click(&prev);
    assert!(has_class(&slides[2], "active"));

    site.dispose();
    click(&next);
    assert!(has_class(&slides[2], "active"));
    root.remove();
}

#[wasm_bindgen_test]
fn menu_toggles_and_closes_on_dispose() {
    let doc = document();
    let toggle = element(&doc, "button", "nav-toggle");
    let links = element(&doc, "ul", "nav-links");
    let body = doc.body().unwrap();
    body.append_child(&toggle).unwrap();
    body.append_child(&links).unwrap();

    let site = Site::install(web_sys::window().unwrap()).unwrap();
    assert!(site.installed().contains(&"menu"));
    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("false"));

    click(&toggle);
    assert!(has_class(&links, "open"));
    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("true"));

    site.dispose();
    assert!(!has_class(&links, "open"));
    toggle.remove();
    links.remove();
}
