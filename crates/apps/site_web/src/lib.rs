//! Browser entry point for the marketing site.
//!
//! `start` runs when the module is instantiated; it waits for the DOM and
//! installs every trigger whose markup is present. Everything is torn down by
//! `dispose`.

pub mod config;
pub mod dom;
pub mod error;
pub mod hub;
pub mod input;
pub mod listeners;
pub mod logging;
pub mod platform;
pub mod site;
pub mod timers;
pub mod triggers;

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub use config::SiteConfig;
pub use error::SiteError;
pub use site::Site;

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    let window = web_sys::window().ok_or(SiteError::Unsupported("window"))?;
    let document = window
        .document()
        .ok_or(SiteError::Unsupported("window.document"))?;
    if document.ready_state() != "loading" {
        return init();
    }
    let on_ready = Closure::once_into_js(|| {
        if let Err(err) = init() {
            tracing::error!(?err, "site init failed");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    Ok(())
}

/// Installs the site once. Later calls are no-ops.
#[wasm_bindgen]
pub fn init() -> Result<(), JsValue> {
    if is_initialized() {
        tracing::debug!("site already initialized");
        return Ok(());
    }
    let window = web_sys::window().ok_or(SiteError::Unsupported("window"))?;
    let site = Site::install(window)?;
    SITE.with(|slot| *slot.borrow_mut() = Some(site));
    Ok(())
}

pub fn is_initialized() -> bool {
    SITE.with(|slot| slot.borrow().is_some())
}

/// Removes every listener, timer and frame request. Returns the number of
/// disposers that ran, or `None` if nothing was installed.
pub fn dispose() -> Option<usize> {
    let site = SITE.with(|slot| slot.borrow_mut().take())?;
    Some(site.dispose())
}
