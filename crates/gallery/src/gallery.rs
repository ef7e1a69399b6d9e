use std::cell::RefCell;
use std::rc::{Rc, Weak};

use runtime::timers::TimerHost;
use serde::{Deserialize, Serialize};

use crate::controller::{GalleryController, GalleryError, Navigation, Transition};
use crate::input::{GalleryKey, SwipeConfig, TouchPoint, resolve_swipe};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub autoplay: bool,
    pub autoplay_interval_ms: u32,
    pub swipe: SwipeConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_interval_ms: 5_000,
            swipe: SwipeConfig::default(),
        }
    }
}

/// Presentation side of the gallery (active classes, captions, dots).
pub trait GalleryView {
    /// Show `active`. `previous` is `None` for the initial render.
    fn render(&mut self, active: usize, previous: Option<usize>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayStop {
    UserInteraction,
    DocumentHidden,
    ReducedMotion,
    Disposed,
}

/// Page conditions that pause autoplay, as observed when the gallery is built.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageConditions {
    pub reduced_motion: bool,
    pub document_hidden: bool,
}

pub type SharedGallery<H, V> = Rc<RefCell<Gallery<H, V>>>;

/// Screenshot gallery: selection state, its view, and the autoplay timer.
///
/// At most one autoplay interval is alive at a time. User interaction stops it
/// for the rest of the session; hiding the document or asking for reduced
/// motion pauses it until the condition clears.
pub struct Gallery<H: TimerHost + 'static, V: GalleryView + 'static> {
    controller: GalleryController,
    view: V,
    host: H,
    config: GalleryConfig,
    autoplay: Option<H::Handle>,
    user_stopped: bool,
    document_hidden: bool,
    reduced_motion: bool,
    self_ref: Weak<RefCell<Self>>,
}

impl<H: TimerHost + 'static, V: GalleryView + 'static> Gallery<H, V> {
    /// Build the gallery, render entry 0 and start autoplay when allowed.
    pub fn new_shared(
        len: usize,
        view: V,
        host: H,
        config: GalleryConfig,
        conditions: PageConditions,
    ) -> Result<SharedGallery<H, V>, GalleryError> {
        let controller = GalleryController::new(len)?;
        let gallery = Rc::new_cyclic(|self_ref| {
            RefCell::new(Self {
                controller,
                view,
                host,
                config,
                autoplay: None,
                user_stopped: false,
                document_hidden: conditions.document_hidden,
                reduced_motion: conditions.reduced_motion,
                self_ref: self_ref.clone(),
            })
        });
        {
            let mut g = gallery.borrow_mut();
            let active = g.controller.active();
            g.view.render(active, None);
            g.start_autoplay();
        }
        Ok(gallery)
    }

    pub fn active(&self) -> usize {
        self.controller.active()
    }

    pub fn len(&self) -> usize {
        self.controller.len()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    fn apply(&mut self, transition: Option<Transition>) -> Option<Transition> {
        if let Some(t) = transition {
            tracing::debug!(from = t.from, to = t.to, "gallery transition");
            self.view.render(t.to, Some(t.from));
        }
        transition
    }

    /// User-driven navigation (click, key, swipe). Stops autoplay for good.
    pub fn navigate(&mut self, nav: Navigation) -> Result<Option<Transition>, GalleryError> {
        self.user_stopped = true;
        self.stop_autoplay(AutoplayStop::UserInteraction);
        let transition = self.controller.navigate(nav)?;
        Ok(self.apply(transition))
    }

    pub fn select(&mut self, index: usize) -> Result<Option<Transition>, GalleryError> {
        self.navigate(Navigation::Index(index))
    }

    pub fn on_key(&mut self, key: GalleryKey) -> Option<Transition> {
        self.navigate(key.navigation()).ok().flatten()
    }

    /// `None` if the gesture was not a swipe or landed on the active entry.
    pub fn on_swipe(&mut self, start: TouchPoint, end: TouchPoint) -> Option<Transition> {
        let nav = resolve_swipe(&self.config.swipe, start, end)?;
        self.navigate(nav).ok().flatten()
    }

    /// One autoplay step.
    pub fn tick(&mut self) -> Option<Transition> {
        let transition = self.controller.next();
        self.apply(transition)
    }

    fn may_autoplay(&self) -> bool {
        self.config.autoplay
            && !self.user_stopped
            && !self.document_hidden
            && !self.reduced_motion
            && self.controller.len() > 1
    }

    /// Start the autoplay interval. No-op when already running or not allowed.
    pub fn start_autoplay(&mut self) -> bool {
        if self.autoplay.is_some() || !self.may_autoplay() {
            return false;
        }
        let weak = self.self_ref.clone();
        let tick = Box::new(move || {
            if let Some(gallery) = weak.upgrade() {
                gallery.borrow_mut().tick();
            }
        });
        match self.host.set_interval(self.config.autoplay_interval_ms, tick) {
            Ok(handle) => {
                tracing::debug!(interval_ms = self.config.autoplay_interval_ms, "autoplay started");
                self.autoplay = Some(handle);
                true
            }
            Err(err) => {
                tracing::warn!(%err, "autoplay unavailable");
                false
            }
        }
    }

    pub fn stop_autoplay(&mut self, reason: AutoplayStop) {
        if let Some(handle) = self.autoplay.take() {
            tracing::debug!(?reason, "autoplay stopped");
            self.host.clear(handle);
        }
    }

    pub fn set_document_hidden(&mut self, hidden: bool) {
        self.document_hidden = hidden;
        if hidden {
            self.stop_autoplay(AutoplayStop::DocumentHidden);
        } else {
            self.start_autoplay();
        }
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
        if reduced {
            self.stop_autoplay(AutoplayStop::ReducedMotion);
        } else {
            self.start_autoplay();
        }
    }

    pub fn dispose(&mut self) {
        self.user_stopped = true;
        self.stop_autoplay(AutoplayStop::Disposed);
    }
}

impl<H: TimerHost + 'static, V: GalleryView + 'static> Drop for Gallery<H, V> {
    fn drop(&mut self) {
        self.stop_autoplay(AutoplayStop::Disposed);
    }
}
