use std::cell::RefCell;
use std::rc::Rc;

use foundation::time::Time;
use runtime::dispose::DisposeBag;
use viewport::{ViewportState, ViewportTracker};
use web_sys::{Document, Window};

use crate::config::{CONFIG_ATTRIBUTE, SiteConfig};
use crate::dom::Dom;
use crate::error::SiteError;
use crate::hub::{Hub, ScrollSnapshot};
use crate::timers::{FrameLoop, WindowTimers};
use crate::{input, platform, triggers};

/// Shared, read-mostly state every trigger is installed against.
pub struct SiteContext {
    pub config: SiteConfig,
    pub window: Window,
    pub document: Document,
    pub dom: Dom,
    pub viewport: RefCell<ViewportTracker>,
    pub frames: FrameLoop,
    pub timers: WindowTimers,
    pub hub: Hub,
}

impl SiteContext {
    pub fn state(&self) -> ViewportState {
        self.viewport.borrow().state()
    }

    pub fn now(&self) -> Time {
        platform::now(&self.window)
    }

    /// Ask for one scroll dispatch on the next frame. Repeated calls within a
    /// frame collapse into one.
    pub fn schedule_scroll(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.frames.request("scroll", move |frame| {
            if let Some(ctx) = weak.upgrade() {
                ctx.run_scroll_frame(frame.time);
            }
        });
    }

    fn run_scroll_frame(&self, time: Time) {
        let metrics = platform::scroll_metrics(&self.window, &self.document);
        let viewport = self.viewport.borrow_mut().on_scroll(metrics.scroll_y);
        self.hub.dispatch_scroll(&ScrollSnapshot {
            viewport,
            metrics,
            time,
        });
    }
}

/// An initialized page: the context plus everything needed to tear it down.
pub struct Site {
    ctx: Rc<SiteContext>,
    bag: DisposeBag,
    installed: Vec<&'static str>,
}

impl Site {
    pub fn install(window: Window) -> Result<Self, SiteError> {
        let document = window
            .document()
            .ok_or(SiteError::Unsupported("window.document"))?;
        let dom = Dom::resolve(&document);
        let config = SiteConfig::from_attribute(
            dom.body
                .as_ref()
                .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE)),
        );
        let tracker = ViewportTracker::new(
            config.viewport,
            platform::viewport_width(&window),
            platform::scroll_y(&window),
            platform::prefers_reduced_motion(&window),
        );
        let ctx = Rc::new(SiteContext {
            config,
            frames: FrameLoop::new(window.clone()),
            timers: WindowTimers::new(window.clone()),
            window,
            document,
            dom,
            viewport: RefCell::new(tracker),
            hub: Hub::new(),
        });

        let mut bag = DisposeBag::new();
        {
            // Pushed first so it runs after every trigger's own teardown.
            let ctx = ctx.clone();
            bag.push("core", move || {
                ctx.hub.clear();
                ctx.frames.dispose();
                ctx.timers.clear_all();
            });
        }

        let mut installed = Vec::new();
        let steps = std::iter::once(("input", input::install as triggers::Install))
            .chain(triggers::ALL.iter().copied());
        for (name, install) in steps {
            match install(&ctx, &mut bag) {
                Ok(()) => installed.push(name),
                Err(err) if err.is_missing_element() => {
                    tracing::debug!(name, %err, "trigger skipped");
                }
                Err(err) => tracing::warn!(name, %err, "trigger disabled"),
            }
        }

        ctx.schedule_scroll();
        tracing::info!(?installed, reduced_motion = ctx.state().reduced_motion, "site initialized");
        Ok(Self {
            ctx,
            bag,
            installed,
        })
    }

    pub fn context(&self) -> &Rc<SiteContext> {
        &self.ctx
    }

    pub fn installed(&self) -> &[&'static str] {
        &self.installed
    }

    pub fn dispose(mut self) -> usize {
        let ran = self.bag.dispose();
        tracing::info!(disposers = ran, "site disposed");
        ran
    }
}
