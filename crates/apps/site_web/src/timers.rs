//! Window-backed timers and the animation-frame loop.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use foundation::time::Time;
use runtime::scheduler::FrameScheduler;
use runtime::timers::{TimerCallback, TimerError, TimerHost};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::platform;

struct Slot {
    _closure: Closure<dyn FnMut()>,
    fired: Rc<Cell<bool>>,
    repeating: bool,
}

/// `setTimeout` / `setInterval` behind [`TimerHost`].
///
/// Closures stay alive in `slots` until cleared; fired one-shot timers are swept
/// on the next schedule call.
#[derive(Clone)]
pub struct WindowTimers {
    window: Window,
    slots: Rc<RefCell<HashMap<i32, Slot>>>,
}

impl WindowTimers {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            slots: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn live(&self) -> usize {
        self.slots.borrow().len()
    }

    fn sweep(&self) {
        self.slots
            .borrow_mut()
            .retain(|_, slot| slot.repeating || !slot.fired.get());
    }

    fn schedule(
        &self,
        ms: u32,
        repeating: bool,
        mut callback: TimerCallback,
    ) -> Result<i32, TimerError> {
        self.sweep();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            flag.set(true);
            callback();
        });
        let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
        let f = closure.as_ref().unchecked_ref();
        let scheduled = if repeating {
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_0(f, timeout)
        } else {
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(f, timeout)
        };
        let id = scheduled.map_err(|e| TimerError(format!("{e:?}")))?;
        self.slots.borrow_mut().insert(
            id,
            Slot {
                _closure: closure,
                fired,
                repeating,
            },
        );
        Ok(id)
    }

    pub fn clear_all(&self) {
        let ids: Vec<i32> = self.slots.borrow().keys().copied().collect();
        for id in ids {
            self.clear(id);
        }
    }
}

impl TimerHost for WindowTimers {
    type Handle = i32;

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<i32, TimerError> {
        self.schedule(delay_ms, false, callback)
    }

    fn set_interval(&self, period_ms: u32, callback: TimerCallback) -> Result<i32, TimerError> {
        self.schedule(period_ms, true, callback)
    }

    fn clear(&self, handle: i32) {
        let slot = self.slots.borrow_mut().remove(&handle);
        match slot {
            Some(slot) if slot.repeating => self.window.clear_interval_with_handle(handle),
            _ => self.window.clear_timeout_with_handle(handle),
        }
    }
}

struct FrameLoopInner {
    window: Window,
    scheduler: RefCell<FrameScheduler>,
    raf_id: Cell<Option<i32>>,
    on_frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

/// Drives a [`FrameScheduler`] from `requestAnimationFrame`.
///
/// At most one animation frame is outstanding; everything requested before it
/// fires runs in registration order inside it.
#[derive(Clone)]
pub struct FrameLoop {
    inner: Rc<FrameLoopInner>,
}

impl FrameLoop {
    pub fn new(window: Window) -> Self {
        let inner = Rc::new(FrameLoopInner {
            window,
            scheduler: RefCell::new(FrameScheduler::new()),
            raf_id: Cell::new(None),
            on_frame: RefCell::new(None),
        });
        let weak: Weak<FrameLoopInner> = Rc::downgrade(&inner);
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.raf_id.set(None);
            let batch = inner.scheduler.borrow_mut().take_frame(Time::from_ms(timestamp));
            batch.run();
        });
        *inner.on_frame.borrow_mut() = Some(on_frame);
        Self { inner }
    }

    pub fn request(&self, key: &'static str, cb: impl FnOnce(runtime::frame::Frame) + 'static) {
        let needs_frame = self.inner.scheduler.borrow_mut().request(key, cb);
        if needs_frame {
            self.arm();
        }
    }

    fn arm(&self) {
        let on_frame = self.inner.on_frame.borrow();
        let Some(on_frame) = on_frame.as_ref() else {
            self.inner.scheduler.borrow_mut().frame_request_failed();
            return;
        };
        match self
            .inner
            .window
            .request_animation_frame(on_frame.as_ref().unchecked_ref())
        {
            Ok(id) => self.inner.raf_id.set(Some(id)),
            Err(err) => {
                tracing::warn!(?err, "requestAnimationFrame failed");
                self.inner.scheduler.borrow_mut().frame_request_failed();
            }
        }
    }

    pub fn now(&self) -> Time {
        platform::now(&self.inner.window)
    }

    pub fn pending(&self) -> usize {
        self.inner.scheduler.borrow().pending_count()
    }

    pub fn dispose(&self) {
        if let Some(id) = self.inner.raf_id.take() {
            let _ = self.inner.window.cancel_animation_frame(id);
        }
        self.inner.scheduler.borrow_mut().clear();
        self.inner.on_frame.borrow_mut().take();
    }
}
