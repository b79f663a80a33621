use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pagekit::timer::TimerHost;
use pagekit::PageError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

struct TimerSlot {
    id: i32,
    done: Rc<Cell<bool>>,
    _closure: Closure<dyn FnMut()>,
}

/// `window.setTimeout` with the JS closures kept alive until the timer fires
/// or is cleared.
#[derive(Clone)]
pub(super) struct BrowserTimers {
    window: web_sys::Window,
    slots: Rc<RefCell<Vec<TimerSlot>>>,
}

impl BrowserTimers {
    pub(super) fn new(window: web_sys::Window) -> Self {
        Self {
            window,
            slots: Rc::new(RefCell::new(Vec::new())),
        }
    }

    // `done` is set after the callback returns, so a running closure is never dropped here.
    fn sweep(&self) {
        self.slots.borrow_mut().retain(|s| !s.done.get());
    }
}

impl TimerHost for BrowserTimers {
    type Handle = i32;

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<i32, PageError> {
        self.sweep();

        let done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&done);
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(cb) = callback.take() {
                cb();
            }
            flag.set(true);
        }) as Box<dyn FnMut()>);

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay,
            )
            .map_err(|_| PageError::Timer("setTimeout threw".to_string()))?;

        self.slots.borrow_mut().push(TimerSlot {
            id,
            done,
            _closure: closure,
        });
        Ok(id)
    }

    fn clear_timeout(&self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
        self.slots.borrow_mut().retain(|s| s.id != handle);
        self.sweep();
    }
}
