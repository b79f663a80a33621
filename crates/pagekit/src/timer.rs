//! Cancelable one-shot timers and a cancel-and-reschedule debouncer.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::PageError;

/// Something that can run a callback once after a delay, e.g. `window.setTimeout`.
pub trait TimerHost {
    type Handle: Copy;

    fn set_timeout(
        &self,
        delay_ms: u32,
        callback: Box<dyn FnOnce()>,
    ) -> Result<Self::Handle, PageError>;

    /// Clearing a handle that already fired must be harmless.
    fn clear_timeout(&self, handle: Self::Handle);
}

/// Runs at most one deferred action per quiet period.
///
/// Every `schedule` call cancels whatever is pending and starts a fresh delay,
/// so a burst of events collapses into one action fired `delay_ms` after the
/// last of them.
pub struct Debouncer<H: TimerHost> {
    host: H,
    delay_ms: u32,
    pending: Rc<Cell<Option<H::Handle>>>,
}

impl<H: TimerHost> Debouncer<H> {
    pub fn new(host: H, delay_ms: u32) -> Self {
        Self {
            host,
            delay_ms,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn schedule(&self, action: impl FnOnce() + 'static) -> Result<(), PageError>
    where
        H::Handle: 'static,
    {
        self.cancel();
        let pending = Rc::clone(&self.pending);
        let handle = self.host.set_timeout(
            self.delay_ms,
            Box::new(move || {
                pending.set(None);
                action();
            }),
        )?;
        self.pending.set(Some(handle));
        Ok(())
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.host.clear_timeout(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ManualTimers;
    use std::cell::RefCell;

    #[test]
    fn burst_collapses_into_one_action_with_last_value() {
        let timers = ManualTimers::new();
        let debouncer = Debouncer::new(timers.clone(), 250);
        let fired = Rc::new(RefCell::new(Vec::new()));

        for v in 0..5 {
            let fired = Rc::clone(&fired);
            debouncer.schedule(move || fired.borrow_mut().push(v)).unwrap();
            timers.advance(100);
        }
        assert!(fired.borrow().is_empty());
        assert!(debouncer.is_pending());

        timers.advance(150);
        assert_eq!(*fired.borrow(), vec![4]);
        assert!(!debouncer.is_pending());

        timers.advance(1000);
        assert_eq!(fired.borrow().len(), 1);
    }

    #[test]
    fn cancel_drops_the_pending_action() {
        let timers = ManualTimers::new();
        let debouncer = Debouncer::new(timers.clone(), 100);
        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);
        debouncer.schedule(move || f.set(true)).unwrap();
        debouncer.cancel();
        timers.advance(500);
        assert!(!fired.get());
        assert_eq!(timers.live_count(), 0);
    }

    #[test]
    fn separate_quiet_periods_fire_separately() {
        let timers = ManualTimers::new();
        let debouncer = Debouncer::new(timers.clone(), 100);
        let count = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let c = Rc::clone(&count);
            debouncer.schedule(move || c.set(c.get() + 1)).unwrap();
            timers.advance(101);
        }
        assert_eq!(count.get(), 2);
    }
}
