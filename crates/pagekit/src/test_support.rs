use std::cell::RefCell;
use std::rc::Rc;

use crate::error::PageError;
use crate::timer::TimerHost;

type Pending = (u64, u64, Box<dyn FnOnce()>);

#[derive(Default)]
struct ManualTimersInner {
    now_ms: u64,
    next_id: u64,
    queue: Vec<Pending>,
}

/// Virtual clock that only moves when a test calls `advance`.
#[derive(Clone, Default)]
pub(crate) struct ManualTimers {
    inner: Rc<RefCell<ManualTimersInner>>,
}

impl ManualTimers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    pub(crate) fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now_ms + ms;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let idx = inner
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, (due, _, _))| *due <= target)
                    .min_by_key(|(_, (due, id, _))| (*due, *id))
                    .map(|(i, _)| i);
                match idx {
                    Some(i) => {
                        let (due, _, cb) = inner.queue.remove(i);
                        inner.now_ms = due;
                        Some(cb)
                    }
                    None => None,
                }
            };
            match next {
                Some(cb) => cb(),
                None => break,
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }
}

impl TimerHost for ManualTimers {
    type Handle = u64;

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<u64, PageError> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due = inner.now_ms + u64::from(delay_ms);
        inner.queue.push((due, id, callback));
        Ok(id)
    }

    fn clear_timeout(&self, handle: u64) {
        self.inner
            .borrow_mut()
            .queue
            .retain(|(_, id, _)| *id != handle);
    }
}
