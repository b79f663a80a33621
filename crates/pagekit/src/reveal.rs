//! One-shot reveal of elements as they scroll into view.
//!
//! Candidates are registered with the intersection watcher after the load
//! debounce. An element is revealed on its first intersecting entry, then
//! dropped from the watcher and from the pending set; later entries for it are
//! ignored.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::RevealConfig;
use crate::error::PageError;
use crate::timer::{Debouncer, TimerHost};

pub trait RevealSurface {
    type Target: Clone + PartialEq;

    /// Elements eligible for reveal, excluding any already marked revealed.
    fn candidates(&self) -> Vec<Self::Target>;
    fn observe(&self, target: &Self::Target);
    fn unobserve(&self, target: &Self::Target);
    fn mark_revealed(&self, target: &Self::Target);
}

pub struct ScrollRevealer<S: RevealSurface, H: TimerHost> {
    surface: S,
    pending: RefCell<Vec<S::Target>>,
    revealed: Cell<usize>,
    load: Debouncer<H>,
}

impl<S, H> ScrollRevealer<S, H>
where
    S: RevealSurface + 'static,
    H: TimerHost + 'static,
    H::Handle: 'static,
{
    pub fn new(surface: S, timers: H, cfg: &RevealConfig) -> Rc<Self> {
        Rc::new(Self {
            surface,
            pending: RefCell::new(Vec::new()),
            revealed: Cell::new(0),
            load: Debouncer::new(timers, cfg.load_debounce_ms),
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.get()
    }

    pub fn on_load(self: &Rc<Self>) -> Result<(), PageError> {
        let this = Rc::downgrade(self);
        self.load.schedule(move || {
            if let Some(this) = this.upgrade() {
                let n = this.register_candidates();
                log::debug!("reveal: registered {n} element(s)");
            }
        })
    }

    /// Starts watching every candidate not already pending.
    pub fn register_candidates(&self) -> usize {
        let mut added = 0;
        for target in self.surface.candidates() {
            if self.pending.borrow().contains(&target) {
                continue;
            }
            self.surface.observe(&target);
            self.pending.borrow_mut().push(target);
            added += 1;
        }
        added
    }

    /// Feeds `(target, is_intersecting)` entries from the watcher.
    pub fn on_intersections(
        &self,
        entries: impl IntoIterator<Item = (S::Target, bool)>,
    ) -> usize {
        let mut revealed = 0;
        for (target, intersecting) in entries {
            if !intersecting {
                continue;
            }
            let idx = self.pending.borrow().iter().position(|t| *t == target);
            let Some(idx) = idx else {
                continue;
            };
            let target = self.pending.borrow_mut().swap_remove(idx);
            self.surface.mark_revealed(&target);
            self.surface.unobserve(&target);
            revealed += 1;
        }
        self.revealed.set(self.revealed.get() + revealed);
        revealed
    }
}
