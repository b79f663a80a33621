//! Collapsible navigation menu.
//!
//! The open/closed state lives here; the panel class and the trigger's
//! `aria-expanded`/`aria-label` are written from it on every transition so the
//! three never disagree.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::MenuConfig;
use crate::error::PageError;
use crate::timer::{Debouncer, TimerHost};

pub trait MenuSurface {
    fn set_panel_open(&self, open: bool);
    fn set_trigger_expanded(&self, expanded: bool);
    fn set_trigger_label(&self, label: &str);
}

pub struct MenuToggle<S: MenuSurface, H: TimerHost> {
    surface: S,
    open: Cell<bool>,
    open_label: String,
    close_label: String,
    breakpoint_px: f64,
    resize: Debouncer<H>,
}

impl<S, H> MenuToggle<S, H>
where
    S: MenuSurface + 'static,
    H: TimerHost + 'static,
    H::Handle: 'static,
{
    /// Writes all three representations right away so markup that ships
    /// out of sync is corrected at install.
    pub fn new(surface: S, timers: H, cfg: &MenuConfig, initially_open: bool) -> Rc<Self> {
        let menu = Self {
            surface,
            open: Cell::new(initially_open),
            open_label: cfg.open_label.clone(),
            close_label: cfg.close_label.clone(),
            breakpoint_px: cfg.breakpoint_px,
            resize: Debouncer::new(timers, cfg.resize_debounce_ms),
        };
        menu.apply(initially_open);
        Rc::new(menu)
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn toggle(&self) {
        self.apply(!self.open.get());
    }

    pub fn close(&self) {
        self.apply(false);
    }

    /// `inside` is true when the click landed in the trigger or the panel.
    pub fn on_document_click(&self, inside: bool) {
        if !inside {
            self.close();
        }
    }

    /// Width is read when the quiet period ends, not when the event arrives.
    pub fn on_resize(
        self: &Rc<Self>,
        read_width: impl FnOnce() -> f64 + 'static,
    ) -> Result<(), PageError> {
        let this = Rc::downgrade(self);
        self.resize.schedule(move || {
            if let Some(this) = this.upgrade() {
                this.on_viewport_settled(read_width());
            }
        })
    }

    pub fn on_viewport_settled(&self, width: f64) {
        if width > self.breakpoint_px && self.open.get() {
            log::debug!("menu: viewport {width}px past breakpoint, closing");
            self.close();
        }
    }

    fn apply(&self, open: bool) {
        self.open.set(open);
        self.surface.set_panel_open(open);
        self.surface.set_trigger_expanded(open);
        self.surface
            .set_trigger_label(if open { &self.close_label } else { &self.open_label });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ManualTimers;
    use std::cell::RefCell;

    #[derive(Default, Clone, Debug, PartialEq)]
    struct Attrs {
        panel_open: bool,
        expanded: Option<bool>,
        label: Option<String>,
    }

    #[derive(Default)]
    struct FakeMenu {
        attrs: RefCell<Attrs>,
    }

    impl MenuSurface for FakeMenu {
        fn set_panel_open(&self, open: bool) {
            self.attrs.borrow_mut().panel_open = open;
        }
        fn set_trigger_expanded(&self, expanded: bool) {
            self.attrs.borrow_mut().expanded = Some(expanded);
        }
        fn set_trigger_label(&self, label: &str) {
            self.attrs.borrow_mut().label = Some(label.to_string());
        }
    }

    fn menu(timers: &ManualTimers) -> Rc<MenuToggle<FakeMenu, ManualTimers>> {
        MenuToggle::new(FakeMenu::default(), timers.clone(), &MenuConfig::default(), false)
    }

    fn attrs(m: &MenuToggle<FakeMenu, ManualTimers>) -> Attrs {
        m.surface().attrs.borrow().clone()
    }

    #[test]
    fn toggle_syncs_class_and_aria() {
        let m = menu(&ManualTimers::new());
        m.toggle();
        assert!(m.is_open());
        assert_eq!(
            attrs(&m),
            Attrs {
                panel_open: true,
                expanded: Some(true),
                label: Some("Close menu".to_string()),
            }
        );
    }

    #[test]
    fn construction_syncs_aria_with_initial_state() {
        let m = menu(&ManualTimers::new());
        assert_eq!(
            attrs(&m),
            Attrs {
                panel_open: false,
                expanded: Some(false),
                label: Some("Open menu".to_string()),
            }
        );

        let cfg = MenuConfig::default();
        let open = MenuToggle::new(FakeMenu::default(), ManualTimers::new(), &cfg, true);
        assert!(open.is_open());
        assert_eq!(attrs(&open).expanded, Some(true));
        assert_eq!(attrs(&open).label.as_deref(), Some("Close menu"));
        assert!(attrs(&open).panel_open);
    }

    #[test]
    fn double_toggle_is_identity() {
        let m = menu(&ManualTimers::new());
        let before = (m.is_open(), attrs(&m));
        m.toggle();
        m.toggle();
        assert_eq!((m.is_open(), attrs(&m)), before);
        assert_eq!(before.1.label.as_deref(), Some("Open menu"));
    }

    #[test]
    fn outside_click_closes_and_inside_click_does_not() {
        let m = menu(&ManualTimers::new());
        m.toggle();
        m.on_document_click(true);
        assert!(m.is_open());
        m.on_document_click(false);
        assert!(!m.is_open());
        assert_eq!(attrs(&m).expanded, Some(false));

        m.on_document_click(false);
        assert!(!m.is_open());
        assert!(!attrs(&m).panel_open);
    }

    #[test]
    fn wide_resize_closes_after_debounce() {
        let timers = ManualTimers::new();
        let m = menu(&timers);
        m.toggle();

        m.on_resize(|| 1024.0).unwrap();
        timers.advance(249);
        assert!(m.is_open());
        timers.advance(2);
        assert!(!m.is_open());
        assert_eq!(attrs(&m).label.as_deref(), Some("Open menu"));
    }

    #[test]
    fn narrow_resize_leaves_open_menu_alone() {
        let timers = ManualTimers::new();
        let m = menu(&timers);
        m.toggle();
        m.on_resize(|| 768.0).unwrap();
        timers.advance(300);
        assert!(m.is_open());
    }

    #[test]
    fn resize_burst_evaluates_only_final_width() {
        let timers = ManualTimers::new();
        let m = menu(&timers);
        m.toggle();

        let reads = Rc::new(Cell::new(0));
        for w in [1200.0, 1100.0, 500.0] {
            let reads = Rc::clone(&reads);
            m.on_resize(move || {
                reads.set(reads.get() + 1);
                w
            })
            .unwrap();
            timers.advance(50);
        }
        timers.advance(500);
        assert_eq!(reads.get(), 1);
        assert!(m.is_open());
    }
}
