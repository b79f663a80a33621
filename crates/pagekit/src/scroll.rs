use crate::config::ScrollConfig;

pub trait ScrollSurface {
    /// Viewport-relative top of the element with this id, if one exists.
    fn element_top(&self, id: &str) -> Option<f64>;
    fn page_y_offset(&self) -> f64;
    fn smooth_scroll_to(&self, top: f64);
    fn push_fragment(&self, fragment: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    Scrolled { top: f64 },
    NoTarget,
}

/// Returns the id part of a same-page link (`"#about"` -> `"about"`).
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn scroll_destination(element_top: f64, page_y_offset: f64, header_offset: f64) -> f64 {
    element_top + page_y_offset - header_offset
}

pub struct SmoothScroller<S: ScrollSurface> {
    surface: S,
    header_offset: f64,
}

impl<S: ScrollSurface> SmoothScroller<S> {
    pub fn new(surface: S, cfg: &ScrollConfig) -> Self {
        Self {
            surface,
            header_offset: cfg.header_offset_px,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The caller has already suppressed the default jump; a missing target is a no-op.
    pub fn on_anchor_click(&self, href: &str) -> ScrollOutcome {
        let Some(id) = fragment_id(href) else {
            return ScrollOutcome::NoTarget;
        };
        let Some(element_top) = self.surface.element_top(id) else {
            log::debug!("scroll: no element with id {id:?}");
            return ScrollOutcome::NoTarget;
        };

        let top = scroll_destination(element_top, self.surface.page_y_offset(), self.header_offset);
        self.surface.smooth_scroll_to(top);
        self.surface.push_fragment(href);
        ScrollOutcome::Scrolled { top }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakePage {
        tops: HashMap<String, f64>,
        offset: f64,
        scrolls: RefCell<Vec<f64>>,
        history: RefCell<Vec<String>>,
    }

    impl ScrollSurface for FakePage {
        fn element_top(&self, id: &str) -> Option<f64> {
            self.tops.get(id).copied()
        }
        fn page_y_offset(&self) -> f64 {
            self.offset
        }
        fn smooth_scroll_to(&self, top: f64) {
            self.scrolls.borrow_mut().push(top);
        }
        fn push_fragment(&self, fragment: &str) {
            self.history.borrow_mut().push(fragment.to_string());
        }
    }

    fn scroller() -> SmoothScroller<FakePage> {
        let mut page = FakePage {
            offset: 400.0,
            ..FakePage::default()
        };
        page.tops.insert("pricing".to_string(), 250.0);
        SmoothScroller::new(page, &ScrollConfig::default())
    }

    #[test]
    fn scrolls_below_fixed_header_and_records_fragment() {
        let s = scroller();
        assert_eq!(s.on_anchor_click("#pricing"), ScrollOutcome::Scrolled { top: 590.0 });
        assert_eq!(*s.surface().scrolls.borrow(), vec![590.0]);
        assert_eq!(*s.surface().history.borrow(), vec!["#pricing".to_string()]);
    }

    #[test]
    fn missing_target_is_a_silent_no_op() {
        let s = scroller();
        assert_eq!(s.on_anchor_click("#nowhere"), ScrollOutcome::NoTarget);
        assert_eq!(s.on_anchor_click("#"), ScrollOutcome::NoTarget);
        assert!(s.surface().scrolls.borrow().is_empty());
        assert!(s.surface().history.borrow().is_empty());
    }

    #[test]
    fn fragment_parsing() {
        assert_eq!(fragment_id("#top"), Some("top"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/about#top"), None);
    }
}
