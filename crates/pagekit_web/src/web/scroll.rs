use std::rc::Rc;

use pagekit::config::ScrollConfig;
use pagekit::scroll::{ScrollSurface, SmoothScroller};
use pagekit::{InstallStatus, PageError};
use wasm_bindgen::JsValue;

use super::dom::{add_listener, query_all};

struct DomScroll {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl ScrollSurface for DomScroll {
    fn element_top(&self, id: &str) -> Option<f64> {
        self.document
            .get_element_by_id(id)
            .map(|el| el.get_bounding_client_rect().top())
    }

    fn page_y_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn smooth_scroll_to(&self, top: f64) {
        let opts = web_sys::ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(web_sys::ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&opts);
    }

    fn push_fragment(&self, fragment: &str) {
        if let Ok(history) = self.window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(fragment));
        }
    }
}

pub(super) fn install(
    window: &web_sys::Window,
    document: &web_sys::Document,
    cfg: &ScrollConfig,
) -> InstallStatus {
    try_install(window, document, cfg).unwrap_or_else(InstallStatus::failed)
}

fn try_install(
    window: &web_sys::Window,
    document: &web_sys::Document,
    cfg: &ScrollConfig,
) -> Result<InstallStatus, PageError> {
    let anchors = query_all(document, &cfg.anchor_selector)?;

    let surface = DomScroll {
        window: window.clone(),
        document: document.clone(),
    };
    let scroller = Rc::new(SmoothScroller::new(surface, cfg));

    for anchor in &anchors {
        let scroller = Rc::clone(&scroller);
        let a = anchor.clone();
        add_listener(anchor, "click", move |ev| {
            ev.prevent_default();
            let href = a.get_attribute("href").unwrap_or_default();
            scroller.on_anchor_click(&href);
        })?;
    }

    Ok(InstallStatus::bound(anchors.len()))
}
