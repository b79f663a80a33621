use std::cell::OnceCell;
use std::rc::Rc;

use pagekit::config::RevealConfig;
use pagekit::reveal::{RevealSurface, ScrollRevealer};
use pagekit::{InstallStatus, PageError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::dom::{add_listener, query_all};
use super::timers::BrowserTimers;

struct DomReveal {
    document: web_sys::Document,
    selector: String,
    revealed_class: String,
    // Set right after construction; the observer callback needs the revealer first.
    observer: OnceCell<web_sys::IntersectionObserver>,
}

impl RevealSurface for DomReveal {
    type Target = web_sys::Element;

    fn candidates(&self) -> Vec<web_sys::Element> {
        match query_all(&self.document, &self.selector) {
            Ok(all) => all
                .into_iter()
                .filter(|el| !el.class_list().contains(&self.revealed_class))
                .collect(),
            Err(e) => {
                log::warn!("reveal: {e}");
                Vec::new()
            }
        }
    }

    fn observe(&self, target: &web_sys::Element) {
        if let Some(o) = self.observer.get() {
            o.observe(target);
        }
    }

    fn unobserve(&self, target: &web_sys::Element) {
        if let Some(o) = self.observer.get() {
            o.unobserve(target);
        }
    }

    fn mark_revealed(&self, target: &web_sys::Element) {
        let _ = target.class_list().add_1(&self.revealed_class);
    }
}

pub(super) fn install(
    window: &web_sys::Window,
    document: &web_sys::Document,
    cfg: &RevealConfig,
) -> InstallStatus {
    try_install(window, document, cfg).unwrap_or_else(InstallStatus::failed)
}

fn try_install(
    window: &web_sys::Window,
    document: &web_sys::Document,
    cfg: &RevealConfig,
) -> Result<InstallStatus, PageError> {
    let surface = DomReveal {
        document: document.clone(),
        selector: cfg.candidate_selector.clone(),
        revealed_class: cfg.revealed_class.clone(),
        observer: OnceCell::new(),
    };
    let revealer = ScrollRevealer::new(surface, BrowserTimers::new(window.clone()), cfg);

    let weak = Rc::downgrade(&revealer);
    let on_entries = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
            let Some(revealer) = weak.upgrade() else {
                return;
            };
            let batch = entries
                .iter()
                .filter_map(|v| v.dyn_into::<web_sys::IntersectionObserverEntry>().ok())
                .map(|entry| (entry.target(), entry.is_intersecting()));
            let n = revealer.on_intersections(batch);
            if n > 0 {
                log::debug!(
                    "reveal: {n} element(s) revealed, {} pending",
                    revealer.pending_count()
                );
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>);

    let init = web_sys::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(cfg.threshold));
    init.set_root_margin(&cfg.root_margin);
    let observer =
        web_sys::IntersectionObserver::new_with_options(on_entries.as_ref().unchecked_ref(), &init)
            .map_err(|e| PageError::Observer(super::dom::describe_js(&e)))?;
    on_entries.forget();
    let _ = revealer.surface().observer.set(observer);

    let on_load = Rc::clone(&revealer);
    add_listener(window, "load", move |_| {
        if let Err(e) = on_load.on_load() {
            log::warn!("reveal: load debounce: {e}");
        }
    })?;

    // The module may start after `load` already fired.
    if document.ready_state() == "complete" {
        revealer.on_load()?;
    }

    Ok(InstallStatus::installed())
}
