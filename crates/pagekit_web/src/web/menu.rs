use std::rc::Rc;

use pagekit::config::MenuConfig;
use pagekit::menu::{MenuSurface, MenuToggle};
use pagekit::{InstallStatus, PageError};
use wasm_bindgen::JsCast;

use super::dom::{add_listener, query};
use super::timers::BrowserTimers;

struct DomMenu {
    trigger: web_sys::Element,
    panel: web_sys::Element,
    open_class: String,
}

impl MenuSurface for DomMenu {
    fn set_panel_open(&self, open: bool) {
        let _ = self
            .panel
            .class_list()
            .toggle_with_force(&self.open_class, open);
    }

    fn set_trigger_expanded(&self, expanded: bool) {
        let _ = self
            .trigger
            .set_attribute("aria-expanded", if expanded { "true" } else { "false" });
    }

    fn set_trigger_label(&self, label: &str) {
        let _ = self.trigger.set_attribute("aria-label", label);
    }
}

pub(super) fn install(
    window: &web_sys::Window,
    document: &web_sys::Document,
    cfg: &MenuConfig,
) -> InstallStatus {
    try_install(window, document, cfg).unwrap_or_else(InstallStatus::failed)
}

fn try_install(
    window: &web_sys::Window,
    document: &web_sys::Document,
    cfg: &MenuConfig,
) -> Result<InstallStatus, PageError> {
    let Some(trigger) = query(document, &cfg.trigger_selector)? else {
        return Ok(InstallStatus::missing(&cfg.trigger_selector));
    };
    let Some(panel) = query(document, &cfg.panel_selector)? else {
        return Ok(InstallStatus::missing(&cfg.panel_selector));
    };

    let initially_open = panel.class_list().contains(&cfg.open_class);
    let surface = DomMenu {
        trigger: trigger.clone(),
        panel: panel.clone(),
        open_class: cfg.open_class.clone(),
    };
    let menu = MenuToggle::new(surface, BrowserTimers::new(window.clone()), cfg, initially_open);

    let on_trigger = Rc::clone(&menu);
    add_listener(&trigger, "click", move |_| on_trigger.toggle())?;

    let on_document = Rc::clone(&menu);
    add_listener(document, "click", move |ev| {
        let inside = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
            .is_some_and(|n| trigger.contains(Some(&n)) || panel.contains(Some(&n)));
        on_document.on_document_click(inside);
    })?;

    let w = window.clone();
    add_listener(window, "resize", move |_| {
        let w = w.clone();
        let res = menu.on_resize(move || {
            w.inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0)
        });
        if let Err(e) = res {
            log::warn!("menu: resize debounce: {e}");
        }
    })?;

    Ok(InstallStatus::installed())
}
