use pagekit::{PageConfig, PageReport};
use web_sys::{Document, Window};

mod config;
mod console_log;
mod dom;
mod form;
mod menu;
mod reveal;
mod scroll;
mod timers;

/// Wires every binding once the DOM is parsed.
pub fn start() {
    console_log::init(log::LevelFilter::Info);

    let Some(window) = web_sys::window() else {
        log::error!("pagekit: {}", pagekit::PageError::NoWindow);
        return;
    };
    let Some(document) = window.document() else {
        log::error!("pagekit: {}", pagekit::PageError::NoDocument);
        return;
    };

    if document.ready_state() != "loading" {
        install(&window, &document);
        return;
    }

    let (w, d) = (window.clone(), document.clone());
    let res = dom::add_listener(&document, "DOMContentLoaded", move |_| {
        install(&w, &d);
    });
    if let Err(e) = res {
        log::error!("pagekit: {e}");
    }
}

fn install(window: &Window, document: &Document) -> PageReport {
    let cfg: PageConfig = config::load_page_config(document);
    if let Some(level) = cfg.log_filter() {
        log::set_max_level(level);
    }

    let report = PageReport {
        menu: menu::install(window, document, &cfg.menu),
        form: form::install(window, document, &cfg.form),
        scroll: scroll::install(window, document, &cfg.scroll),
        reveal: reveal::install(window, document, &cfg.reveal),
    };
    report.log();
    report
}
