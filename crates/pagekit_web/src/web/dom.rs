use pagekit::PageError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub(super) fn describe_js(v: &JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{v:?}"))
}

pub(super) fn query(
    document: &web_sys::Document,
    selector: &str,
) -> Result<Option<web_sys::Element>, PageError> {
    document
        .query_selector(selector)
        .map_err(|e| PageError::Dom(format!("bad selector {selector:?}: {}", describe_js(&e))))
}

pub(super) fn query_all(
    document: &web_sys::Document,
    selector: &str,
) -> Result<Vec<web_sys::Element>, PageError> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| PageError::Dom(format!("bad selector {selector:?}: {}", describe_js(&e))))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web_sys::Element>().ok())
        .collect())
}

/// Attaches `handler` for the lifetime of the page.
pub(super) fn add_listener(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), PageError> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .map_err(|e| PageError::Dom(format!("addEventListener({event}): {}", describe_js(&e))))?;
    cb.forget();
    Ok(())
}
