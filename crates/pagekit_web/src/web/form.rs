use std::rc::Rc;

use pagekit::config::FormConfig;
use pagekit::form::FormSubmission;
use pagekit::submit::{FormSubmitter, FormSurface, HttpReply, SubmitOutcome, Transport};
use pagekit::{InstallStatus, PageError, SubmitError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::dom::{add_listener, describe_js, query};

struct DomForm {
    window: web_sys::Window,
    form: web_sys::HtmlFormElement,
    submit: Option<web_sys::Element>,
}

impl FormSurface for DomForm {
    fn read_fields(&self) -> FormSubmission {
        let mut out = FormSubmission::new();
        let Ok(data) = web_sys::FormData::new_with_form(&self.form) else {
            log::warn!("form: FormData construction failed");
            return out;
        };
        let Ok(Some(entries)) = js_sys::try_iter(&data) else {
            return out;
        };
        for entry in entries.flatten() {
            let pair = js_sys::Array::from(&entry);
            // File inputs carry Blob values; only string fields are submitted.
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                out.insert(name, value);
            }
        }
        out
    }

    fn set_busy(&self, busy: bool, label: &str) {
        let Some(button) = &self.submit else {
            return;
        };
        let _ = button.toggle_attribute_with_force("disabled", busy);
        button.set_text_content(Some(label));
    }

    fn notify(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn reset_fields(&self) {
        self.form.reset();
    }
}

struct FetchTransport {
    window: web_sys::Window,
}

fn network(context: &str) -> impl Fn(JsValue) -> SubmitError + '_ {
    move |e| SubmitError::Network(format!("{context}: {}", describe_js(&e)))
}

impl Transport for FetchTransport {
    async fn post_json(&self, endpoint: &str, body: String) -> Result<HttpReply, SubmitError> {
        let headers = web_sys::Headers::new().map_err(network("headers"))?;
        headers
            .set("Content-Type", "application/json")
            .map_err(network("headers"))?;

        let init = web_sys::RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));

        let request =
            web_sys::Request::new_with_str_and_init(endpoint, &init).map_err(network("request"))?;
        let response = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(network("fetch"))?
            .dyn_into::<web_sys::Response>()
            .map_err(|_| SubmitError::Network("fetch: expected Response".to_string()))?;

        let status = response.status();
        if !response.ok() {
            return Ok(HttpReply {
                status,
                body: String::new(),
            });
        }
        let text = JsFuture::from(response.text().map_err(network("body"))?)
            .await
            .map_err(network("body"))?;
        Ok(HttpReply {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}

pub(super) fn install(
    window: &web_sys::Window,
    document: &web_sys::Document,
    cfg: &FormConfig,
) -> InstallStatus {
    try_install(window, document, cfg).unwrap_or_else(InstallStatus::failed)
}

fn try_install(
    window: &web_sys::Window,
    document: &web_sys::Document,
    cfg: &FormConfig,
) -> Result<InstallStatus, PageError> {
    let Some(el) = query(document, &cfg.form_selector)? else {
        return Ok(InstallStatus::missing(&cfg.form_selector));
    };
    let form = el
        .dyn_into::<web_sys::HtmlFormElement>()
        .map_err(|_| PageError::Dom(format!("{:?} is not a <form>", cfg.form_selector)))?;

    let submit = form.query_selector(&cfg.submit_selector).ok().flatten();
    if submit.is_none() {
        log::warn!(
            "form: no {:?} inside the form; busy state disabled",
            cfg.submit_selector
        );
    }

    let surface = DomForm {
        window: window.clone(),
        form: form.clone(),
        submit,
    };
    let transport = FetchTransport {
        window: window.clone(),
    };
    let submitter = Rc::new(FormSubmitter::new(surface, transport, cfg.clone()));

    add_listener(&form, "submit", move |ev| {
        ev.prevent_default();
        let submitter = Rc::clone(&submitter);
        wasm_bindgen_futures::spawn_local(async move {
            match submitter.submit().await {
                SubmitOutcome::Sent(_) => log::info!("form: submitted"),
                SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) => {}
            }
        });
    })?;

    Ok(InstallStatus::installed())
}
