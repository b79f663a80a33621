use pagekit::PageConfig;

/// `<script type="application/json" id="pagekit-config">{...}</script>`
const CONFIG_ELEMENT_ID: &str = "pagekit-config";

pub(super) fn load_page_config(document: &web_sys::Document) -> PageConfig {
    let Some(el) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return PageConfig::default();
    };
    let raw = el.text_content().unwrap_or_default();
    match PageConfig::from_json(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("pagekit: #{CONFIG_ELEMENT_ID}: {e}; using defaults");
            PageConfig::default()
        }
    }
}
