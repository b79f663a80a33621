//! Page-level settings: selectors, labels, messages and timing constants.
//!
//! Every field has a default, so an empty JSON object is a complete config.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub menu: MenuConfig,
    pub form: FormConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            menu: MenuConfig::default(),
            form: FormConfig::default(),
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: PageConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Invalid(format!(
                "reveal.threshold must be within 0..=1, got {}",
                self.reveal.threshold
            )));
        }
        if self.form.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("form.endpoint is empty".to_string()));
        }
        if self.log_filter().is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    pub fn log_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.trim().parse().ok()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub trigger_selector: String,
    pub panel_selector: String,
    pub open_class: String,
    pub open_label: String,
    pub close_label: String,
    pub breakpoint_px: f64,
    pub resize_debounce_ms: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            trigger_selector: ".menu-btn".to_string(),
            panel_selector: ".nav-menu".to_string(),
            open_class: "active".to_string(),
            open_label: "Open menu".to_string(),
            close_label: "Close menu".to_string(),
            breakpoint_px: 768.0,
            resize_debounce_ms: 250,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub form_selector: String,
    pub submit_selector: String,
    pub endpoint: String,
    pub submit_label: String,
    pub busy_label: String,
    pub success_message: String,
    pub failure_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_selector: "form".to_string(),
            submit_selector: "button[type=\"submit\"]".to_string(),
            endpoint: "/api/submit".to_string(),
            submit_label: "Submit".to_string(),
            busy_label: "Submitting...".to_string(),
            success_message: "Form submitted successfully!".to_string(),
            failure_message: "An error occurred. Please try again.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub anchor_selector: String,
    pub header_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".to_string(),
            header_offset_px: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub candidate_selector: String,
    pub revealed_class: String,
    pub threshold: f64,
    pub root_margin: String,
    pub load_debounce_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            candidate_selector: ".animate-on-scroll".to_string(),
            revealed_class: "animate".to_string(),
            threshold: 0.1,
            root_margin: "50px".to_string(),
            load_debounce_ms: 100,
        }
    }
}
