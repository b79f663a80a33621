use thiserror::Error;

/// Why a form submission did not complete.
///
/// All variants are reported to the user with the same generic message; the
/// variant itself only goes to the diagnostic log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    #[error("network: {0}")]
    Network(String),
    #[error("response parse: {0}")]
    Parse(String),
    #[error("request encode: {0}")]
    Encode(String),
}

/// Failures while wiring bindings to the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("timer: {0}")]
    Timer(String),
    #[error("observer: {0}")]
    Observer(String),
    #[error("dom: {0}")]
    Dom(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
