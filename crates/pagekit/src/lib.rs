//! Page interactivity for a static site: navigation menu, contact form,
//! smooth anchor scrolling and scroll-triggered reveals.
//!
//! Everything here is platform-independent and unit-tested on the host. The
//! browser side (`pagekit_web`) only implements the surface and timer traits
//! over `web-sys` and forwards DOM events.

pub mod config;
pub mod error;
pub mod form;
pub mod menu;
pub mod page;
pub mod reveal;
pub mod scroll;
pub mod submit;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::PageConfig;
pub use error::{ConfigError, PageError, SubmitError};
pub use page::{InstallStatus, PageReport};
