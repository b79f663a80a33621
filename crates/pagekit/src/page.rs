use std::fmt;

/// Whether a binding found the elements it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Installed { bound: usize },
    NotInstalled { reason: String },
}

impl InstallStatus {
    pub fn installed() -> Self {
        InstallStatus::Installed { bound: 1 }
    }

    /// For optional bindings; zero matches is still a working install.
    pub fn bound(count: usize) -> Self {
        InstallStatus::Installed { bound: count }
    }

    pub fn missing(selector: &str) -> Self {
        InstallStatus::NotInstalled {
            reason: format!("no element matches {selector:?}"),
        }
    }

    pub fn failed(reason: impl fmt::Display) -> Self {
        InstallStatus::NotInstalled {
            reason: reason.to_string(),
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self, InstallStatus::Installed { .. })
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStatus::Installed { bound } => write!(f, "installed ({bound})"),
            InstallStatus::NotInstalled { reason } => write!(f, "not installed: {reason}"),
        }
    }
}

/// What the page controller managed to wire up at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub menu: InstallStatus,
    pub form: InstallStatus,
    pub scroll: InstallStatus,
    pub reveal: InstallStatus,
}

impl PageReport {
    pub fn installed_count(&self) -> usize {
        [&self.menu, &self.form, &self.scroll, &self.reveal]
            .into_iter()
            .filter(|s| s.is_installed())
            .count()
    }

    pub fn log(&self) {
        for (name, status) in [
            ("menu", &self.menu),
            ("form", &self.form),
            ("scroll", &self.scroll),
            ("reveal", &self.reveal),
        ] {
            if status.is_installed() {
                log::info!("{name}: {status}");
            } else {
                log::warn!("{name}: {status}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_installed_bindings() {
        let report = PageReport {
            menu: InstallStatus::missing(".menu-btn"),
            form: InstallStatus::installed(),
            scroll: InstallStatus::Installed { bound: 4 },
            reveal: InstallStatus::failed("observer: unsupported"),
        };
        assert_eq!(report.installed_count(), 2);
        assert_eq!(
            report.menu.to_string(),
            "not installed: no element matches \".menu-btn\""
        );
        assert_eq!(report.scroll.to_string(), "installed (4)");
    }

    #[test]
    fn optional_binding_with_no_matches_is_installed() {
        let report = PageReport {
            menu: InstallStatus::installed(),
            form: InstallStatus::installed(),
            scroll: InstallStatus::bound(0),
            reveal: InstallStatus::installed(),
        };
        assert!(report.scroll.is_installed());
        assert_eq!(report.scroll.to_string(), "installed (0)");
        assert_eq!(report.installed_count(), 4);
    }
}
