use sysinfo::System;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;
use url::Url;

pub const SUPPORT_URL: &str = "https://github.com/PaulWoitaschek/Voice/discussions/categories/q-a";
pub const IDEAS_URL: &str = "https://github.com/PaulWoitaschek/Voice/discussions/categories/ideas";
pub const BUG_REPORT_URL: &str = "https://github.com/PaulWoitaschek/Voice/issues/new";
pub const TRANSLATIONS_URL: &str = "https://hosted.weblate.org/engage/voice/";

/// Where a navigation request leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Leave the current screen.
    Back,
    Website(Url),
}

impl Destination {
    pub fn website(url: &str) -> Result<Self, url::ParseError> {
        Url::parse(url).map(Destination::Website)
    }
}

pub trait Navigator: Send + Sync {
    fn go_to(&self, destination: Destination);
}

impl Navigator for UnboundedSender<Destination> {
    fn go_to(&self, destination: Destination) {
        if let Err(e) = self.send(destination) {
            warn!("navigation request dropped, no window is listening: {:?}", e.0);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub version_name: String,
}

impl AppInfo {
    pub fn current() -> Self {
        Self {
            version_name: crate::VERSION_STRING.to_owned(),
        }
    }
}

/// Host details attached to bug reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub platform_version: String,
    pub model: String,
}

impl DeviceInfo {
    pub fn detect() -> Self {
        let platform_version = System::os_version()
            .or_else(System::kernel_version)
            .unwrap_or_else(|| "unknown".to_owned());
        let model = format!(
            "{} {}",
            System::name().unwrap_or_else(|| std::env::consts::OS.to_owned()),
            std::env::consts::ARCH
        );

        Self {
            platform_version,
            model,
        }
    }
}

/// Issue form prefilled with the diagnostics the bug template asks for.
pub fn bug_report_url(app: &AppInfo, device: &DeviceInfo) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(BUG_REPORT_URL)?;
    url.query_pairs_mut()
        .append_pair("template", "bug.yml")
        .append_pair("version", &app.version_name)
        .append_pair("androidversion", &device.platform_version)
        .append_pair("device", &device.model);
    Ok(url)
}
