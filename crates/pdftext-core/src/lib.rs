use std::time::Duration;

use thiserror::Error;
use tracing::warn;

pub mod backend;
pub mod config_file;
pub mod envelope;
pub mod extractor;
pub mod fetch;

#[cfg(test)]
mod mock;

// Re-export for convenience
pub use backend::{BackendError, DocumentSource, PdfBackend, PdfDocument};
pub use config_file::{ConfigError, ConfigFile, HttpConfig};
pub use envelope::{Envelope, USAGE};
pub use extractor::{DocumentRef, ERROR_PREFIX, Extractor, PAGE_SEPARATOR, collect_pages};

/// Default limit for downloading a remote document.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding [`Config::http_timeout`], in seconds.
pub const ENV_HTTP_TIMEOUT: &str = "PDFTEXT_HTTP_TIMEOUT";
/// Environment variable overriding [`Config::user_agent`].
pub const ENV_USER_AGENT: &str = "PDFTEXT_USER_AGENT";

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Runtime configuration for an [`Extractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            user_agent: concat!("pdftext/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Apply values present in a config file over the defaults.
    pub fn from_file(file: &ConfigFile) -> Self {
        let mut config = Self::default();
        if let Some(ref http) = file.http {
            if let Some(secs) = http.timeout_secs {
                config.set_timeout_secs(secs);
            }
            if let Some(ref ua) = http.user_agent {
                config.set_user_agent(ua);
            }
        }
        config
    }

    /// Resolve configuration: env vars > config files > defaults.
    pub fn load() -> Self {
        Self::from_file(&config_file::load_config()).with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.set_timeout_secs(secs),
                Err(_) => warn!(value = %raw, "ignoring invalid {ENV_HTTP_TIMEOUT}"),
            }
        }
        if let Some(ua) = lookup(ENV_USER_AGENT).filter(|v| !v.is_empty()) {
            self.set_user_agent(&ua);
        }
        self
    }

    fn set_user_agent(&mut self, ua: &str) {
        match reqwest::header::HeaderValue::from_str(ua) {
            Ok(_) => self.user_agent = ua.to_string(),
            Err(e) => warn!(value = ?ua, error = %e, "ignoring invalid user agent"),
        }
    }

    fn set_timeout_secs(&mut self, secs: u64) {
        if secs == 0 {
            warn!("ignoring zero HTTP timeout");
        } else {
            self.http_timeout = Duration::from_secs(secs);
        }
    }
}
