use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::error::SettingsError;

pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/";
pub const DEFAULT_PROFILE_PATH: &str = "android-assesment/profile/refs/heads/main/data.json";
pub const DEFAULT_SETTINGS_FILE: &str = "profile_viewer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub profile_path: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            profile_path: DEFAULT_PROFILE_PATH.into(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Absolute URL of the profile document.
    pub fn endpoint(&self) -> Result<Url, SettingsError> {
        let invalid = |reason: String| SettingsError::InvalidUrl {
            value: format!("{}{}", self.base_url, self.profile_path),
            reason,
        };

        // A base without a trailing slash would have its last segment replaced by `join`.
        let base = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };
        let base = Url::parse(&base).map_err(|err| invalid(err.to_string()))?;
        let endpoint = base
            .join(self.profile_path.trim_start_matches('/'))
            .map_err(|err| invalid(err.to_string()))?;

        match endpoint.scheme() {
            "http" | "https" => Ok(endpoint),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    profile_path: Option<String>,
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
}

/// Defaults, then the optional TOML file at `path`, then environment overrides.
pub fn load_settings(path: impl AsRef<Path>) -> ClientSettings {
    let mut settings = ClientSettings::default();
    let path = path.as_ref();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, file_cfg),
            Err(err) => warn!(path = %path.display(), error = %err, "ignoring malformed settings file"),
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.base_url {
        settings.base_url = v;
    }
    if let Some(v) = file_cfg.profile_path {
        settings.profile_path = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.connect_timeout_secs {
        settings.connect_timeout_secs = v;
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("PROFILE_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = lookup("PROFILE_PATH") {
        settings.profile_path = v;
    }
    if let Some(v) = lookup("APP__PROFILE_PATH") {
        settings.profile_path = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
        }
    }
    if let Some(v) = lookup("APP__CONNECT_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.connect_timeout_secs = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__CONNECT_TIMEOUT_SECS"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
