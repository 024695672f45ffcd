use std::time::Duration;

use crate::core::config::data::Config;
use crate::core::config::io::ConfigError;
use crate::core::message::HistoryMode;

pub const BASE_URL_ENV: &str = "OPEN_WEBUI_TUNNEL_URL";
pub const CREDENTIAL_ENV: &str = "OPEN_WEBUI_API_KEY";

/// Where requests go and the credential they may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSettings {
    pub base_url: String,
    /// Empty when no credential is configured.
    pub credential: String,
}

impl EndpointSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup` so callers and tests can supply
    /// their own environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingBaseUrl {
                variable: BASE_URL_ENV,
            })?;
        let credential = lookup(CREDENTIAL_ENV)
            .map(|value| value.trim().to_string())
            .unwrap_or_default();
        Ok(Self {
            base_url,
            credential,
        })
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.is_empty()
    }
}

/// Command-line flags that take precedence over `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub model: Option<String>,
    pub history: Option<HistoryMode>,
    pub timeout_secs: Option<u64>,
    pub no_credential: bool,
}

/// Everything a session needs, resolved from env, file and flags.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub endpoint: EndpointSettings,
    pub model: String,
    pub timeout: Duration,
    pub history: HistoryMode,
    pub attach_credential: bool,
    pub markdown: bool,
}

impl ChatSettings {
    pub fn resolve(
        endpoint: EndpointSettings,
        config: &Config,
        overrides: &SettingsOverrides,
    ) -> Self {
        Self {
            endpoint,
            model: overrides
                .model
                .clone()
                .filter(|model| !model.trim().is_empty())
                .unwrap_or_else(|| config.model().to_string()),
            timeout: overrides
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.timeout()),
            history: overrides.history.unwrap_or_else(|| config.history()),
            attach_credential: !overrides.no_credential && config.attach_credential(),
            markdown: config.markdown(),
        }
    }
}
