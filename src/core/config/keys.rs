use crate::core::config::data::Config;
use crate::core::config::io::ConfigError;
use crate::core::message::HistoryMode;

pub const CONFIG_KEYS: &[&str] = &["model", "timeout", "history", "attach-credential", "markdown"];

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(invalid(key, format!("expected on/off, got '{other}'"))),
    }
}

fn unknown_key(key: &str) -> ConfigError {
    invalid(
        key,
        format!("unknown config key (expected one of: {})", CONFIG_KEYS.join(", ")),
    )
}

impl Config {
    /// Applies `relaychat set <key> <value>` and returns a confirmation line.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<String, ConfigError> {
        let value = value.trim();
        match key {
            "model" => {
                if value.is_empty() {
                    return Err(invalid(key, "model cannot be empty"));
                }
                self.model = Some(value.to_string());
            }
            "timeout" => {
                let secs = value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| invalid(key, "expected a positive number of seconds"))?;
                self.timeout_secs = Some(secs);
            }
            "history" => {
                let mode = value
                    .parse::<HistoryMode>()
                    .map_err(|message| invalid(key, message))?;
                self.history = Some(mode);
            }
            "attach-credential" => self.attach_credential = Some(parse_bool(key, value)?),
            "markdown" => self.markdown = Some(parse_bool(key, value)?),
            _ => return Err(unknown_key(key)),
        }
        Ok(format!("✅ Set {key} to: {value}"))
    }

    /// Applies `relaychat unset <key>`, restoring the built-in default.
    pub fn unset_value(&mut self, key: &str) -> Result<String, ConfigError> {
        match key {
            "model" => self.model = None,
            "timeout" => self.timeout_secs = None,
            "history" => self.history = None,
            "attach-credential" => self.attach_credential = None,
            "markdown" => self.markdown = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(format!("✅ Unset {key}"))
    }
}
