//! Configuration management for Hostify
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `HOSTIFY_` environment variables (sections separated by `__`, e.g.
//! `HOSTIFY_AUTH__AUTO_LOGIN_ON_REGISTER=true`).

use config::{Config, Environment, File};
use log::debug;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default config file name, resolved relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "hostify";

/// Complete portal configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HostifyConfig {
    pub auth: AuthPolicy,
    pub storage: StorageConfig,
    pub portal: PortalConfig,
}

/// Rules the credential store applies to registration and login
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthPolicy {
    /// Write the session record as part of a successful registration
    pub auto_login_on_register: bool,

    pub min_password_length: usize,
    pub min_name_length: usize,

    /// Upper bound for every submitted field
    pub max_field_length: usize,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            auto_login_on_register: false,
            min_password_length: 6,
            min_name_length: 1,
            max_field_length: 256,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Location of the JSON storage file
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    /// Simulated API delay before a form submission is processed
    pub submit_delay_ms: u64,
}

impl HostifyConfig {
    /// Load configuration from `hostify.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from the given file (extension optional, file optional)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = AuthPolicy::default();

        let settings = Config::builder()
            .set_default("auth.auto_login_on_register", defaults.auto_login_on_register)?
            .set_default("auth.min_password_length", defaults.min_password_length as i64)?
            .set_default("auth.min_name_length", defaults.min_name_length as i64)?
            .set_default("auth.max_field_length", defaults.max_field_length as i64)?
            .set_default("storage.path", "hostify-storage.json")?
            .set_default("portal.submit_delay_ms", 1000_i64)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("HOSTIFY")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: HostifyConfig = settings.try_deserialize()?;
        config.validate()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.auth.min_password_length == 0 {
            return Err(config::ConfigError::Message(
                "auth.min_password_length must be greater than 0".into(),
            ));
        }

        if self.auth.min_name_length == 0 {
            return Err(config::ConfigError::Message(
                "auth.min_name_length must be greater than 0".into(),
            ));
        }

        if self.auth.max_field_length < self.auth.min_password_length
            || self.auth.max_field_length < self.auth.min_name_length
        {
            return Err(config::ConfigError::Message(
                "auth.max_field_length must not be below the minimum lengths".into(),
            ));
        }

        if self.storage.path.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "storage.path cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

impl StorageConfig {
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl PortalConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}
