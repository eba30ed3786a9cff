use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ProviderId;

pub const DEFAULT_MAX_RESULTS: u32 = 100;

const ENV_APP_ID: &str = "HERE_APP_ID";
const ENV_APP_CODE: &str = "HERE_APP_CODE";

/// Credentials and request settings for a single provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub app_id: String,
    pub app_code: String,

    /// Value sent as `maxresults`.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Overrides the provider's public endpoint, e.g. to point at a local stand-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("app_id", &self.app_id)
            .field("app_code", &"[REDACTED]")
            .field("max_results", &self.max_results)
            .field("base_url", &self.base_url)
            .finish()
    }
}

const fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

impl ProviderConfig {
    pub fn new(app_id: impl Into<String>, app_code: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_code: app_code.into(),
            max_results: DEFAULT_MAX_RESULTS,
            base_url: None,
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default provider id, e.g. "here".
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [providers.here]
    /// app_id = "..."
    /// app_code = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        let s = self.default_provider.as_ref().ok_or_else(|| {
            anyhow!(
                "No default provider configured.\n\
                 Hint: run `geocode configure <provider>` (e.g. `geocode configure here`) first."
            )
        })?;

        ProviderId::try_from(s.as_str())
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    pub fn is_provider_configured(&self, id: ProviderId) -> bool {
        self.provider_config(id).is_some()
    }

    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Set or replace a provider's settings; the first provider stored becomes the default.
    pub fn upsert_provider(&mut self, id: ProviderId, provider: ProviderConfig) {
        self.providers.insert(id.as_str().to_string(), provider);

        if self.default_provider.is_none() {
            self.set_default_provider(id);
        }
    }

    /// Credentials from `HERE_APP_ID` / `HERE_APP_CODE` take precedence over the file.
    pub fn apply_env_overrides(&mut self) {
        self.override_here_credentials(
            std::env::var(ENV_APP_ID).ok(),
            std::env::var(ENV_APP_CODE).ok(),
        );
    }

    fn override_here_credentials(&mut self, app_id: Option<String>, app_code: Option<String>) {
        let (Some(app_id), Some(app_code)) = (app_id, app_code) else {
            return;
        };

        match self.providers.get_mut(ProviderId::Here.as_str()) {
            Some(existing) => {
                existing.app_id = app_id;
                existing.app_code = app_code;
            }
            None => self.upsert_provider(ProviderId::Here, ProviderConfig::new(app_id, app_code)),
        }
    }

    /// Load config from the platform config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "geocode", "geocode-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
