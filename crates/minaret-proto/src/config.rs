use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Remote station directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Full station list refresh.
    #[serde(default = "default_list_interval_secs")]
    pub list_interval_secs: u64,
    /// Now-playing refresh for the selected station.
    #[serde(default = "default_now_playing_interval_secs")]
    pub now_playing_interval_secs: u64,
}

/// Local control API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_enabled")]
    pub enabled: bool,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Used only when no persisted volume exists yet.
    #[serde(default = "default_volume")]
    pub default_volume: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme at start-up.  Toggling at runtime is not written back.
    #[serde(default)]
    pub theme: ThemeName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            list_interval_secs: default_list_interval_secs(),
            now_playing_interval_secs: default_now_playing_interval_secs(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: default_http_enabled(),
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_volume: default_volume(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            log_file: default_log_file(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_list_interval_secs() -> u64 {
    crate::feed::LIST_POLL_INTERVAL.as_secs()
}

fn default_now_playing_interval_secs() -> u64 {
    crate::feed::NOW_PLAYING_POLL_INTERVAL.as_secs()
}

fn default_http_enabled() -> bool {
    true
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8990
}

fn default_volume() -> f32 {
    crate::session::DEFAULT_VOLUME
}

fn default_state_file() -> PathBuf {
    platform::data_dir().join("state.json")
}

fn default_log_file() -> PathBuf {
    platform::data_dir().join("minaret.log")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    pub fn list_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.polling.list_interval_secs.max(1))
    }

    pub fn now_playing_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.polling.now_playing_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.api.timeout_secs.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            polling: PollingConfig::default(),
            http: HttpConfig::default(),
            player: PlayerConfig::default(),
            ui: UiConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}
