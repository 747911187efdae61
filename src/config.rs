use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::api::types::SuggestMode;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub search: SearchConfig,
    pub data: DataConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Remote search service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the search service.
    pub base_url: String,
    /// Number of autocomplete suggestions to request.
    pub suggest_size: u32,
    /// Number of results per search page.
    pub page_size: u32,
    /// Delay before a suggestion fetch fires while typing.
    pub debounce_ms: u64,
    /// Grace period before the suggestion list hides after the input
    /// loses focus.
    pub blur_grace_ms: u64,
    /// Request timeout for all endpoints.
    pub request_timeout_secs: u64,
    /// Start with the advanced (search-as-you-type) suggestion backend.
    pub advanced_suggestions: bool,
}

/// Data directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tui: TuiConfig::default(),
            search: SearchConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            suggest_size: 5,
            page_size: 10,
            debounce_ms: 300,
            blur_grace_ms: 80,
            request_timeout_secs: 15,
            advanced_suggestions: false,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { data_dir: None }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/modseek/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    /// `MODSEEK_BASE_URL` overrides the configured base URL.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        };

        if let Ok(url) = std::env::var("MODSEEK_BASE_URL") {
            if !url.trim().is_empty() {
                config.search.base_url = url;
            }
        }

        config
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("modseek"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("modseek").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl SearchConfig {
    /// Suggestion backend selected by configuration.
    pub fn suggest_mode(&self) -> SuggestMode {
        if self.advanced_suggestions {
            SuggestMode::Advanced
        } else {
            SuggestMode::Fast
        }
    }
}
