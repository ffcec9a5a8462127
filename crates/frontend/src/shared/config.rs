//! Client configuration.
//!
//! An embedded TOML default, optionally overridden by a TOML document stored
//! in `localStorage` under [`CONFIG_STORAGE_KEY`]. Provided to the component
//! tree as a context by `App`.

use std::sync::OnceLock;

use serde::Deserialize;

pub const CONFIG_STORAGE_KEY: &str = "crm_config";

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub table: TableConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Full API base URL; empty means "same host as the page, on `port`"
    #[serde(default)]
    pub base_url: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    pub default_page_size: usize,
    /// Prefix of money columns
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "Rs ".to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotificationConfig {
    pub timeout_ms: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 5000

[table]
default_page_size = 5
currency = "Rs "

[notifications]
timeout_ms = 4000
"#;

#[derive(Debug, thiserror::Error)]
#[error("Invalid configuration: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

impl AppConfig {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolves the API base, falling back to the page location
    pub fn api_base(&self) -> String {
        let base = self.api.base_url.trim().trim_end_matches('/');
        if !base.is_empty() {
            return base.to_string();
        }
        let Some(window) = web_sys::window() else {
            return String::new();
        };
        let location = window.location();
        let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
        let hostname = location
            .hostname()
            .unwrap_or_else(|_| "127.0.0.1".to_string());
        format!("{}//{}:{}", protocol, hostname, self.api.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        // The embedded document is covered by `test_default_config_loads`
        Self::parse(DEFAULT_CONFIG).unwrap_or_else(|_| Self {
            api: ApiConfig {
                base_url: String::new(),
                port: 5000,
            },
            table: TableConfig {
                default_page_size: 5,
                currency: default_currency(),
            },
            notifications: NotificationConfig { timeout_ms: 4000 },
        })
    }
}

/// Load configuration
///
/// Search order:
/// 1. `localStorage[crm_config]` (a full TOML document)
/// 2. Embedded default
pub fn load_config() -> AppConfig {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten());

    if let Some(contents) = stored {
        match AppConfig::parse(&contents) {
            Ok(config) => {
                log::info!("Loaded config override from localStorage");
                return config;
            }
            Err(e) => log::warn!("Ignoring config override: {}", e),
        }
    }

    log::debug!("Using default embedded configuration");
    AppConfig::default()
}

/// Loads the configuration once per page load
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(load_config)
}

/// Configuration for code running outside the component tree (API helpers)
pub fn current_config() -> AppConfig {
    CONFIG.get().cloned().unwrap_or_default()
}
