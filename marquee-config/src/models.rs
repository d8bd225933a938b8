use std::path::{Path, PathBuf};
use std::time::Duration;

use marquee_model::Locale;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::loader::ConfigLoadError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_REALTIME_URL: &str = "ws://localhost:3000/ws";
pub const MAX_PAGE_SIZE: u32 = 100;

/// Which input produced the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    /// File named by `MARQUEE_CONFIG_PATH`.
    EnvPath(PathBuf),
    /// File found in one of the default locations.
    File(PathBuf),
}

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub realtime: RealtimeConfig,
    pub browse: BrowseConfig,
    pub notifications: NotificationConfig,
}

/// Catalog backend connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Upper bound for a single catalog request.
    #[serde(with = "crate::duration")]
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// Realtime relay socket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RealtimeConfig {
    pub url: String,
    /// Handshakes slower than this count as failed attempts.
    #[serde(with = "crate::duration")]
    pub connect_timeout: Duration,
    /// Fixed delay between reconnect attempts.
    #[serde(with = "crate::duration")]
    pub reconnect_interval: Duration,
    pub max_reconnect_attempts: u32,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REALTIME_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            reconnect_interval: Duration::from_secs(2),
            max_reconnect_attempts: 5,
        }
    }
}

/// Browsing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub locale: Locale,
    pub default_page_size: u32,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            default_page_size: 12,
        }
    }
}

impl BrowseConfig {
    /// Listing path for the configured locale, e.g. `/zh/media`.
    pub fn start_path(&self) -> String {
        format!("/{}/media", self.locale.code())
    }
}

/// Toast timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    #[serde(with = "crate::duration")]
    pub display_window: Duration,
    #[serde(with = "crate::duration")]
    pub dedupe_window: Duration,
    #[serde(with = "crate::duration")]
    pub debounce: Duration,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_window: Duration::from_secs(5),
            dedupe_window: Duration::from_secs(1),
            debounce: Duration::from_millis(100),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            ConfigLoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::parse_toml(&contents, path)
    }

    pub fn parse_toml(contents: &str, origin: &Path) -> Result<Self, ConfigLoadError> {
        toml::from_str(contents).map_err(|source| ConfigLoadError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigLoadError> {
        toml::to_string_pretty(self).map_err(ConfigLoadError::Render)
    }

    /// Reject values the client cannot run with.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        check_url("api.base_url", &self.api.base_url, &["http", "https"])?;
        check_url("realtime.url", &self.realtime.url, &["ws", "wss"])?;

        if !(1..=MAX_PAGE_SIZE).contains(&self.browse.default_page_size) {
            return Err(ConfigLoadError::Invalid {
                field: "browse.default_page_size",
                reason: format!(
                    "{} is outside 1..={}",
                    self.browse.default_page_size, MAX_PAGE_SIZE
                ),
            });
        }

        for (field, value) in [
            ("api.request_timeout", self.api.request_timeout),
            ("realtime.connect_timeout", self.realtime.connect_timeout),
            ("notifications.display_window", self.notifications.display_window),
        ] {
            if value.is_zero() {
                return Err(ConfigLoadError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn check_url(
    field: &'static str,
    raw: &str,
    schemes: &[&str],
) -> Result<(), ConfigLoadError> {
    let url = Url::parse(raw).map_err(|e| ConfigLoadError::Invalid {
        field,
        reason: format!("'{raw}' is not a valid URL: {e}"),
    })?;
    if !schemes.contains(&url.scheme()) {
        return Err(ConfigLoadError::Invalid {
            field,
            reason: format!(
                "scheme '{}' is not one of {}",
                url.scheme(),
                schemes.join(", ")
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.browse.start_path(), "/en/media");
        assert_eq!(config.realtime.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let raw = r#"
            [realtime]
            reconnect_interval = "1500ms"

            [browse]
            locale = "zh"
        "#;
        let config = Config::parse_toml(raw, Path::new("inline.toml")).unwrap();

        assert_eq!(config.realtime.reconnect_interval, Duration::from_millis(1500));
        assert_eq!(config.realtime.max_reconnect_attempts, 5);
        assert_eq!(config.browse.start_path(), "/zh/media");
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = Config::default();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("request_timeout = \"15s\""));
        assert_eq!(
            Config::parse_toml(&rendered, Path::new("rendered.toml")).unwrap(),
            config
        );
    }

    #[test]
    fn bad_durations_name_the_file() {
        let raw = "[api]\nrequest_timeout = \"soon\"\n";
        let err = Config::parse_toml(raw, Path::new("marquee.toml")).unwrap_err();
        assert!(err.to_string().contains("marquee.toml"));
    }

    #[test]
    fn validation_rejects_wrong_schemes() {
        let mut config = Config::default();
        config.realtime.url = "http://localhost:3000/ws".into();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid { field: "realtime.url", .. }));
    }
}
