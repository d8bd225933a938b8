//! Resolves the effective [`Config`] from a config file, `MARQUEE_*`
//! environment overrides and built-in defaults.
//!
//! File lookup order:
//! 1. `MARQUEE_CONFIG_PATH`
//! 2. `marquee.toml` then `config/marquee.toml` under the base directory
//! 3. defaults
//!
//! Individual overrides are applied on top of whichever file won.

mod error;

pub use error::ConfigLoadError;

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use marquee_model::Locale;
use tracing::{debug, info};

use crate::duration;
use crate::models::{Config, ConfigSource};

pub const CONFIG_PATH_VAR: &str = "MARQUEE_CONFIG_PATH";
pub const API_URL_VAR: &str = "MARQUEE_API_URL";
pub const REALTIME_URL_VAR: &str = "MARQUEE_REALTIME_URL";
pub const PAGE_SIZE_VAR: &str = "MARQUEE_PAGE_SIZE";
pub const LOCALE_VAR: &str = "MARQUEE_LOCALE";
pub const REQUEST_TIMEOUT_VAR: &str = "MARQUEE_REQUEST_TIMEOUT";

const ENV_PREFIX: &str = "MARQUEE_";
const CANDIDATE_FILES: [&str; 2] = ["marquee.toml", "config/marquee.toml"];

/// Loader over an explicit variable map so resolution can be exercised
/// without touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    vars: HashMap<String, String>,
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            base_dir: base_dir.into(),
        }
    }

    /// Snapshot of the `MARQUEE_*` process variables, after loading a
    /// `.env` file from the working directory if one exists.
    pub fn from_process_env() -> Result<Self, ConfigLoadError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("[Config] Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err.into()),
        }

        let base_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let vars = env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect();
        Ok(Self { vars, base_dir })
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn load(&self) -> Result<(Config, ConfigSource), ConfigLoadError> {
        let (mut config, source) = self.load_base()?;
        self.apply_overrides(&mut config)?;
        config.validate()?;

        info!("[Config] Using {}", describe(&source));
        Ok((config, source))
    }

    fn load_base(&self) -> Result<(Config, ConfigSource), ConfigLoadError> {
        if let Some(raw) = self.lookup(CONFIG_PATH_VAR) {
            let path = self.resolve(raw);
            let config = Config::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(path) = self.find_default_file() {
            let config = Config::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Config::default(), ConfigSource::Default))
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        CANDIDATE_FILES
            .iter()
            .map(|candidate| self.base_dir.join(candidate))
            .find(|path| path.is_file())
    }

    fn apply_overrides(&self, config: &mut Config) -> Result<(), ConfigLoadError> {
        if let Some(url) = self.lookup(API_URL_VAR) {
            config.api.base_url = url.to_string();
        }
        if let Some(url) = self.lookup(REALTIME_URL_VAR) {
            config.realtime.url = url.to_string();
        }
        if let Some(raw) = self.lookup(PAGE_SIZE_VAR) {
            config.browse.default_page_size =
                raw.parse().map_err(|e: std::num::ParseIntError| {
                    invalid_env(PAGE_SIZE_VAR, raw, e.to_string())
                })?;
        }
        if let Some(raw) = self.lookup(LOCALE_VAR) {
            config.browse.locale = raw
                .parse::<Locale>()
                .map_err(|e| invalid_env(LOCALE_VAR, raw, e.to_string()))?;
        }
        if let Some(raw) = self.lookup(REQUEST_TIMEOUT_VAR) {
            config.api.request_timeout = duration::parse(raw)
                .map_err(|e| invalid_env(REQUEST_TIMEOUT_VAR, raw, e.to_string()))?;
        }
        Ok(())
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    fn resolve(&self, raw: &str) -> PathBuf {
        let path = PathBuf::from(raw);
        if path.is_absolute() {
            path
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Load from the process environment and the working directory.
pub fn load_from_env() -> Result<(Config, ConfigSource), ConfigLoadError> {
    ConfigLoader::from_process_env()?.load()
}

pub fn describe(source: &ConfigSource) -> String {
    match source {
        ConfigSource::Default => "built-in defaults".to_string(),
        ConfigSource::EnvPath(path) => {
            format!("{} (from {})", path.display(), CONFIG_PATH_VAR)
        }
        ConfigSource::File(path) => path.display().to_string(),
    }
}

fn invalid_env(var: &'static str, value: &str, reason: String) -> ConfigLoadError {
    ConfigLoadError::InvalidEnv {
        var,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn empty_directory_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, source) = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(source, ConfigSource::Default);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn candidate_files_are_searched_in_order() {
        let dir = TempDir::new().unwrap();
        let nested = write(&dir, "config/marquee.toml", "[browse]\ndefault_page_size = 24\n");

        let (config, source) = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(source, ConfigSource::File(nested));
        assert_eq!(config.browse.default_page_size, 24);

        let top = write(&dir, "marquee.toml", "[browse]\ndefault_page_size = 6\n");
        let (config, source) = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(source, ConfigSource::File(top));
        assert_eq!(config.browse.default_page_size, 6);
    }

    #[test]
    fn explicit_path_wins_over_candidates() {
        let dir = TempDir::new().unwrap();
        write(&dir, "marquee.toml", "[browse]\nlocale = \"en\"\n");
        let custom = write(&dir, "custom.toml", "[browse]\nlocale = \"zh\"\n");

        let (config, source) = ConfigLoader::new(dir.path())
            .var(CONFIG_PATH_VAR, "custom.toml")
            .load()
            .unwrap();
        assert_eq!(source, ConfigSource::EnvPath(custom));
        assert_eq!(config.browse.locale, Locale::Zh);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new(dir.path())
            .var(CONFIG_PATH_VAR, "nope.toml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Read { .. }));
    }

    #[test]
    fn overrides_apply_on_top_of_the_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "marquee.toml", "[api]\nbase_url = \"http://catalog.local\"\n");

        let (config, _) = ConfigLoader::new(dir.path())
            .var(REALTIME_URL_VAR, "wss://relay.example/ws")
            .var(PAGE_SIZE_VAR, " 30 ")
            .var(LOCALE_VAR, "ZH")
            .var(REQUEST_TIMEOUT_VAR, "2s 500ms")
            .load()
            .unwrap();

        assert_eq!(config.api.base_url, "http://catalog.local");
        assert_eq!(config.realtime.url, "wss://relay.example/ws");
        assert_eq!(config.browse.default_page_size, 30);
        assert_eq!(config.browse.locale, Locale::Zh);
        assert_eq!(config.api.request_timeout, Duration::from_millis(2500));
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let dir = TempDir::new().unwrap();
        let (config, _) = ConfigLoader::new(dir.path())
            .var(API_URL_VAR, "   ")
            .load()
            .unwrap();
        assert_eq!(config.api, Config::default().api);
    }

    #[test]
    fn bad_overrides_name_the_variable() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new(dir.path())
            .var(PAGE_SIZE_VAR, "lots")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::InvalidEnv { var: PAGE_SIZE_VAR, .. }));

        let err = ConfigLoader::new(dir.path())
            .var(PAGE_SIZE_VAR, "500")
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::Invalid { field: "browse.default_page_size", .. }
        ));
    }
}
