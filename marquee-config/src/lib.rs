//! Configuration for the Marquee catalog client: the file model, duration
//! parsing and the environment-aware loader.

#![allow(missing_docs)]

pub mod duration;
pub mod loader;
pub mod models;

pub use loader::{ConfigLoadError, ConfigLoader, load_from_env};
pub use models::{
    ApiConfig, BrowseConfig, Config, ConfigSource, NotificationConfig, RealtimeConfig,
};
