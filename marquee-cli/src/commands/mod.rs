pub mod browse;
pub mod config;
pub mod watch;

pub use browse::BrowseArgs;
pub use watch::WatchArgs;
