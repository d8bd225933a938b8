macro_rules! api_path {
    ($path:literal) => {
        concat!("/api", $path)
    };
}

/// Catalog route definitions
pub mod media {
    pub const LIST: &str = api_path!("/media");
    pub const SEARCH: &str = api_path!("/media/search");
}

/// Realtime channel routes
pub mod realtime {
    pub const SOCKET: &str = "/ws";
}
