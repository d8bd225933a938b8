use thiserror::Error;

/// Failures talking to the catalog backend.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Catalog responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Search requires a non-empty query")]
    EmptySearch,

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the realtime notification channel.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid relay URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Relay URL must use ws:// or wss://, got {0}://")]
    UnsupportedScheme(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Connection attempt timed out after {0:?}")]
    ConnectTimeout(std::time::Duration),

    #[error("Gave up reconnecting after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

impl From<tokio_tungstenite::tungstenite::Error> for RelayError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        RelayError::Transport(err.to_string())
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
pub type RelayResult<T> = std::result::Result<T, RelayError>;
