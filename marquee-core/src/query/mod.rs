//! Typed views over the URL state and the requests derived from them.

pub mod filter;
pub mod request;

pub use filter::{FilterParams, RECOGNIZED_KEYS};
pub use request::{
    DEFAULT_PAGE_SIZE, ListRequest, ListRequestBuilder, MAX_PAGE_SIZE,
    MAX_QUERY_CHARS, QueryStyle,
};
