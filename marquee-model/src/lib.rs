//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod error;
pub mod events;
pub mod filter_types;
pub mod locale;
#[cfg(feature = "serde")]
mod lenient;
pub mod media;
pub mod page;
#[cfg(feature = "serde")]
pub mod response;

pub use error::{ModelError, Result as ModelResult};
#[cfg(feature = "serde")]
pub use events::RelayEnvelope;
pub use events::{RelayEventKind, RelayPayload};
pub use filter_types::{SortField, SortOption, SortOrder};
pub use locale::{Locale, LocalizedText};
pub use media::{CastMember, MediaId, MediaItem, MediaStatus, MediaType};
pub use page::{MediaPage, PageInfo};
#[cfg(feature = "serde")]
pub use response::ListResponse;
