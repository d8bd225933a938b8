//! # Marquee Core
//!
//! Headless client for a bilingual movie and TV catalog: the state, query,
//! fetch and realtime-notification layers a catalog front end sits on.
//!
//! ## Overview
//!
//! - **URL state**: the query string is the single source of truth for
//!   every browsing filter ([`url_state`])
//! - **Media store**: the page currently on screen ([`store`])
//! - **Orchestrator**: turns URL changes into catalog requests and writes
//!   the results into the store ([`orchestrator`])
//! - **Views**: filter bar, paginator, search box and grid controllers
//!   ([`views`])
//! - **Realtime relay**: socket connection state machine, event fan-out
//!   and transient notifications ([`realtime`])
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use marquee_core::api::{CatalogApi, InMemoryCatalog};
//! use marquee_core::orchestrator::Orchestrator;
//! use marquee_core::store::CatalogStore;
//! use marquee_core::url_state::UrlState;
//! use marquee_core::views::FilterBar;
//! use marquee_model::{SortField, SortOrder};
//!
//! async fn browse() {
//!     let (url_state, _history) = UrlState::in_memory("/en/media");
//!     let api: Arc<dyn CatalogApi> = Arc::new(InMemoryCatalog::sample());
//!     let orchestrator =
//!         Orchestrator::new(url_state.clone(), CatalogStore::shared(), api);
//!
//!     orchestrator.mount(None).await;
//!     FilterBar::new(url_state).set_sort(SortField::Year, SortOrder::Asc);
//!     orchestrator.process_pending().await;
//! }
//! ```

#![allow(missing_docs)]

/// Catalog backend clients
pub mod api;

/// Error types
pub mod error;

/// Per-locale string tables
pub mod i18n;

/// URL-driven fetch orchestration
pub mod orchestrator;

/// Typed requests derived from the URL
pub mod query;

/// Realtime notification relay
pub mod realtime;

/// Publish/subscribe primitives
pub mod signal;

/// Displayed result page
pub mod store;

/// Query-string state store
pub mod url_state;

/// Presentation controllers
pub mod views;

pub use error::{CatalogError, CatalogResult, RelayError, RelayResult};
