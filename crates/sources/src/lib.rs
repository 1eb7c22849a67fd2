//! # Sources Crate
//!
//! Remote data sources that can stand in for the generated stores.
//!
//! ## Components
//!
//! ### TMDB (movies)
//! Discover movies by genre and release year, directly (API key passed
//! through) or via a proxy that holds the key.
//!
//! ### Google Books (books)
//! Search volumes by subject and keep those published in the requested year.
//!
//! ### Offline table
//! A built-in list of well-known titles per genre, used when nothing remote answers.
//!
//! ### Cascade and cache
//! `SourceCascade` tries strategies in order and stops at the first that has
//! results; `CachedSource` memoises answers per exact query for a bounded time.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::*;
//! use data_loader::MediaType;
//!
//! let config = RemoteConfig::default();
//! let proxy = Endpoint::Proxy { base_url: "https://proxy.example".into() };
//!
//! let cascade = SourceCascade::new()
//!     .add_source(CachedSource::new(TmdbSource::from_config(&config, proxy)?, config.result_ttl))
//!     .add_source(StaticCatalogSource::new());
//!
//! let outcome = cascade
//!     .fetch(&RemoteQuery::new(MediaType::Movie, "Action", 2014), 3)
//!     .await?;
//! ```

// Public modules
pub mod cache;
pub mod cascade;
pub mod config;
pub mod error;
pub mod google_books;
mod http;
pub mod offline;
pub mod tmdb;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use cache::{CachedSource, TtlCache};
pub use cascade::{CascadeOutcome, SkipReason, Skipped, SourceCascade};
pub use config::{Endpoint, RemoteConfig};
pub use error::SourceError;
pub use google_books::GoogleBooksSource;
pub use offline::StaticCatalogSource;
pub use tmdb::TmdbSource;
pub use traits::{RemoteSource, fetch_pages};
pub use types::{RemoteQuery, RemoteRecord};
