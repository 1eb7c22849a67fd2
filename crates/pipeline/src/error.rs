//! Error types for recommendation queries.

use data_loader::{DataLoadError, MediaType};
use thiserror::Error;

/// Everything that can make a query fail.
///
/// An empty filter result is *not* an error: the engine relaxes the filters
/// and reports that through `Outcome::Relaxed` instead.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The requested genre is not a key of the store
    #[error("Invalid selection: no genre {genre:?} in the {media} store")]
    InvalidSelection { media: MediaType, genre: String },

    /// `lo > hi`
    #[error("Invalid year range: {lo}-{hi}")]
    InvalidYearRange { lo: u16, hi: u16 },

    /// Month filter outside 1..=12
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u8),

    /// The store itself could not be loaded
    #[error(transparent)]
    Store(#[from] DataLoadError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, QueryError>;
