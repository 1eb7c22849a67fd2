//! # Data Loader Crate
//!
//! This crate owns the record model and the synthetic movie/book datasets.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MediaType, Record, Store)
//! - **generator**: Enumerate year × month × genre × slot into a Store
//! - **persist**: Write/read store files (pretty JSON, atomic replace)
//! - **index**: `Catalog`, the lazily loaded in-memory view of both stores
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Catalog, MediaType, persist};
//! use std::path::Path;
//!
//! // Write synthetic_movies.json and synthetic_books.json
//! persist::write_dataset(Path::new("data"), Some(42))?;
//!
//! // Later, read them back on demand
//! let catalog = Catalog::new("data");
//! let movies = catalog.store(MediaType::Movie)?;
//! println!("{} action movies", movies.records("Action").unwrap().len());
//! ```

pub mod error;
pub mod types;
pub mod generator;
pub mod persist;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use generator::DatasetGenerator;
pub use index::Catalog;
pub use persist::{load_store, save_store, write_dataset};
pub use types::{
    // Bounds
    END_YEAR,
    MONTHS,
    SLOTS_PER_BUCKET,
    START_YEAR,
    // Core types
    MediaType,
    Record,
    RecordMeta,
    Store,
};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_store() {
        let store = Store::new();
        assert!(store.is_empty());
        assert_eq!(store.genres().count(), 0);
        assert!(store.records("Action").is_none());
    }

    #[test]
    fn test_write_dataset_and_reload() {
        let dir = tempdir().unwrap();
        let paths = write_dataset(dir.path(), Some(3)).unwrap();
        assert_eq!(paths.len(), 2);

        let catalog = Catalog::new(dir.path());
        catalog.load_all().unwrap();

        for media in MediaType::ALL {
            let store = catalog.store(media).unwrap();
            assert_eq!(store.len(), 96 * 12 * 5 * 5);
            let mut genres: Vec<&str> = store.genres().collect();
            let mut expected = media.genres().to_vec();
            genres.sort();
            expected.sort();
            assert_eq!(genres, expected);
        }
    }
}
