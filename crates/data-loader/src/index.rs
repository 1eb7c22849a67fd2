//! The `Catalog`: lazily loaded, process-lifetime cache of the store files.
//!
//! Stores are immutable once written, so each one is read (and validated)
//! at most once and then handed out by reference.

use crate::error::Result;
use crate::persist;
use crate::types::*;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// Read-only access to the movie and book stores in a data directory.
#[derive(Debug)]
pub struct Catalog {
    data_dir: PathBuf,
    movies: OnceLock<Store>,
    books: OnceLock<Store>,
}

impl Catalog {
    /// Creates a catalog over `data_dir`. Nothing is read until a store is requested.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            movies: OnceLock::new(),
            books: OnceLock::new(),
        }
    }

    /// Pre-seed a store instead of reading it from disk.
    ///
    /// Has no effect if that store was already loaded.
    pub fn with_store(self, media: MediaType, store: Store) -> Self {
        let _ = self.cell(media).set(store);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing `media`'s store
    pub fn store_path(&self, media: MediaType) -> PathBuf {
        self.data_dir.join(media.file_name())
    }

    /// Whether `media`'s store is already in memory
    pub fn is_loaded(&self, media: MediaType) -> bool {
        self.cell(media).get().is_some()
    }

    /// Get a store, loading and validating it on first access
    pub fn store(&self, media: MediaType) -> Result<&Store> {
        let cell = self.cell(media);
        if let Some(store) = cell.get() {
            return Ok(store);
        }

        let path = self.store_path(media);
        let store = persist::load_store(&path)?;
        store.validate(media)?;
        info!("Loaded {} store: {} records from {}", media, store.len(), path.display());

        // Another thread may have won the race; either copy is identical.
        Ok(cell.get_or_init(|| store))
    }

    /// Load both stores in parallel
    pub fn load_all(&self) -> Result<()> {
        let (movies, books) = rayon::join(
            || self.store(MediaType::Movie).map(|_| ()),
            || self.store(MediaType::Book).map(|_| ()),
        );
        movies?;
        books?;
        Ok(())
    }

    fn cell(&self, media: MediaType) -> &OnceLock<Store> {
        match media {
            MediaType::Movie => &self.movies,
            MediaType::Book => &self.books,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;
    use crate::generator::DatasetGenerator;
    use tempfile::tempdir;

    #[test]
    fn test_loads_lazily_and_caches() {
        let dir = tempdir().unwrap();
        let store = DatasetGenerator::new(MediaType::Book)
            .with_year_range(2001, 2001)
            .unwrap()
            .generate();
        let path = dir.path().join(MediaType::Book.file_name());
        persist::save_store(&store, &path).unwrap();

        let catalog = Catalog::new(dir.path());
        assert_eq!(catalog.data_dir(), dir.path());
        assert!(!catalog.is_loaded(MediaType::Book));

        assert_eq!(catalog.store(MediaType::Book).unwrap().len(), 300);
        assert!(catalog.is_loaded(MediaType::Book));

        // the file is no longer needed once cached
        std::fs::remove_file(&path).unwrap();
        assert_eq!(catalog.store(MediaType::Book).unwrap().len(), 300);
    }

    #[test]
    fn test_missing_store_file() {
        let dir = tempdir().unwrap();
        let catalog = Catalog::new(dir.path());
        assert!(matches!(
            catalog.store(MediaType::Movie),
            Err(DataLoadError::FileNotFound { .. })
        ));
        assert!(catalog.load_all().is_err());
    }

    #[test]
    fn test_rejects_invalid_store_file() {
        let dir = tempdir().unwrap();
        let mut store = Store::new();
        store.insert_genre(
            "Comedy",
            DatasetGenerator::new(MediaType::Movie)
                .with_year_range(2000, 2000)
                .unwrap()
                .genre_records("Action", &mut rand::rng()),
        );
        persist::save_store(&store, &dir.path().join(MediaType::Movie.file_name())).unwrap();

        let catalog = Catalog::new(dir.path());
        assert!(matches!(
            catalog.store(MediaType::Movie),
            Err(DataLoadError::ValidationError(_))
        ));
        assert!(!catalog.is_loaded(MediaType::Movie));
    }

    #[test]
    fn test_rejects_store_with_wrong_genre_keys() {
        let dir = tempdir().unwrap();
        let mut store = Store::new();
        store.insert_genre(
            "Action",
            DatasetGenerator::new(MediaType::Movie)
                .with_year_range(2000, 2000)
                .unwrap()
                .genre_records("Action", &mut rand::rng()),
        );
        store.insert_genre("Fantasy", Vec::new());
        persist::save_store(&store, &dir.path().join(MediaType::Movie.file_name())).unwrap();

        let catalog = Catalog::new(dir.path());
        assert!(matches!(
            catalog.store(MediaType::Movie),
            Err(DataLoadError::ValidationError(_))
        ));
        assert!(!catalog.is_loaded(MediaType::Movie));
    }

    #[test]
    fn test_with_store_skips_disk() {
        let mut store = Store::new();
        store.insert_genre("Action", Vec::new());

        let catalog = Catalog::new("/does/not/exist").with_store(MediaType::Movie, store);
        assert!(catalog.store(MediaType::Movie).unwrap().contains_genre("Action"));
        assert!(catalog.store(MediaType::Book).is_err());
    }
}
