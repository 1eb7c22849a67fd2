//! Core domain types for the recommendation datasets.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `MediaType` names the two catalogues and everything that differs between them
//! - `Record` is one recommendable item
//! - `Store` is the genre → records mapping persisted per media type

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

// =============================================================================
// Dataset bounds
// =============================================================================

/// First year covered by the synthetic datasets (inclusive)
pub const START_YEAR: u16 = 1930;

/// Last year covered by the synthetic datasets (inclusive)
pub const END_YEAR: u16 = 2025;

/// Records generated for every (year, month, genre) bucket
pub const SLOTS_PER_BUCKET: u8 = 5;

/// Months per year
pub const MONTHS: u8 = 12;

const MOVIE_GENRES: [&str; 5] = ["Action", "Comedy", "Drama", "Sci-Fi", "Thriller"];
const BOOK_GENRES: [&str; 5] = ["Fantasy", "Mystery", "Romance", "Self-Help", "Sci-Fi"];

// =============================================================================
// MediaType
// =============================================================================

/// The two kinds of things we recommend.
///
/// Everything that varies between movies and books (labels, file names,
/// genre enumeration, the unit of `meta.length`) hangs off this enum so the
/// generator and the query engine never branch on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    Book,
}

impl MediaType {
    /// Both media types, in display order
    pub const ALL: [MediaType; 2] = [MediaType::Movie, MediaType::Book];

    /// Singular label used in generated titles and ids ("Movie", "Book")
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Book => "Book",
        }
    }

    /// Store identifier ("movies", "books")
    pub fn store_name(self) -> &'static str {
        match self {
            MediaType::Movie => "movies",
            MediaType::Book => "books",
        }
    }

    /// File name the generator writes this store to
    pub fn file_name(self) -> &'static str {
        match self {
            MediaType::Movie => "synthetic_movies.json",
            MediaType::Book => "synthetic_books.json",
        }
    }

    /// Fixed genre enumeration, in generation order
    pub fn genres(self) -> &'static [&'static str] {
        match self {
            MediaType::Movie => &MOVIE_GENRES,
            MediaType::Book => &BOOK_GENRES,
        }
    }

    /// Inclusive bounds for `meta.length` (minutes for movies, pages for books)
    pub fn length_range(self) -> RangeInclusive<u32> {
        match self {
            MediaType::Movie => 85..=170,
            MediaType::Book => 180..=750,
        }
    }

    /// Unit printed next to `meta.length`
    pub fn length_unit(self) -> &'static str {
        match self {
            MediaType::Movie => "min",
            MediaType::Book => "pages",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_name())
    }
}

impl FromStr for MediaType {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaType::Movie),
            "book" | "books" => Ok(MediaType::Book),
            _ => Err(DataLoadError::InvalidValue {
                field: "media".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// One recommendable movie or book.
///
/// Field names match the persisted JSON layout exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub year: u16,
    /// 1..=12
    pub month: u8,
    pub genre: String,
    /// Decorative score in [5.5, 9.6], one decimal place
    pub rating: f64,
    pub meta: RecordMeta,
}

/// Identifying and descriptive metadata attached to a record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Composite id, unique within a (year, month, genre) bucket
    pub id: String,
    /// Minutes for movies, pages for books
    pub length: u32,
}

// =============================================================================
// Store
// =============================================================================

/// Mapping from genre name to the ordered records of that genre.
///
/// Serialized transparently, so a store file is just
/// `{ "Action": [ {...}, ... ], "Comedy": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    genres: BTreeMap<String, Vec<Record>>,
}

impl Store {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with an empty record list for each genre
    pub fn with_genres<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            genres: genres.into_iter().map(|g| (g.into(), Vec::new())).collect(),
        }
    }

    /// Appends a record to its genre's list (creating the list if needed)
    pub fn push(&mut self, record: Record) {
        self.genres
            .entry(record.genre.clone())
            .or_default()
            .push(record);
    }

    /// Replaces the whole record list of one genre
    pub fn insert_genre(&mut self, genre: impl Into<String>, records: Vec<Record>) {
        self.genres.insert(genre.into(), records);
    }

    /// Genre names present in this store (sorted)
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.keys().map(String::as_str)
    }

    pub fn contains_genre(&self, genre: &str) -> bool {
        self.genres.contains_key(genre)
    }

    /// All records of a genre, or `None` if the genre is not a key of this store
    pub fn records(&self, genre: &str) -> Option<&[Record]> {
        self.genres.get(genre).map(|v| v.as_slice())
    }

    /// Iterate over (genre, records) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.genres.iter().map(|(g, r)| (g.as_str(), r.as_slice()))
    }

    /// Total number of records across all genres
    pub fn len(&self) -> usize {
        self.genres.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the invariants every store file must satisfy:
    /// - the keys are exactly `media`'s genres, none missing and none foreign
    /// - each record sits under the key of its own genre
    /// - months are 1..=12 and years inside [START_YEAR, END_YEAR]
    /// - `meta.length` is inside the media type's range
    pub fn validate(&self, media: MediaType) -> Result<()> {
        let known = media.genres();
        if let Some(foreign) = self.genres().find(|g| !known.contains(g)) {
            return Err(DataLoadError::ValidationError(format!(
                "genre {foreign} does not belong in the {media} store"
            )));
        }
        if let Some(missing) = known.iter().find(|g| !self.contains_genre(g)) {
            return Err(DataLoadError::ValidationError(format!(
                "the {media} store has no {missing} genre"
            )));
        }

        let lengths = media.length_range();
        for (genre, records) in &self.genres {
            for record in records {
                if &record.genre != genre {
                    return Err(DataLoadError::ValidationError(format!(
                        "record {} has genre {} but is stored under {}",
                        record.meta.id, record.genre, genre
                    )));
                }
                if !(1..=MONTHS).contains(&record.month) {
                    return Err(DataLoadError::ValidationError(format!(
                        "record {} has month {}",
                        record.meta.id, record.month
                    )));
                }
                if !(START_YEAR..=END_YEAR).contains(&record.year) {
                    return Err(DataLoadError::ValidationError(format!(
                        "record {} has year {} outside {}-{}",
                        record.meta.id, record.year, START_YEAR, END_YEAR
                    )));
                }
                if !lengths.contains(&record.meta.length) {
                    return Err(DataLoadError::ValidationError(format!(
                        "record {} has {} length {}",
                        record.meta.id, media, record.meta.length
                    )));
                }
            }
        }
        Ok(())
    }
}
