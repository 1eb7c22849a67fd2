//! Synthetic dataset generation.
//!
//! Enumerates the cartesian space year × month × genre × slot and turns every
//! point into a `Record`. Titles and ids are pure functions of the point;
//! only `rating` and `meta.length` are random.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

/// Builds the full `Store` for one media type.
///
/// ## Usage
/// ```ignore
/// let store = DatasetGenerator::new(MediaType::Movie)
///     .with_seed(42)
///     .generate();
/// assert_eq!(store.len(), 28_800);
/// ```
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    media: MediaType,
    start_year: u16,
    end_year: u16,
    /// When set, every genre gets its own `StdRng` seeded from `seed + genre index`
    seed: Option<u64>,
}

impl DatasetGenerator {
    /// Generator covering the full [START_YEAR, END_YEAR] range with entropy-seeded randomness
    pub fn new(media: MediaType) -> Self {
        Self {
            media,
            start_year: START_YEAR,
            end_year: END_YEAR,
            seed: None,
        }
    }

    /// Restrict generation to a sub-range of [START_YEAR, END_YEAR]
    pub fn with_year_range(mut self, start_year: u16, end_year: u16) -> Result<Self> {
        if start_year > end_year || start_year < START_YEAR || end_year > END_YEAR {
            return Err(DataLoadError::InvalidValue {
                field: "year range".to_string(),
                value: format!("{start_year}-{end_year}"),
            });
        }
        self.start_year = start_year;
        self.end_year = end_year;
        Ok(self)
    }

    /// Make `rating` and `meta.length` reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn media(&self) -> MediaType {
        self.media
    }

    /// Number of records `generate` will produce:
    /// years × 12 × genres × 5
    pub fn expected_len(&self) -> usize {
        let years = (self.end_year - self.start_year + 1) as usize;
        years * MONTHS as usize * self.media.genres().len() * SLOTS_PER_BUCKET as usize
    }

    /// Generate the store. Genres are built in parallel.
    #[instrument(skip(self), fields(media = %self.media))]
    pub fn generate(&self) -> Store {
        let per_genre: Vec<(&str, Vec<Record>)> = self
            .media
            .genres()
            .par_iter()
            .enumerate()
            .map(|(idx, &genre)| {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(idx as u64)),
                    None => StdRng::from_os_rng(),
                };
                (genre, self.genre_records(genre, &mut rng))
            })
            .collect();

        let mut store = Store::new();
        for (genre, records) in per_genre {
            debug!("Generated {} records for {}", records.len(), genre);
            store.insert_genre(genre, records);
        }

        info!(
            "Generated {} {} records ({}-{})",
            store.len(),
            self.media,
            self.start_year,
            self.end_year
        );
        store
    }

    /// All records of one genre in generation order
    /// (year ascending, then month, then slot).
    pub fn genre_records<R: Rng + ?Sized>(&self, genre: &str, rng: &mut R) -> Vec<Record> {
        let per_genre = self.expected_len() / self.media.genres().len();
        let mut records = Vec::with_capacity(per_genre);
        for year in self.start_year..=self.end_year {
            for month in 1..=MONTHS {
                for slot in 1..=SLOTS_PER_BUCKET {
                    records.push(self.make_record(genre, year, month, slot, rng));
                }
            }
        }
        records
    }

    fn make_record<R: Rng + ?Sized>(
        &self,
        genre: &str,
        year: u16,
        month: u8,
        slot: u8,
        rng: &mut R,
    ) -> Record {
        Record {
            title: record_title(genre, self.media, year, month, slot),
            year,
            month,
            genre: genre.to_string(),
            rating: random_rating(rng),
            meta: RecordMeta {
                id: record_id(genre, self.media, year, month, slot),
                length: rng.random_range(self.media.length_range()),
            },
        }
    }
}

/// Deterministic title, e.g. "Action Movie 2020-03 #2"
pub fn record_title(genre: &str, media: MediaType, year: u16, month: u8, slot: u8) -> String {
    format!("{} {} {}-{:02} #{}", genre, media.label(), year, month, slot)
}

/// Deterministic composite id, e.g. "M-202003-AC-02"
///
/// media initial, year+month, first two genre letters (upper-cased), slot
pub fn record_id(genre: &str, media: MediaType, year: u16, month: u8, slot: u8) -> String {
    let initial: String = media.label().chars().take(1).collect::<String>().to_uppercase();
    let genre_code: String = genre.chars().take(2).collect::<String>().to_uppercase();
    format!("{}-{}{:02}-{}-{:02}", initial, year, month, genre_code, slot)
}

/// Uniform in [5.5, 9.6], rounded to one decimal place
fn random_rating<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw: f64 = rng.random_range(5.5..=9.6);
    (raw * 10.0).round() / 10.0
}
