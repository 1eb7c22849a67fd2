//! # Recommendation Engine
//!
//! Answers a `RecommendationQuery` against the catalog:
//! 1. Look up the genre's records (unknown genre → `InvalidSelection`)
//! 2. Run the query's filter pipeline
//! 3. If nothing matched, fall back to the unfiltered genre pool
//! 4. Sample up to `count` records without replacement

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, instrument, warn};

use data_loader::{Catalog, MediaType, Record};

use crate::error::{QueryError, Result};
use crate::query::RecommendationQuery;
use crate::sampler::sample;

/// How the candidate pool was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Picks come from records matching every filter
    Matched,
    /// No record matched, so picks come from the whole genre
    Relaxed,
}

/// Result of a query
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    /// Picks in random order, no two with the same id
    pub records: Vec<Record>,
    pub outcome: Outcome,
    /// Size of the pool the picks were drawn from
    pub pool_size: usize,
}

impl Recommendations {
    pub fn is_relaxed(&self) -> bool {
        self.outcome == Outcome::Relaxed
    }
}

/// Query engine over a shared, read-only catalog.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Genre keys of a store
    pub fn genres(&self, media: MediaType) -> Result<Vec<String>> {
        let store = self.catalog.store(media)?;
        Ok(store.genres().map(str::to_string).collect())
    }

    /// Answer `query` with fresh randomness on every call
    pub fn recommend(&self, query: &RecommendationQuery) -> Result<Recommendations> {
        self.recommend_with_rng(query, &mut rand::rng())
    }

    /// Answer `query` drawing from `rng`; a seeded rng gives reproducible picks.
    #[instrument(skip(self, query, rng), fields(media = %query.media, genre = %query.genre))]
    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        query: &RecommendationQuery,
        rng: &mut R,
    ) -> Result<Recommendations> {
        query.validate()?;

        let store = self.catalog.store(query.media)?;
        let records = store
            .records(&query.genre)
            .ok_or_else(|| QueryError::InvalidSelection {
                media: query.media,
                genre: query.genre.clone(),
            })?;

        let matching = query.filter_pipeline().apply(records.iter().collect());
        let (pool, outcome) = if matching.is_empty() {
            warn!(
                "No {} in {} match {}-{} (month {:?}); using the whole genre",
                query.media, query.genre, query.year_from, query.year_to, query.month
            );
            (records.iter().collect::<Vec<_>>(), Outcome::Relaxed)
        } else {
            (matching, Outcome::Matched)
        };

        let picks: Vec<Record> = sample(&pool, query.count, rng)
            .into_iter()
            .cloned()
            .collect();
        debug!("Picked {} of {} candidates", picks.len(), pool.len());

        Ok(Recommendations {
            records: picks,
            outcome,
            pool_size: pool.len(),
        })
    }
}
