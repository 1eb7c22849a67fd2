//! Query description for the recommendation engine.

use crate::error::{QueryError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{MonthFilter, YearRangeFilter};
use data_loader::{END_YEAR, MONTHS, MediaType, START_YEAR};

/// Picks returned when the caller does not ask for a specific count
pub const DEFAULT_COUNT: usize = 5;

/// "Give me up to `count` records of `genre` from the `media` store,
/// released between `year_from` and `year_to`, optionally in `month`."
///
/// ## Usage
/// ```ignore
/// let query = RecommendationQuery::new(MediaType::Movie, "Action")
///     .years(1990, 2020)
///     .month(Some(6))
///     .count(5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationQuery {
    pub media: MediaType,
    pub genre: String,
    /// Inclusive lower bound
    pub year_from: u16,
    /// Inclusive upper bound
    pub year_to: u16,
    /// `None` means any month
    pub month: Option<u8>,
    pub count: usize,
}

impl RecommendationQuery {
    /// Query over the whole dataset range, any month, `DEFAULT_COUNT` picks
    pub fn new(media: MediaType, genre: impl Into<String>) -> Self {
        Self {
            media,
            genre: genre.into(),
            year_from: START_YEAR,
            year_to: END_YEAR,
            month: None,
            count: DEFAULT_COUNT,
        }
    }

    pub fn years(mut self, from: u16, to: u16) -> Self {
        self.year_from = from;
        self.year_to = to;
        self
    }

    pub fn month(mut self, month: Option<u8>) -> Self {
        self.month = month;
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Reject malformed queries before touching any store.
    ///
    /// Years outside the dataset range are allowed; they just match nothing.
    pub fn validate(&self) -> Result<()> {
        if self.year_from > self.year_to {
            return Err(QueryError::InvalidYearRange {
                lo: self.year_from,
                hi: self.year_to,
            });
        }
        if let Some(month) = self.month {
            if !(1..=MONTHS).contains(&month) {
                return Err(QueryError::InvalidMonth(month));
            }
        }
        Ok(())
    }

    /// The filters this query stands for
    pub fn filter_pipeline(&self) -> FilterPipeline {
        FilterPipeline::new()
            .add_filter(YearRangeFilter::new(self.year_from, self.year_to))
            .add_filter(MonthFilter::new(self.month))
    }
}
