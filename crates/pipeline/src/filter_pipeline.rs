//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use data_loader::Record;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// A record survives the pipeline only if every filter matches it.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(YearRangeFilter::new(1990, 2020))
///     .add_filter(MonthFilter::new(Some(6)));
///
/// let matching = pipeline.apply(records.iter().collect());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the records.
    ///
    /// Stops early once nothing is left.
    pub fn apply<'a>(&self, records: Vec<&'a Record>) -> Vec<&'a Record> {
        let mut current = records;
        for filter in &self.filters {
            if current.is_empty() {
                break;
            }
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{MonthFilter, YearRangeFilter};
    use data_loader::RecordMeta;

    fn record(year: u16, month: u8) -> Record {
        Record {
            title: format!("Comedy Movie {year}-{month:02} #1"),
            year,
            month,
            genre: "Comedy".to_string(),
            rating: 7.0,
            meta: RecordMeta {
                id: format!("M-{year}{month:02}-CO-01"),
                length: 95,
            },
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let records = vec![record(2000, 1), record(2001, 2)];

        let filtered = pipeline.apply(records.iter().collect());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let pipeline = FilterPipeline::new()
            .add_filter(YearRangeFilter::new(2000, 2001))
            .add_filter(MonthFilter::new(Some(2)));

        let records = vec![record(2000, 1), record(2001, 2), record(2002, 2)];

        let filtered = pipeline.apply(records.iter().collect());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].year, 2001);
        assert_eq!(pipeline.len(), 2);
    }
}
