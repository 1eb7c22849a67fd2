//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible predicates to be applied to a genre's record set.

use data_loader::Record;

/// Core trait for filtering records.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across threads
/// - Filters work on borrowed records; the store stays the single owner
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether a single record passes this filter
    fn matches(&self, record: &Record) -> bool;

    /// Apply this filter to a set of records, keeping their order.
    fn apply<'a>(&self, records: Vec<&'a Record>) -> Vec<&'a Record> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
