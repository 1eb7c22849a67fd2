//! Filter on release/publication year.

use crate::traits::Filter;
use data_loader::Record;

/// Keeps records with `lo <= year <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRangeFilter {
    lo: u16,
    hi: u16,
}

impl YearRangeFilter {
    /// Create a new YearRangeFilter.
    ///
    /// # Arguments
    /// * `lo` - First year to keep (inclusive)
    /// * `hi` - Last year to keep (inclusive); a range with `lo > hi` matches nothing
    pub fn new(lo: u16, hi: u16) -> Self {
        Self { lo, hi }
    }
}

impl Filter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn matches(&self, record: &Record) -> bool {
        self.lo <= record.year && record.year <= self.hi
    }
}
