//! Filter implementations for the query pipeline.
//!
//! This module contains the concrete filters that can be composed
//! into a FilterPipeline.

pub mod month;
pub mod year_range;

// Re-export for convenience
pub use month::MonthFilter;
pub use year_range::YearRangeFilter;
