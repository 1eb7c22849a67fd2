//! Optional month filter.

use crate::traits::Filter;
use data_loader::Record;

/// Keeps records of a specific month, or everything when no month is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthFilter {
    month: Option<u8>,
}

impl MonthFilter {
    pub fn new(month: Option<u8>) -> Self {
        Self { month }
    }

    /// A filter that lets every record through
    pub fn any() -> Self {
        Self { month: None }
    }
}

impl Filter for MonthFilter {
    fn name(&self) -> &str {
        "MonthFilter"
    }

    fn matches(&self, record: &Record) -> bool {
        match self.month {
            Some(month) => record.month == month,
            None => true,
        }
    }
}
