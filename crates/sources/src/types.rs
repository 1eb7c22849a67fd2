//! Request/response types shared by every remote source.

use data_loader::MediaType;
use serde::{Deserialize, Serialize};

/// One remote lookup. Every field takes part in cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteQuery {
    pub media: MediaType,
    /// Genre name (movies) or subject keyword (books)
    pub subject: String,
    pub year: u16,
    /// 1-based
    pub page: u32,
}

impl RemoteQuery {
    pub fn new(media: MediaType, subject: impl Into<String>, year: u16) -> Self {
        Self {
            media,
            subject: subject.into(),
            year,
            page: 1,
        }
    }

    /// Same query, different page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// An external item projected onto the record model.
///
/// Remote payloads do not always carry a year or a score, so both are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub title: String,
    pub year: Option<u16>,
    pub rating: Option<f64>,
}

impl RemoteRecord {
    pub fn new(title: impl Into<String>, year: Option<u16>, rating: Option<f64>) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
        }
    }
}

/// Year from the leading four digits of a date-like string
///
/// Example: "2014-10-22" -> Some(2014)
///          "1997" -> Some(1997)
///          "circa 1900" -> None
pub fn leading_year(s: &str) -> Option<u16> {
    let prefix = s.get(..4)?;
    if prefix.bytes().all(|b| b.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}
