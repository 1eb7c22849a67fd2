//! Ordered fallback across data sources.
//!
//! Strategies are tried in the order they were added; the first one that
//! returns at least one record wins. Every strategy that was passed over is
//! reported back, so "the API had nothing" and "the API was down" stay
//! distinguishable for the caller.

use crate::error::Result;
use crate::traits::{RemoteSource, fetch_pages};
use crate::types::{RemoteQuery, RemoteRecord};
use tracing::{debug, info, warn};

/// Why a strategy did not serve the query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Answered, but with zero matches
    Empty,
    /// Could not answer; carries the error text
    Failed(String),
}

/// A strategy the cascade moved past
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub source: String,
    pub reason: SkipReason,
}

/// What the cascade produced
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeOutcome {
    pub records: Vec<RemoteRecord>,
    /// Name of the strategy that answered; `None` when every strategy came back empty
    pub served_by: Option<String>,
    pub skipped: Vec<Skipped>,
}

impl CascadeOutcome {
    /// Whether any remote strategy failed before this answer
    pub fn had_failures(&self) -> bool {
        self.skipped
            .iter()
            .any(|s| matches!(s.reason, SkipReason::Failed(_)))
    }
}

/// Chains data sources into an ordered fallback list.
///
/// ## Usage
/// ```ignore
/// let cascade = SourceCascade::new()
///     .add_source(CachedSource::new(tmdb_direct, ttl))
///     .add_source(CachedSource::new(tmdb_proxy, ttl))
///     .add_source(StaticCatalogSource::new());
///
/// let outcome = cascade.fetch(&query, 3).await?;
/// ```
#[derive(Default)]
pub struct SourceCascade {
    sources: Vec<Box<dyn RemoteSource>>,
}

impl SourceCascade {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a strategy at the end of the list (builder pattern).
    pub fn add_source(mut self, source: impl RemoteSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Names of the strategies, in order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Try each strategy that supports `query.media`, fetching `pages` pages from each.
    ///
    /// Returns the last error only when every strategy tried failed.
    pub async fn fetch(&self, query: &RemoteQuery, pages: u32) -> Result<CascadeOutcome> {
        let mut skipped = Vec::new();
        let mut last_error = None;

        for source in self.sources.iter().filter(|s| s.supports(query.media)) {
            debug!("Trying source {}", source.name());
            match fetch_pages(source.as_ref(), query, pages).await {
                Ok(records) if !records.is_empty() => {
                    info!("{} served {} records", source.name(), records.len());
                    return Ok(CascadeOutcome {
                        records,
                        served_by: Some(source.name().to_string()),
                        skipped,
                    });
                }
                Ok(_) => {
                    info!("{} had no results", source.name());
                    skipped.push(Skipped {
                        source: source.name().to_string(),
                        reason: SkipReason::Empty,
                    });
                }
                Err(e) => {
                    warn!("{} failed: {}", source.name(), e);
                    skipped.push(Skipped {
                        source: source.name().to_string(),
                        reason: SkipReason::Failed(e.to_string()),
                    });
                    last_error = Some(e);
                }
            }
        }

        let all_failed = skipped
            .iter()
            .all(|s| matches!(s.reason, SkipReason::Failed(_)));
        match last_error {
            Some(e) if all_failed => Err(e),
            _ => Ok(CascadeOutcome {
                records: Vec::new(),
                served_by: None,
                skipped,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::offline::StaticCatalogSource;
    use async_trait::async_trait;
    use data_loader::MediaType;

    enum Behaviour {
        Fail,
        Empty,
        Titles(&'static [&'static str]),
    }

    struct MockSource {
        name: &'static str,
        media: Option<MediaType>,
        behaviour: Behaviour,
    }

    fn mock(name: &'static str, behaviour: Behaviour) -> MockSource {
        MockSource {
            name,
            media: None,
            behaviour,
        }
    }

    #[async_trait]
    impl RemoteSource for MockSource {
        fn name(&self) -> &str {
            self.name
        }

        fn supports(&self, media: MediaType) -> bool {
            self.media.is_none_or(|m| m == media)
        }

        async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<RemoteRecord>> {
            match &self.behaviour {
                Behaviour::Fail => Err(SourceError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                }),
                Behaviour::Empty => Ok(Vec::new()),
                // a single page of results
                Behaviour::Titles(_) if query.page > 1 => Ok(Vec::new()),
                Behaviour::Titles(titles) => Ok(titles
                    .iter()
                    .map(|t| RemoteRecord::new(*t, Some(query.year), Some(7.0)))
                    .collect()),
            }
        }
    }

    fn query() -> RemoteQuery {
        RemoteQuery::new(MediaType::Movie, "Action", 2014)
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let cascade = SourceCascade::new()
            .add_source(mock("a", Behaviour::Titles(&["One", "Two"])))
            .add_source(mock("b", Behaviour::Titles(&["Three"])));

        let outcome = cascade.fetch(&query(), 3).await.unwrap();
        assert_eq!(outcome.served_by.as_deref(), Some("a"));
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_falls_through_failures_and_empties() {
        let cascade = SourceCascade::new()
            .add_source(mock("direct", Behaviour::Fail))
            .add_source(mock("proxy", Behaviour::Empty))
            .add_source(StaticCatalogSource::new());

        let outcome = cascade.fetch(&query(), 1).await.unwrap();
        assert_eq!(outcome.served_by.as_deref(), Some("offline"));
        assert!(outcome.had_failures());
        assert_eq!(outcome.skipped.len(), 2);
        assert!(matches!(outcome.skipped[0].reason, SkipReason::Failed(_)));
        assert_eq!(outcome.skipped[1].reason, SkipReason::Empty);
        let titles: Vec<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["John Wick", "Edge of Tomorrow"]);
    }

    #[tokio::test]
    async fn test_all_failures_surface_last_error() {
        let cascade = SourceCascade::new()
            .add_source(mock("a", Behaviour::Fail))
            .add_source(mock("b", Behaviour::Fail));

        assert!(matches!(
            cascade.fetch(&query(), 1).await,
            Err(SourceError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_all_empty_is_not_an_error() {
        let cascade = SourceCascade::new()
            .add_source(mock("a", Behaviour::Fail))
            .add_source(mock("b", Behaviour::Empty));

        let outcome = cascade.fetch(&query(), 1).await.unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.served_by, None);
        assert!(outcome.had_failures());
    }

    #[tokio::test]
    async fn test_unsupported_sources_are_not_tried() {
        let mut books_only = mock("books", Behaviour::Titles(&["Dune"]));
        books_only.media = Some(MediaType::Book);
        let cascade = SourceCascade::new()
            .add_source(books_only)
            .add_source(mock("movies", Behaviour::Titles(&["Speed"])));

        let outcome = cascade.fetch(&query(), 1).await.unwrap();
        assert_eq!(outcome.served_by.as_deref(), Some("movies"));
        assert!(outcome.skipped.is_empty());
        assert_eq!(cascade.source_names(), vec!["books", "movies"]);
    }
}
