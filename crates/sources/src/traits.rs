//! The seam every data source plugs into.

use crate::error::Result;
use crate::types::{RemoteQuery, RemoteRecord};
use async_trait::async_trait;
use data_loader::MediaType;

/// A source of recommendations outside the generated stores.
///
/// Implementations make a single attempt per call: no retries, no backoff.
/// Failures are reported as `Err`, genuine zero matches as `Ok(vec![])`.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Short name for logs and for telling the user who answered
    fn name(&self) -> &str;

    /// Whether this source can answer queries for `media`
    fn supports(&self, _media: MediaType) -> bool {
        true
    }

    /// Fetch one page of results
    async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<RemoteRecord>>;
}

#[async_trait]
impl<S: RemoteSource + ?Sized> RemoteSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn supports(&self, media: MediaType) -> bool {
        (**self).supports(media)
    }

    async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<RemoteRecord>> {
        (**self).fetch(query).await
    }
}

/// Fetch pages `query.page ..= query.page + pages - 1` and concatenate them.
///
/// Stops at the first empty page; any failing page fails the whole call.
pub async fn fetch_pages<S: RemoteSource + ?Sized>(
    source: &S,
    query: &RemoteQuery,
    pages: u32,
) -> Result<Vec<RemoteRecord>> {
    let mut records = Vec::new();
    for offset in 0..pages.max(1) {
        let batch = source.fetch(&query.with_page(query.page + offset)).await?;
        if batch.is_empty() {
            break;
        }
        records.extend(batch);
    }
    Ok(records)
}
