//! Time-bounded memoisation of remote lookups.
//!
//! Entries expire after a fixed TTL; nothing else invalidates them.

use crate::error::Result;
use crate::traits::RemoteSource;
use crate::types::{RemoteQuery, RemoteRecord};
use async_trait::async_trait;
use data_loader::MediaType;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

/// A map whose entries are only visible for `ttl` after insertion.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`, dropping it if it has expired
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some((inserted, value)) if inserted.elapsed() < self.ttl => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: K, value: V) {
        self.lock().insert(key, (Instant::now(), value));
    }

    /// Number of stored entries, expired ones included until they are touched or purged
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.lock().retain(|_, (inserted, _)| inserted.elapsed() < ttl);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, (Instant, V)>> {
        // a panic while holding the lock cannot leave the map half-updated
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Wraps a source and memoises its successful answers per full query.
///
/// Failures are not cached, so the next identical call hits the remote again.
pub struct CachedSource<S> {
    inner: S,
    cache: TtlCache<RemoteQuery, Vec<RemoteRecord>>,
}

impl<S: RemoteSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<S: RemoteSource> RemoteSource for CachedSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn supports(&self, media: MediaType) -> bool {
        self.inner.supports(media)
    }

    async fn fetch(&self, query: &RemoteQuery) -> Result<Vec<RemoteRecord>> {
        if let Some(hit) = self.cache.get(query) {
            debug!("{}: cache hit for {:?}", self.inner.name(), query);
            return Ok(hit);
        }
        let records = self.inner.fetch(query).await?;
        self.cache.insert(query.clone(), records.clone());
        Ok(records)
    }
}
