//! Per-symbol, per-day in-memory series cache.

use std::collections::HashMap;
use std::sync::Arc;

use time::Date;
use tokio::sync::RwLock;

use crate::{DailySeries, Symbol};

#[derive(Debug)]
struct CacheInner {
    entries: HashMap<Symbol, Arc<DailySeries>>,
    refreshed_on: Date,
    hits: u64,
}

impl CacheInner {
    fn new(today: Date) -> Self {
        Self {
            entries: HashMap::new(),
            refreshed_on: today,
            hits: 0,
        }
    }

    /// Drops every entry when `today` differs from the refresh date.
    fn expire_if_stale(&mut self, today: Date) -> bool {
        if self.refreshed_on == today {
            return false;
        }

        let dropped = self.entries.len();
        self.entries.clear();
        self.hits = 0;
        let previous = std::mem::replace(&mut self.refreshed_on, today);
        tracing::info!(%previous, %today, dropped, "cache expired");
        true
    }
}

/// Cache state shared by every engine handle.
///
/// Freshness is global: the first access on a new calendar day wipes all
/// symbols, not only the one being queried.
#[derive(Debug, Clone)]
pub struct SeriesCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl SeriesCache {
    pub fn new(today: Date) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CacheInner::new(today))),
        }
    }

    /// Applies the daily expiry check, then returns the cached series for
    /// `symbol` if one exists, counting it as a hit.
    pub async fn checkout(&self, symbol: &Symbol, today: Date) -> Option<Arc<DailySeries>> {
        let mut store = self.inner.write().await;
        store.expire_if_stale(today);

        let series = store.entries.get(symbol).cloned()?;
        store.hits += 1;
        tracing::debug!(%symbol, hits = store.hits, "cache hit");
        Some(series)
    }

    /// Stores a freshly fetched series, replacing any previous entry.
    ///
    /// A series fetched on a day that has since been expired is not stored,
    /// and `false` is returned.
    pub async fn store(&self, symbol: Symbol, series: Arc<DailySeries>, fetched_on: Date) -> bool {
        let mut store = self.inner.write().await;
        if store.refreshed_on != fetched_on {
            tracing::debug!(%symbol, %fetched_on, "discarding series fetched before rollover");
            return false;
        }

        store.entries.insert(symbol, series);
        true
    }

    /// Runs the daily expiry check without looking anything up.
    pub async fn expire_if_stale(&self, today: Date) -> bool {
        self.inner.write().await.expire_if_stale(today)
    }

    pub async fn contains(&self, symbol: &Symbol) -> bool {
        self.inner.read().await.entries.contains_key(symbol)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn hits(&self) -> u64 {
        self.inner.read().await.hits
    }

    pub async fn refreshed_on(&self) -> Date {
        self.inner.read().await.refreshed_on
    }
}
