//! Quote cache and query engine.
//!
//! The engine owns its cache, its upstream source and its clock. It is
//! constructed once and shared by handle; nothing here is global.
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`QuoteEngine::ensure_series`] | Cached or freshly fetched series |
//! | [`QuoteEngine::lookup`] | OHLCV for one date |
//! | [`QuoteEngine::extreme`] | Min low / max high over the latest `n` dates |

use std::sync::Arc;

use crate::cache::SeriesCache;
use crate::clock::{Clock, SystemClock};
use crate::upstream::{AlphaVantageConfig, AlphaVantageSource, SeriesSource};
use crate::{DailyPrice, DailySeries, ExtremeValue, Extremum, QuoteError, Symbol};

#[derive(Clone)]
pub struct QuoteEngine {
    source: Arc<dyn SeriesSource>,
    clock: Arc<dyn Clock>,
    cache: SeriesCache,
}

impl QuoteEngine {
    pub fn new(source: Arc<dyn SeriesSource>, clock: Arc<dyn Clock>) -> Self {
        let cache = SeriesCache::new(clock.today());
        Self {
            source,
            clock,
            cache,
        }
    }

    /// Engine backed by the live Alpha Vantage API and the UTC wall clock.
    pub fn alphavantage(config: AlphaVantageConfig) -> Self {
        Self::new(
            Arc::new(AlphaVantageSource::new(config)),
            Arc::new(SystemClock::utc()),
        )
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    /// Returns the daily series for `symbol`, fetching it on a cache miss.
    ///
    /// The daily expiry check runs first on every call, including calls whose
    /// symbol is then refused. Failed fetches leave nothing in the cache.
    pub async fn ensure_series(&self, symbol: &str) -> Result<Arc<DailySeries>, QuoteError> {
        let today = self.clock.today();
        self.cache.expire_if_stale(today).await;
        let symbol = Symbol::parse(symbol)?;

        if let Some(series) = self.cache.checkout(&symbol, today).await {
            return Ok(series);
        }

        let series = Arc::new(self.source.fetch_daily(&symbol).await?);
        let days = series.len();
        if self.cache.store(symbol.clone(), Arc::clone(&series), today).await {
            tracing::info!(%symbol, days, "cached daily series");
        }
        Ok(series)
    }

    /// Prices for `symbol` on `date` (`YYYY-MM-DD`, exact match).
    pub async fn lookup(&self, symbol: &str, date: &str) -> Result<DailyPrice, QuoteError> {
        let series = self.ensure_series(symbol).await?;
        let record = series.get(date).ok_or_else(QuoteError::not_found)?;
        DailyPrice::try_from(record)
    }

    /// Lowest low or highest high over the `n` most recent dates in the series.
    pub async fn extreme(
        &self,
        symbol: &str,
        n: i64,
        which: Extremum,
    ) -> Result<ExtremeValue, QuoteError> {
        if n <= 0 {
            return Err(QuoteError::range_not_positive());
        }

        let series = self.ensure_series(symbol).await?;
        let window = usize::try_from(n)
            .ok()
            .filter(|window| *window <= series.len())
            .ok_or_else(QuoteError::range_exceeds_history)?;

        let mut value: Option<f64> = None;
        for (_, record) in series.most_recent(window) {
            let candidate = which.read(record)?;
            value = Some(match value {
                Some(current) => which.combine(current, candidate),
                None => candidate,
            });
        }

        // window >= 1 and window <= len, so at least one record was read.
        let value = value.ok_or_else(QuoteError::range_exceeds_history)?;
        Ok(ExtremeValue { which, value })
    }
}
