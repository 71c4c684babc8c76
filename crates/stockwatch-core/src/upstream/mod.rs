//! Upstream providers of daily price series.

mod alphavantage;

use std::future::Future;
use std::pin::Pin;

use crate::{DailySeries, QuoteError, Symbol};

pub use alphavantage::{AlphaVantageConfig, AlphaVantageSource, OutputSize, DEFAULT_BASE_URL};

/// Source of daily series consumed by the quote engine.
///
/// Implementations surface every failure as a [`QuoteError`]; the engine
/// neither retries nor caches them.
pub trait SeriesSource: Send + Sync {
    fn fetch_daily<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<DailySeries, QuoteError>> + Send + 'a>>;
}
