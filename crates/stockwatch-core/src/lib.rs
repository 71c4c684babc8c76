//! # StockWatch Core
//!
//! Daily quote cache and query engine behind the StockWatch HTTP service.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Per-symbol series cache with a global daily refresh |
//! | [`clock`] | Injectable source of "today" |
//! | [`domain`] | Symbol, daily records and query results |
//! | [`engine`] | Lookup and rolling min/max queries |
//! | [`error`] | Error kinds surfaced to callers |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`upstream`] | Alpha Vantage daily series adapter |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockwatch_core::{AlphaVantageConfig, Extremum, QuoteEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = QuoteEngine::alphavantage(AlphaVantageConfig::new("demo"));
//!
//!     let day = engine.lookup("IBM", "2025-03-07").await?;
//!     let low = engine.extreme("IBM", 5, Extremum::Min).await?;
//!     println!("close {:.2}, 5-day low {:.2}", day.close, low.value);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use stockwatch_core::{QuoteError, QuoteErrorKind};
//!
//! fn describe(error: &QuoteError) -> &'static str {
//!     match error.kind() {
//!         QuoteErrorKind::RateLimited => "try again tomorrow",
//!         QuoteErrorKind::NotFound => "no trading on that date",
//!         QuoteErrorKind::InvalidRange => "window out of range",
//!         _ => "upstream problem",
//!     }
//! }
//! ```

pub mod cache;
pub mod clock;
pub mod domain;
pub mod engine;
pub mod error;
pub mod http_client;
pub mod upstream;

pub use cache::SeriesCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::{DailyPrice, DailyRecord, DailySeries, ExtremeValue, Extremum, Symbol};
pub use engine::QuoteEngine;
pub use error::{QuoteError, QuoteErrorKind, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use upstream::{AlphaVantageConfig, AlphaVantageSource, OutputSize, SeriesSource};
