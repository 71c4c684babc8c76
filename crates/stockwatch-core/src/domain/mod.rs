//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed, uppercase ticker used as the cache key |
//! | [`DailyRecord`] | One day of the upstream series in wire form |
//! | [`DailySeries`] | Date-keyed records for one symbol |
//! | [`DailyPrice`] | Typed OHLCV values returned by a lookup |
//! | [`Extremum`] | Min/max selector for rolling-window queries |
//! | [`ExtremeValue`] | Result of a rolling-window query |

mod series;
mod symbol;

pub use series::{DailyPrice, DailyRecord, DailySeries, ExtremeValue, Extremum};
pub use symbol::Symbol;
