use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::QuoteError;

/// One day of the upstream `"Time Series (Daily)"` payload, kept in its
/// string-encoded wire form until a query needs a number out of it.
///
/// Missing fields deserialize as empty strings, so a damaged day only fails
/// the queries that read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyRecord {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

impl DailyRecord {
    pub fn new(
        open: impl Into<String>,
        high: impl Into<String>,
        low: impl Into<String>,
        close: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        Self {
            open: open.into(),
            high: high.into(),
            low: low.into(),
            close: close.into(),
            volume: volume.into(),
        }
    }
}

/// Daily series for a single symbol keyed by `YYYY-MM-DD`.
///
/// Keys are fixed-width ISO dates, so the map's lexicographic order is also
/// chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailySeries(BTreeMap<String, DailyRecord>);

impl DailySeries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, date: &str) -> Option<&DailyRecord> {
        self.0.get(date)
    }

    /// The `n` most recent records, newest first.
    pub fn most_recent(&self, n: usize) -> impl Iterator<Item = (&str, &DailyRecord)> {
        self.0
            .iter()
            .rev()
            .take(n)
            .map(|(date, record)| (date.as_str(), record))
    }
}

impl FromIterator<(String, DailyRecord)> for DailySeries {
    fn from_iter<I: IntoIterator<Item = (String, DailyRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Typed daily prices returned by a point lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl TryFrom<&DailyRecord> for DailyPrice {
    type Error = QuoteError;

    fn try_from(record: &DailyRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            open: parse_price("open", &record.open)?,
            high: parse_price("high", &record.high)?,
            low: parse_price("low", &record.low)?,
            close: parse_price("close", &record.close)?,
            volume: record.volume.trim().parse().map_err(|_| {
                QuoteError::internal(format!("malformed upstream record: volume '{}'", record.volume))
            })?,
        })
    }
}

/// Which aggregate a rolling-window query computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extremum {
    /// Lowest `low` over the window.
    Min,
    /// Highest `high` over the window.
    Max,
}

impl Extremum {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Extracts the field this aggregate reads from a record.
    pub fn read(self, record: &DailyRecord) -> Result<f64, QuoteError> {
        match self {
            Self::Min => parse_price("low", &record.low),
            Self::Max => parse_price("high", &record.high),
        }
    }

    pub fn combine(self, current: f64, candidate: f64) -> f64 {
        match self {
            Self::Min => current.min(candidate),
            Self::Max => current.max(candidate),
        }
    }
}

/// Result of a rolling-window query, serialized as `{"min": v}` or `{"max": v}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremeValue {
    pub which: Extremum,
    pub value: f64,
}

impl Serialize for ExtremeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.which.as_str(), &self.value)?;
        map.end()
    }
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64, QuoteError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| QuoteError::internal(format!("malformed upstream record: {field} '{raw}'")))
}
