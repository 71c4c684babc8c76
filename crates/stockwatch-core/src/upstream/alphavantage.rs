use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::upstream::SeriesSource;
use crate::{DailyRecord, DailySeries, QuoteError, Symbol, ValidationError};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

const SERIES_FIELD: &str = "Time Series (Daily)";
const INFORMATION_FIELD: &str = "Information";

/// How much history a daily request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSize {
    /// Latest 100 trading days.
    #[default]
    Compact,
    /// Full 20+ year history.
    Full,
}

impl OutputSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

impl FromStr for OutputSize {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            _ => Err(ValidationError::InvalidOutputSize {
                value: value.to_owned(),
            }),
        }
    }
}

/// Connection settings for the Alpha Vantage daily endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaVantageConfig {
    pub api_key: String,
    pub base_url: String,
    pub output_size: OutputSize,
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: String::from(DEFAULT_BASE_URL),
            output_size: OutputSize::Compact,
            timeout: Duration::from_secs(20),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = output_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// `TIME_SERIES_DAILY` client.
#[derive(Clone)]
pub struct AlphaVantageSource {
    config: AlphaVantageConfig,
    http_client: Arc<dyn HttpClient>,
}

impl AlphaVantageSource {
    pub fn new(config: AlphaVantageConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: AlphaVantageConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn daily_request(&self, symbol: &Symbol) -> HttpRequest {
        HttpRequest::get(&self.config.base_url)
            .with_query("function", "TIME_SERIES_DAILY")
            .with_query("symbol", symbol.as_str())
            .with_query("apikey", &self.config.api_key)
            .with_query("outputsize", self.config.output_size.as_str())
            .with_query("datatype", "json")
            .with_timeout(self.config.timeout)
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<DailySeries, QuoteError> {
        tracing::debug!(%symbol, output_size = self.config.output_size.as_str(), "fetching daily series");

        let response = self
            .http_client
            .execute(self.daily_request(symbol))
            .await
            .map_err(|error| {
                tracing::warn!(%symbol, error = error.message(), "alphavantage transport error");
                if error.is_timeout() {
                    QuoteError::upstream_timeout()
                } else {
                    QuoteError::upstream_unreachable()
                }
            })?;

        if !response.is_success() {
            tracing::warn!(%symbol, status = response.status, "alphavantage returned error status");
            return Err(QuoteError::upstream_unreachable());
        }

        parse_daily_body(&response.body).inspect_err(|error| {
            tracing::warn!(%symbol, code = error.code(), "alphavantage rejected daily request");
        })
    }
}

impl SeriesSource for AlphaVantageSource {
    fn fetch_daily<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<DailySeries, QuoteError>> + Send + 'a>> {
        Box::pin(self.fetch(symbol))
    }
}

/// Classifies a `TIME_SERIES_DAILY` body, including the in-band error
/// signals Alpha Vantage returns with a 200 status.
fn parse_daily_body(body: &str) -> Result<DailySeries, QuoteError> {
    let mut payload: Value =
        serde_json::from_str(body).map_err(|_| QuoteError::upstream_unreachable())?;

    if payload
        .get(INFORMATION_FIELD)
        .and_then(Value::as_str)
        .is_some_and(is_daily_limit_notice)
    {
        return Err(QuoteError::rate_limited());
    }

    let series = payload
        .get_mut(SERIES_FIELD)
        .map(Value::take)
        .ok_or_else(QuoteError::invalid_symbol)?;
    let Value::Object(days) = series else {
        return Err(QuoteError::internal("malformed upstream series"));
    };

    // A damaged day is kept as an empty record and fails only when queried,
    // so the rest of the series is still cached.
    Ok(days
        .into_iter()
        .map(|(date, raw)| {
            let record = serde_json::from_value(raw).unwrap_or_else(|error| {
                tracing::warn!(%date, %error, "malformed daily record");
                DailyRecord::default()
            });
            (date, record)
        })
        .collect())
}

fn is_daily_limit_notice(text: &str) -> bool {
    let text = text.to_ascii_lowercase();
    text.contains("rate limit") && text.contains("per day")
}
