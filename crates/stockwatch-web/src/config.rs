//! Command-line and environment configuration for the server.
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--api-key` | `ALPHA_VANTAGE_API_KEY` | required |
//! | `--base-url` | `ALPHA_VANTAGE_BASE_URL` | Alpha Vantage query endpoint |
//! | `--bind` | `STOCKWATCH_BIND` | `127.0.0.1:8000` |
//! | `--timeout-secs` | `STOCKWATCH_UPSTREAM_TIMEOUT_SECS` | `20` |
//! | `--output-size` | `STOCKWATCH_OUTPUT_SIZE` | `compact` |
//! | `--utc-offset-hours` | `STOCKWATCH_UTC_OFFSET_HOURS` | `0` |

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use stockwatch_core::upstream::DEFAULT_BASE_URL;
use stockwatch_core::{AlphaVantageConfig, OutputSize, SystemClock};
use time::UtcOffset;

use crate::error::ServerError;

/// StockWatch - daily quote lookups over Alpha Vantage
#[derive(Debug, Clone, Parser)]
#[command(name = "stockwatch", version, about = "Daily stock quote lookup service")]
pub struct ServerConfig {
    /// Alpha Vantage API key.
    #[arg(long, env = "ALPHA_VANTAGE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Upstream query endpoint.
    #[arg(long, env = "ALPHA_VANTAGE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Address the HTTP server listens on.
    #[arg(long, env = "STOCKWATCH_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Upstream request timeout in seconds.
    #[arg(
        long,
        env = "STOCKWATCH_UPSTREAM_TIMEOUT_SECS",
        default_value_t = 20,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// History requested per symbol: compact (100 days) or full.
    #[arg(long, env = "STOCKWATCH_OUTPUT_SIZE", default_value = "compact")]
    pub output_size: OutputSize,

    /// Offset from UTC used to decide when the cache day ends.
    #[arg(
        long,
        env = "STOCKWATCH_UTC_OFFSET_HOURS",
        default_value_t = 0,
        allow_hyphen_values = true
    )]
    pub utc_offset_hours: i8,
}

impl ServerConfig {
    pub fn alphavantage(&self) -> AlphaVantageConfig {
        AlphaVantageConfig::new(&self.api_key)
            .with_base_url(&self.base_url)
            .with_output_size(self.output_size)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn clock(&self) -> Result<SystemClock, ServerError> {
        let offset = UtcOffset::from_hms(self.utc_offset_hours, 0, 0).map_err(|_| {
            ServerError::InvalidUtcOffset {
                hours: self.utc_offset_hours,
            }
        })?;
        Ok(SystemClock::with_offset(offset))
    }
}
