//! Error types for the quote engine.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Validation errors raised while parsing caller input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid output size '{value}', expected one of compact, full")]
    InvalidOutputSize { value: String },
}

/// Engine-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteErrorKind {
    UpstreamTimeout,
    UpstreamUnreachable,
    RateLimited,
    InvalidSymbol,
    NotFound,
    InvalidRange,
    Internal,
}

/// Structured error returned by every engine operation.
///
/// Carries a short human-readable message only; transport details stay
/// behind the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteError {
    kind: QuoteErrorKind,
    message: String,
}

impl QuoteError {
    pub fn new(kind: QuoteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn upstream_timeout() -> Self {
        Self::new(QuoteErrorKind::UpstreamTimeout, "AlphaVantage API timeout")
    }

    pub fn upstream_unreachable() -> Self {
        Self::new(
            QuoteErrorKind::UpstreamUnreachable,
            "Failed to fetch stock data",
        )
    }

    pub fn rate_limited() -> Self {
        Self::new(QuoteErrorKind::RateLimited, "API rate limit exceeded")
    }

    pub fn invalid_symbol() -> Self {
        Self::new(
            QuoteErrorKind::InvalidSymbol,
            "Invalid symbol or API limit exceeded",
        )
    }

    pub fn not_found() -> Self {
        Self::new(
            QuoteErrorKind::NotFound,
            "Data not available for the given date",
        )
    }

    pub fn range_not_positive() -> Self {
        Self::new(
            QuoteErrorKind::InvalidRange,
            "Range `n` must be greater than 0",
        )
    }

    pub fn range_exceeds_history() -> Self {
        Self::new(
            QuoteErrorKind::InvalidRange,
            "Requested range `n` exceeds available data",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(QuoteErrorKind::Internal, message)
    }

    pub const fn kind(&self) -> QuoteErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            QuoteErrorKind::UpstreamTimeout => "quote.upstream_timeout",
            QuoteErrorKind::UpstreamUnreachable => "quote.upstream_unreachable",
            QuoteErrorKind::RateLimited => "quote.rate_limited",
            QuoteErrorKind::InvalidSymbol => "quote.invalid_symbol",
            QuoteErrorKind::NotFound => "quote.not_found",
            QuoteErrorKind::InvalidRange => "quote.invalid_range",
            QuoteErrorKind::Internal => "quote.internal",
        }
    }
}

impl Display for QuoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for QuoteError {}

impl From<ValidationError> for QuoteError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::InvalidOutputSize { .. } => Self::internal(error.to_string()),
            _ => Self::new(QuoteErrorKind::InvalidSymbol, error.to_string()),
        }
    }
}
