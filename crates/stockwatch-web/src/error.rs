use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stockwatch_core::{QuoteError, QuoteErrorKind};
use thiserror::Error;

/// Startup and serving failures of the binary.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("utc offset of {hours} hours is out of range")]
    InvalidUtcOffset { hours: i8 },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Engine error rendered as `{"detail": "<message>"}`.
#[derive(Debug)]
pub struct ApiError(pub QuoteError);

impl From<QuoteError> for ApiError {
    fn from(error: QuoteError) -> Self {
        Self(error)
    }
}

pub const fn status_for(kind: QuoteErrorKind) -> StatusCode {
    match kind {
        QuoteErrorKind::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        QuoteErrorKind::UpstreamUnreachable => StatusCode::INTERNAL_SERVER_ERROR,
        QuoteErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        QuoteErrorKind::InvalidSymbol => StatusCode::BAD_REQUEST,
        QuoteErrorKind::NotFound => StatusCode::NOT_FOUND,
        QuoteErrorKind::InvalidRange => StatusCode::BAD_REQUEST,
        QuoteErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind());
        if status.is_server_error() {
            tracing::error!(code = self.0.code(), "{}", self.0.message());
        }
        (status, Json(json!({ "detail": self.0.message() }))).into_response()
    }
}
