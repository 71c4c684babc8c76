//! HTTP routes delegating to the quote engine.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /status` | `{"app": "StockWatch"}` |
//! | `GET /lookup?symbol=&date=` | OHLCV for that date |
//! | `GET /min?symbol=&n=` | `{"min": v}` |
//! | `GET /max?symbol=&n=` | `{"max": v}` |

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use stockwatch_core::{DailyPrice, ExtremeValue, Extremum, QuoteEngine};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

pub const APP_NAME: &str = "StockWatch";

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QuoteEngine>,
}

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub symbol: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct WindowParams {
    pub symbol: String,
    /// Signed so that zero and negative windows reach range validation.
    pub n: i64,
}

pub fn router(engine: Arc<QuoteEngine>) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/lookup", get(lookup))
        .route("/min", get(min))
        .route("/max", get(max))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { engine })
}

async fn status() -> Json<Value> {
    Json(json!({ "app": APP_NAME }))
}

async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<DailyPrice>, ApiError> {
    let price = state.engine.lookup(&params.symbol, &params.date).await?;
    Ok(Json(price))
}

async fn min(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> Result<Json<ExtremeValue>, ApiError> {
    window(&state, params, Extremum::Min).await
}

async fn max(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> Result<Json<ExtremeValue>, ApiError> {
    window(&state, params, Extremum::Max).await
}

async fn window(
    state: &AppState,
    params: WindowParams,
    which: Extremum,
) -> Result<Json<ExtremeValue>, ApiError> {
    let value = state.engine.extreme(&params.symbol, params.n, which).await?;
    Ok(Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stockwatch_core::{DailyRecord, DailySeries, ManualClock, QuoteError, SeriesSource, Symbol};
    use time::macros::date;
    use tower::ServiceExt;

    struct FixtureSource {
        fetches: AtomicUsize,
    }

    impl SeriesSource for FixtureSource {
        fn fetch_daily<'a>(
            &'a self,
            symbol: &'a Symbol,
        ) -> Pin<Box<dyn Future<Output = Result<DailySeries, QuoteError>> + Send + 'a>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let result: Result<DailySeries, QuoteError> = match symbol.as_str() {
                "LIMIT" => Err(QuoteError::rate_limited()),
                "SLOW" => Err(QuoteError::upstream_timeout()),
                "DOWN" => Err(QuoteError::upstream_unreachable()),
                "NOPE" => Err(QuoteError::invalid_symbol()),
                _ => Ok([
                    ("2025-03-07", DailyRecord::new("150.00", "155.00", "145.00", "152.00", "1000000")),
                    ("2025-03-06", DailyRecord::new("148.00", "152.00", "144.00", "150.00", "950000")),
                    ("2025-03-05", DailyRecord::new("145.00", "149.00", "140.00", "146.00", "900000")),
                ]
                .into_iter()
                .map(|(date, record)| (date.to_owned(), record))
                .collect()),
            };
            Box::pin(async move { result })
        }
    }

    fn app() -> (Router, Arc<FixtureSource>) {
        let source = Arc::new(FixtureSource {
            fetches: AtomicUsize::new(0),
        });
        let engine = QuoteEngine::new(
            source.clone(),
            Arc::new(ManualClock::new(date!(2025 - 03 - 07))),
        );
        (router(Arc::new(engine)), source)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn status_reports_app_name() {
        let (app, _) = app();
        let (status, body) = get_json(app, "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "app": "StockWatch" }));
    }

    #[tokio::test]
    async fn lookup_returns_flat_record() {
        let (app, _) = app();
        let (status, body) = get_json(app, "/lookup?symbol=appl&date=2025-03-07").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "open": 150.0,
                "high": 155.0,
                "low": 145.0,
                "close": 152.0,
                "volume": 1000000
            })
        );
    }

    #[tokio::test]
    async fn lookup_of_missing_date_is_404_with_detail() {
        let (app, _) = app();
        let (status, body) = get_json(app, "/lookup?symbol=APPL&date=2025-03-01").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Data not available for the given date" }));
    }

    #[tokio::test]
    async fn min_and_max_use_their_own_keys() {
        let (app, source) = app();
        let (_, min) = get_json(app.clone(), "/min?symbol=APPL&n=2").await;
        let (_, max) = get_json(app, "/max?symbol=APPL&n=3").await;
        assert_eq!(min, json!({ "min": 144.0 }));
        assert_eq!(max, json!({ "max": 155.0 }));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn negative_and_oversized_windows_are_400() {
        let (app, _) = app();
        let (status, body) = get_json(app.clone(), "/max?symbol=APPL&n=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Range `n` must be greater than 0" }));

        let (status, body) = get_json(app, "/min?symbol=APPL&n=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Requested range `n` exceeds available data" }));
    }

    #[tokio::test]
    async fn upstream_failures_map_to_statuses() {
        let cases = [
            ("LIMIT", StatusCode::TOO_MANY_REQUESTS),
            ("SLOW", StatusCode::GATEWAY_TIMEOUT),
            ("DOWN", StatusCode::INTERNAL_SERVER_ERROR),
            ("NOPE", StatusCode::BAD_REQUEST),
        ];
        let (app, _) = app();

        for (symbol, expected) in cases {
            let uri = format!("/lookup?symbol={symbol}&date=2025-03-07");
            let (status, body) = get_json(app.clone(), &uri).await;
            assert_eq!(status, expected, "symbol {symbol}");
            assert!(body["detail"].is_string());
        }
    }

    #[tokio::test]
    async fn missing_or_non_numeric_parameters_are_rejected() {
        let (app, source) = app();

        let (status, _) = get_json(app.clone(), "/min?symbol=APPL").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(app.clone(), "/max?symbol=APPL&n=three").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(app, "/lookup?date=2025-03-07").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }
}
