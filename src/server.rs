//! HTTP surface for the translation resolver.
//!
//! Routes:
//! - `GET /health` - liveness and the languages that have translations
//! - `GET /api/v1/languages` - language codes in the module index
//! - `GET /api/v1/translations?path=/fr/about` - the dictionary for a page path
//! - `GET /metrics` - resolver metrics (requires `X-API-Key` when configured)

use crate::error::{AssemblyError, TranslationError};
use crate::i18n::{LanguageCode, MetricsReport, TranslationDictionary, TranslationResolver};
use crate::response::ApiResponse;
use anyhow::{Context, Result};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Header carrying the key for protected endpoints
pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<TranslationResolver>,
    pub api_key: Option<String>,
}

impl AppState {
    pub fn new(resolver: Arc<TranslationResolver>, api_key: Option<String>) -> Self {
        Self { resolver, api_key }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranslationsQuery {
    /// Pathname of the page being rendered (e.g. `/fr/about`)
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub languages: Vec<LanguageCode>,
}

/// Constant-time string comparison to prevent timing attacks on the API key
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check the request's API key against the configured one.
///
/// Always passes when no key is configured.
fn is_authorized(expected: Option<&str>, headers: &HeaderMap) -> bool {
    let Some(expected) = expected else {
        return true;
    };

    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|provided| constant_time_compare(provided, expected))
        .unwrap_or(false)
}

fn error_status(error: &TranslationError) -> StatusCode {
    match error {
        TranslationError::LanguageDataMissing { .. } => StatusCode::NOT_FOUND,
        TranslationError::Assembly(AssemblyError::NotImplemented) => StatusCode::NOT_IMPLEMENTED,
        TranslationError::Assembly(_)
        | TranslationError::IndexNotInitialized
        | TranslationError::IndexAlreadyInitialized => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthStatus>>) {
    ApiResponse::ok(HealthStatus {
        status: "ok".to_string(),
        languages: state.resolver.index().languages().into_iter().cloned().collect(),
    })
}

async fn languages(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<LanguageCode>>>) {
    ApiResponse::ok(state.resolver.index().languages().into_iter().cloned().collect())
}

async fn translations(
    State(state): State<AppState>,
    query: Result<Query<TranslationsQuery>, QueryRejection>,
) -> (StatusCode, Json<ApiResponse<TranslationDictionary>>) {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return ApiResponse::error(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match state.resolver.get_translations(&query.path).await {
        Ok(dictionary) => ApiResponse::ok(dictionary),
        Err(e) => ApiResponse::error(error_status(&e), e.to_string()),
    }
}

async fn metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<ApiResponse<MetricsReport>>) {
    if !is_authorized(state.api_key.as_deref(), &headers) {
        warn!("Rejected metrics request with missing or invalid API key");
        return ApiResponse::error(StatusCode::UNAUTHORIZED, "invalid or missing API key");
    }

    ApiResponse::ok(state.resolver.metrics().report())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/languages", get(languages))
        .route("/api/v1/translations", get(translations))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `port` on all interfaces and serve until the process exits.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let address = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    info!("Listening on {}", address);

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}
