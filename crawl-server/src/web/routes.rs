//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::planner::{CrawlError, Planner};

use super::dto::*;
use super::state::AppState;

/// Body returned for missing request fields.
const MISSING_PARAMETERS: &str = "Paramètres manquants";

/// Body returned for every server-side failure.
const GENERATION_FAILED: &str = "Erreur lors de la génération du parcours";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate-crawl", post(generate_crawl))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Generate a crawl between two addresses.
async fn generate_crawl(
    State(state): State<AppState>,
    payload: Result<Json<GenerateCrawlRequest>, JsonRejection>,
) -> Result<Json<CrawlResponse>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    let request = body.into_crawl_request()?;

    let planner = Planner::new(state.maps.as_ref(), &state.config);
    let trip = planner.plan(&request).await?;

    Ok(Json(CrawlResponse::from_trip(&trip)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<CrawlError> for AppError {
    fn from(e: CrawlError) -> Self {
        match e {
            CrawlError::MissingParameter(_) => AppError::BadRequest {
                message: MISSING_PARAMETERS.to_string(),
            },
            CrawlError::InvalidRequest(message) => AppError::BadRequest { message },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "bad request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                // The detail stays in the log
                error!(%message, "crawl generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERATION_FAILED.to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
