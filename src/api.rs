//! HTTP API endpoints.
//!
//! Player-facing reads are open; admin writes require the haunt's auth
//! code (or the master code) in the `X-Auth-Code` header.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::auth_code_from_headers;
use crate::state::export::StateExport;
use crate::state::{AdInput, AppState, QuestionInput, SidequestProgressInput};
use crate::types::*;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/haunt-config/{haunt_id}", get(get_haunt_config))
        .route("/api/haunt-config/{haunt_id}", put(put_haunt_config))
        .route("/api/trivia-questions/{haunt_id}", get(get_trivia_questions))
        .route("/api/trivia-questions/{haunt_id}", post(post_question))
        .route("/api/ads/{haunt_id}", get(get_ads))
        .route("/api/ads/{haunt_id}", post(post_ad))
        .route("/api/sidequests/{haunt_id}", get(get_sidequests))
        .route(
            "/api/sidequests/{haunt_id}/progress",
            post(post_sidequest_progress),
        )
        .route("/api/analytics/session", post(post_analytics_session))
        .route("/api/analytics/event", post(post_analytics_event))
        .route("/api/analytics/{haunt_id}/summary", get(get_analytics_summary))
        .route("/api/state/export", get(export_state))
        .route("/api/state/import", post(import_state))
        .with_state(state)
}

async fn require_auth(
    state: &AppState,
    haunt_id: &str,
    headers: &HeaderMap,
) -> Result<(), ApiError> {
    let code = auth_code_from_headers(headers).ok_or(ApiError::Unauthorized)?;
    if state.verify_auth_code(haunt_id, &code).await {
        Ok(())
    } else {
        tracing::warn!("Rejected auth code for haunt {}", haunt_id);
        Err(ApiError::Unauthorized)
    }
}

/// GET /api/haunt-config/{haunt_id}
pub async fn get_haunt_config(
    State(state): State<Arc<AppState>>,
    Path(haunt_id): Path<String>,
) -> Result<Json<HauntConfig>, ApiError> {
    state
        .get_active_haunt(&haunt_id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// PUT /api/haunt-config/{haunt_id} (admin)
pub async fn put_haunt_config(
    State(state): State<Arc<AppState>>,
    Path(haunt_id): Path<String>,
    headers: HeaderMap,
    Json(config): Json<HauntConfig>,
) -> Result<Json<HauntConfig>, ApiError> {
    if config.id != haunt_id {
        return Err(ApiError::BadRequest(
            "haunt id in path and body must match".to_string(),
        ));
    }

    // Creating a new haunt requires the master code; updates accept the
    // haunt's own code too.
    match state.get_haunt(&haunt_id).await {
        Some(_) => require_auth(&state, &haunt_id, &headers).await?,
        None => {
            let code = auth_code_from_headers(&headers).ok_or(ApiError::Unauthorized)?;
            if !state.admin.is_master(&code) {
                return Err(ApiError::Unauthorized);
            }
        }
    }

    let config = state.upsert_haunt(config).await?;
    Ok(Json(config))
}

/// GET /api/trivia-questions/{haunt_id}
pub async fn get_trivia_questions(
    State(state): State<Arc<AppState>>,
    Path(haunt_id): Path<String>,
) -> Result<Json<Vec<TriviaQuestion>>, ApiError> {
    state
        .question_pack(&haunt_id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /api/trivia-questions/{haunt_id} (admin, haunt-custom question)
pub async fn post_question(
    State(state): State<Arc<AppState>>,
    Path(haunt_id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<QuestionInput>,
) -> Result<Json<TriviaQuestion>, ApiError> {
    require_auth(&state, &haunt_id, &headers).await?;
    let question = state
        .add_custom_question(&haunt_id, input.into_question())
        .await?;
    Ok(Json(question))
}

/// GET /api/ads/{haunt_id}
pub async fn get_ads(
    State(state): State<Arc<AppState>>,
    Path(haunt_id): Path<String>,
) -> Result<Json<Vec<AdData>>, ApiError> {
    state.ads_for(&haunt_id).await.map(Json).ok_or(ApiError::NotFound)
}

/// POST /api/ads/{haunt_id} (admin)
pub async fn post_ad(
    State(state): State<Arc<AppState>>,
    Path(haunt_id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<AdInput>,
) -> Result<Json<AdData>, ApiError> {
    require_auth(&state, &haunt_id, &headers).await?;
    let ad = state.add_ad(&haunt_id, input.into_ad()).await?;
    Ok(Json(ad))
}

/// GET /api/sidequests/{haunt_id}
pub async fn get_sidequests(
    State(state): State<Arc<AppState>>,
    Path(haunt_id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    state
        .available_sidequests(&haunt_id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /api/sidequests/{haunt_id}/progress
pub async fn post_sidequest_progress(
    State(state): State<Arc<AppState>>,
    Path(haunt_id): Path<String>,
    Json(input): Json<SidequestProgressInput>,
) -> Result<Json<SidequestProgress>, ApiError> {
    state
        .record_sidequest_progress(&haunt_id, input)
        .await
        .map(Json)
        .map_err(ApiError::BadRequest)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    pub haunt_id: HauntId,
}

/// POST /api/analytics/session
pub async fn post_analytics_session(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SessionInput>,
) -> Result<Json<AnalyticsSession>, ApiError> {
    state
        .open_session(&input.haunt_id)
        .await
        .map(Json)
        .map_err(|_| ApiError::NotFound)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub session_id: SessionId,
    pub kind: EventKind,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub questions_answered: Option<u32>,
    #[serde(default)]
    pub correct_answers: Option<u32>,
}

/// POST /api/analytics/event
pub async fn post_analytics_event(
    State(state): State<Arc<AppState>>,
    Json(input): Json<EventInput>,
) -> Result<Json<AnalyticsEvent>, ApiError> {
    state
        .record_event(
            &input.session_id,
            input.kind,
            input.score,
            input.questions_answered,
            input.correct_answers,
        )
        .await
        .map(Json)
        .map_err(ApiError::BadRequest)
}

/// GET /api/analytics/{haunt_id}/summary
pub async fn get_analytics_summary(
    State(state): State<Arc<AppState>>,
    Path(haunt_id): Path<String>,
) -> Json<crate::state::AnalyticsSummary> {
    Json(state.analytics_summary(&haunt_id).await)
}

/// GET /api/state/export
pub async fn export_state(State(state): State<Arc<AppState>>) -> Json<StateExport> {
    Json(state.export_state().await)
}

/// POST /api/state/import
///
/// Replaces haunt data with the snapshot. Requires the master code when
/// one is configured.
pub async fn import_state(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(export): Json<StateExport>,
) -> Result<StatusCode, ApiError> {
    if state.admin.master_code.is_some() {
        let code = auth_code_from_headers(&headers).ok_or(ApiError::Unauthorized)?;
        if !state.admin.is_master(&code) {
            return Err(ApiError::Unauthorized);
        }
    }

    match state.import_state(export).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => {
            tracing::error!("State import failed: {}", e);
            Err(ApiError::Validation(e))
        }
    }
}
