use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::scope::ScopeDeterminationResponse,
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(determine_scope))
}

#[derive(Debug, Clone, Deserialize)]
struct ScopeDeterminationBody {
    query: Option<String>,
}

#[instrument(name = "POST /scope-determination", skip(app_state, payload))]
async fn determine_scope(
    State(app_state): State<AppState>,
    payload: Result<Json<ScopeDeterminationBody>, JsonRejection>,
) -> Result<Json<ScopeDeterminationResponse>, ApiError> {
    let Ok(Json(body)) = payload else {
        return Err(ApiError::bad_request(
            "Query parameter is required and must be a string",
        ));
    };

    let Some(query) = body.query else {
        return Err(ApiError::bad_request(
            "Query parameter is required and must be a string",
        ));
    };

    let service = app_state
        .scope_service()
        .ok_or_else(|| ApiError::internal("Gemini API key is missing"))?;

    let response = service.determine(&query).await?;

    Ok(Json(response))
}
