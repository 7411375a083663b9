use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::api_key::{ApiKeySummary, CreateApiKeyRequest};
use crate::AppState;

/// Issue a new API key. The raw key appears in this response and nowhere
/// else; every other read shows the masked summary.
#[utoipa::path(
    post,
    path = "/api-keys",
    tag = "api-keys",
    request_body = CreateApiKeyRequest,
    responses(
        (status = 201, description = "API key created", body = ApiKeySummary),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Authentication required or not an administrator")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateApiKeyRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (record, raw_key) = state.auth.create_api_key(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Clé API créée avec succès",
            "apiKey": raw_key,
            "key": ApiKeySummary::from(&record),
        })),
    ))
}

/// List all keys as masked summaries, in no guaranteed order.
#[utoipa::path(
    get,
    path = "/api-keys",
    tag = "api-keys",
    responses(
        (status = 200, description = "List of API keys", body = Vec<ApiKeySummary>),
        (status = 401, description = "Authentication required or not an administrator")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let keys = state.auth.list_api_keys().await?;
    let summaries: Vec<ApiKeySummary> = keys.iter().map(ApiKeySummary::from).collect();

    Ok(Json(json!({ "apiKeys": summaries })))
}

/// Revoke a key by id (soft: the record stays, the active flag flips).
#[utoipa::path(
    delete,
    path = "/api-keys/{id}",
    tag = "api-keys",
    params(
        ("id" = Uuid, Path, description = "API key id")
    ),
    responses(
        (status = 200, description = "API key revoked"),
        (status = 401, description = "Authentication required or not an administrator"),
        (status = 404, description = "API key not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
pub async fn revoke(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.auth.revoke_api_key(id).await?;

    Ok(Json(json!({ "message": "Clé API révoquée avec succès" })))
}
