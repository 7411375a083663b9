use std::collections::HashMap;

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;
use crate::AppState;

/// Context attached to requests that passed the API-key guard.
///
/// Only the key id is carried downstream; handlers that need more go back
/// to the repository.
#[derive(Debug, Clone)]
pub struct ApiKeyContext {
    pub api_key_id: Uuid,
}

/// API-key guard for protected, non-admin endpoints.
///
/// Candidate extraction precedence: `x-api-key` header first, `apiKey`
/// query parameter second. The header wins when both are present. With no
/// candidate at all the request is rejected before the validation service
/// is ever called. No caching: every request re-validates.
pub async fn api_key_guard(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let candidate = header_key.or_else(|| params.get("apiKey").cloned());

    let Some(candidate) = candidate else {
        debug!("request without API key rejected");
        return Err(AppError::MissingApiKey);
    };

    let api_key = state.auth.validate_api_key(&candidate).await?;

    request.extensions_mut().insert(ApiKeyContext {
        api_key_id: api_key.id,
    });

    Ok(next.run(request).await)
}
