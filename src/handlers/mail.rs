use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;
use validator::Validate;

use crate::error::AppError;
use crate::models::contact::ContactMessage;
use crate::AppState;

/// Accept a contact submission and dispatch it as an email.
#[utoipa::path(
    post,
    path = "/send",
    tag = "mail",
    request_body = ContactMessage,
    responses(
        (status = 200, description = "Message sent successfully"),
        (status = 400, description = "Invalid submission"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 500, description = "Mail dispatch failed")
    ),
    security(
        ("apiKey" = [])
    )
)]
pub async fn send(
    State(state): State<AppState>,
    Json(submission): Json<ContactMessage>,
) -> Result<Json<Value>, AppError> {
    submission
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    debug!("contact submission from {}", submission.email);

    state.mail.send_contact_mail(&submission).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Email envoyé avec succès",
    })))
}
