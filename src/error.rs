use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-wide error type.
///
/// Guards and services raise these as typed signals; the conversion to an
/// HTTP response happens here and nowhere else. Internal details are logged
/// server-side and never echoed to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No API key in the `x-api-key` header or `apiKey` query parameter.
    #[error("Clé API manquante")]
    MissingApiKey,

    /// The presented API key is unknown, revoked or past its expiration.
    #[error("Clé API invalide ou expirée")]
    InvalidApiKey,

    /// No bearer token on an admin-only route.
    #[error("Authentification requise")]
    MissingToken,

    /// Bearer token failed signature or expiry verification.
    #[error("Jeton invalide ou expiré")]
    InvalidToken,

    /// Verified token without an `isAdmin: true` claim.
    #[error("Accès réservé aux administrateurs")]
    AdminOnly,

    #[error("Clé API introuvable")]
    KeyNotFound,

    #[error("Données invalides: {0}")]
    Validation(String),

    #[error("Erreur interne du serveur")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::MissingApiKey => (StatusCode::UNAUTHORIZED, "missing_api_key"),
            AppError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "invalid_api_key"),
            AppError::MissingToken => (StatusCode::UNAUTHORIZED, "authentication_required"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::AdminOnly => (StatusCode::UNAUTHORIZED, "admin_only"),
            AppError::KeyNotFound => (StatusCode::NOT_FOUND, "api_key_not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            AppError::Internal(source) => {
                tracing::error!("internal error: {:#}", source);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::MissingApiKey, StatusCode::UNAUTHORIZED),
            (AppError::InvalidApiKey, StatusCode::UNAUTHORIZED),
            (AppError::MissingToken, StatusCode::UNAUTHORIZED),
            (AppError::AdminOnly, StatusCode::UNAUTHORIZED),
            (AppError::KeyNotFound, StatusCode::NOT_FOUND),
            (
                AppError::Validation("le nom est requis".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Internal(anyhow::anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
