use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A contact-form submission. Transient: it exists only for the duration of
/// one request and is never persisted.
///
/// Required fields default to empty strings on deserialization so that both
/// absent and empty values surface as a single 400 from the validator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactMessage {
    #[validate(length(min = 1, message = "le nom est requis"))]
    #[serde(default)]
    pub name: String,
    #[validate(email(message = "l'adresse email est invalide"))]
    #[serde(default)]
    pub email: String,
    pub company: Option<String>,
    #[validate(length(min = 1, message = "le message est requis"))]
    #[serde(default)]
    pub message: String,
}
