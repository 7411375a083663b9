use utoipa::OpenApi;

use crate::handlers::{api_keys, info, mail};
use crate::models::api_key::{ApiKeySummary, CreateApiKeyRequest};
use crate::models::contact::ContactMessage;

/// Generate the OpenAPI documentation for the entire API
#[derive(OpenApi)]
#[openapi(
    paths(
        info::api_info,
        mail::send,
        api_keys::create,
        api_keys::list,
        api_keys::revoke,
    ),
    components(
        schemas(
            ContactMessage,
            CreateApiKeyRequest,
            ApiKeySummary,
        )
    ),
    tags(
        (name = "info", description = "API descriptor"),
        (name = "mail", description = "Contact-form mail dispatch"),
        (name = "api-keys", description = "API key management (administrators)"),
    )
)]
pub struct ApiDoc;
