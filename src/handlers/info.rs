use axum::Json;
use serde_json::{json, Value};

/// API descriptor: name, version, authentication methods, endpoint catalog
/// and error-code catalog. Static content, no authentication.
#[utoipa::path(
    get,
    path = "/",
    tag = "info",
    responses(
        (status = 200, description = "API descriptor")
    )
)]
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": "Courrier API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),

        "authentication": {
            "publicEndpoints": {
                "description": "API key authentication",
                "methods": [
                    "Header: x-api-key: <your-api-key>",
                    "Query parameter: ?apiKey=<your-api-key>",
                ],
            },
            "adminEndpoints": {
                "description": "JWT authentication (for administrators only)",
                "method": "Header: Authorization: Bearer <your-jwt-token>",
            },
        },

        "endpoints": {
            "base": [
                {
                    "path": "/",
                    "method": "GET",
                    "description": "API information",
                    "auth": "None",
                },
                {
                    "path": "/send",
                    "method": "POST",
                    "description": "Send a contact email",
                    "auth": "API key required",
                    "rateLimit": "10 requests per minute",
                    "body": {
                        "name": "string (required) - Sender's name",
                        "email": "string (required) - Sender's email",
                        "message": "string (required) - Message content",
                        "company": "string (optional) - Company name",
                    },
                    "responses": [
                        { "status": 200, "description": "Message sent successfully" },
                        { "status": 400, "description": "Invalid data" },
                        { "status": 401, "description": "Missing or invalid API key" },
                        { "status": 429, "description": "Too many requests" },
                        { "status": 500, "description": "Server error" },
                    ],
                },
            ],
            "apiKeys": [
                {
                    "path": "/api-keys",
                    "method": "POST",
                    "description": "Create a new API key",
                    "auth": "Admin JWT required",
                    "responses": [
                        { "status": 201, "description": "API key created, raw key displayed only at creation" },
                        { "status": 400, "description": "Invalid data" },
                        { "status": 401, "description": "Authentication required or not an administrator" },
                    ],
                },
                {
                    "path": "/api-keys",
                    "method": "GET",
                    "description": "List API keys (masked)",
                    "auth": "Admin JWT required",
                },
                {
                    "path": "/api-keys/:id",
                    "method": "DELETE",
                    "description": "Revoke an API key",
                    "auth": "Admin JWT required",
                    "responses": [
                        { "status": 200, "description": "API key revoked successfully" },
                        { "status": 404, "description": "API key not found" },
                    ],
                },
            ],
        },

        "errors": {
            "authentication": {
                "401": "Authentication required or invalid token",
                "403": "Permission denied",
            },
            "validation": {
                "400": "Invalid or missing data",
            },
            "notFound": {
                "404": "Resource not found",
            },
            "rateLimit": {
                "429": "Too many requests in a given time",
            },
            "server": {
                "500": "Internal server error",
            },
        },
    }))
}
