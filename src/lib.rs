use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod mail;
pub mod models;
pub mod openapi;
pub mod repository;
pub mod routes;

use auth::{AuthService, JwtVerifier};
use mail::{MailService, MailTransport};
use repository::ApiKeyRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: config::Settings,
    pub auth: AuthService,
    pub jwt: JwtVerifier,
    pub mail: MailService,
}

impl AppState {
    /// Wire the services for production: SMTP transport from settings.
    /// Fails fast on a missing JWT secret or unusable SMTP configuration.
    pub fn new(config: config::Settings, repository: Arc<dyn ApiKeyRepository>) -> Result<Self> {
        let transport = Arc::new(mail::SmtpMailTransport::from_settings(&config)?);
        Self::with_transport(config, repository, transport)
    }

    /// Same wiring with an injected transport (tests, alternative relays).
    pub fn with_transport(
        config: config::Settings,
        repository: Arc<dyn ApiKeyRepository>,
        transport: Arc<dyn MailTransport>,
    ) -> Result<Self> {
        let jwt = JwtVerifier::new(&config)?;
        let mail = MailService::with_transport(&config, transport);
        let auth = AuthService::new(repository);

        Ok(Self {
            config,
            auth,
            jwt,
            mail,
        })
    }
}

/// Create the main Axum application router
pub async fn create_app(state: AppState) -> Router {
    // Register API documentation
    let openapi = openapi::ApiDoc::openapi();

    Router::new()
        .merge(routes::info_router())
        .merge(routes::mail_router(state.clone()))
        .merge(routes::api_keys_router(state.clone()))
        // Serve Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state)
}
