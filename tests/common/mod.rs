#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use lettre::Message;
use secrecy::Secret;
use serde_json::Value;
use uuid::Uuid;

use courrier::config::{AppEnv, Settings};
use courrier::mail::MailTransport;
use courrier::models::api_key::{ApiKey, NewApiKey};
use courrier::repository::memory::InMemoryApiKeyRepository;
use courrier::repository::ApiKeyRepository;
use courrier::{create_app, AppState};

pub const TEST_JWT_SECRET: &str = "test-secret";

pub fn test_settings() -> Settings {
    Settings {
        app_env: AppEnv::Test,
        port: 3000,
        database_url: "postgres://localhost/courrier_test".to_string(),
        jwt_secret: Secret::new(TEST_JWT_SECRET.to_string()),
        smtp_host: "localhost".to_string(),
        smtp_port: 1025,
        smtp_secure: false,
        smtp_user: String::new(),
        smtp_pass: Secret::new(String::new()),
        mail_to: "contact@example.com".to_string(),
        template_dir: "templates".to_string(),
    }
}

/// Records every formatted message instead of talking to a relay.
/// With `fail` set, rejects every send the way a broken relay would.
#[derive(Clone, Default)]
pub struct StubMailTransport {
    pub fail: bool,
    pub sent: Arc<Mutex<Vec<String>>>,
}

impl StubMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for StubMailTransport {
    async fn send(&self, message: &Message) -> Result<()> {
        if self.fail {
            bail!("connection refused");
        }
        let formatted = String::from_utf8_lossy(&message.formatted()).into_owned();
        self.sent.lock().unwrap().push(formatted);
        Ok(())
    }
}

/// Repository wrapper counting calls, to assert that guards short-circuit
/// before the validation path runs.
#[derive(Clone)]
pub struct CountingRepository {
    inner: InMemoryApiKeyRepository,
    pub validate_calls: Arc<AtomicUsize>,
    pub set_active_calls: Arc<AtomicUsize>,
}

impl CountingRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryApiKeyRepository::new(),
            validate_calls: Arc::new(AtomicUsize::new(0)),
            set_active_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn validate_call_count(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn set_active_call_count(&self) -> usize {
        self.set_active_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiKeyRepository for CountingRepository {
    async fn insert(&self, new_key: NewApiKey) -> Result<ApiKey> {
        self.inner.insert(new_key).await
    }

    async fn find_active_by_key(&self, key: &str) -> Result<Option<ApiKey>> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_active_by_key(key).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ApiKey>> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self) -> Result<Vec<ApiKey>> {
        self.inner.list().await
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<()> {
        self.set_active_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.set_active(id, active).await
    }
}

pub fn test_state(
    repository: Arc<dyn ApiKeyRepository>,
    transport: Arc<dyn MailTransport>,
) -> AppState {
    AppState::with_transport(test_settings(), repository, transport)
        .expect("failed to build test state")
}

pub async fn test_app(state: AppState) -> Router {
    create_app(state).await
}

/// Mint a token signed with the test secret. `claims` must carry its own
/// `exp`; use `admin_token`/`token_with_claims` for the common cases.
pub fn sign_token(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign test token")
}

pub fn future_exp() -> i64 {
    (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp()
}

pub fn admin_token() -> String {
    sign_token(&serde_json::json!({ "isAdmin": true, "userId": "123", "exp": future_exp() }))
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}
