use anyhow::{bail, Result};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use jsonwebtoken::{decode, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::AppError;
use crate::AppState;

/// Claim set of an administrator token. Extra claims are carried through
/// unchanged; only `isAdmin` is interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    #[serde(rename = "isAdmin", default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    pub exp: usize,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The authenticated principal attached to admin requests: the verified
/// claim set, unchanged.
#[derive(Debug, Clone)]
pub struct AdminPrincipal(pub AdminClaims);

/// Verifies bearer tokens against the process-wide signing secret.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
}

impl JwtVerifier {
    /// Fails when no signing secret is configured. This is a startup error
    /// on purpose: a misconfigured deployment must never silently accept
    /// unverifiable tokens.
    pub fn new(settings: &Settings) -> Result<Self> {
        if settings.jwt_secret.expose_secret().is_empty() {
            bail!("JWT_SECRET n'est pas défini");
        }

        info!("JWT verifier initialized");
        Ok(Self {
            decoding_key: DecodingKey::from_secret(settings.jwt_secret_bytes()),
        })
    }

    /// Signature + expiry verification. The admin-claim check lives in the
    /// guard, not here.
    pub fn verify(&self, token: &str) -> Result<AdminClaims, AppError> {
        let token_data = decode::<AdminClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| {
                debug!("token verification failed: {:?}", e);
                AppError::InvalidToken
            })?;

        Ok(token_data.claims)
    }
}

/// Guard for administrator-only endpoints (key issuance, listing,
/// revocation). After signature verification, the claim set must contain
/// `isAdmin` explicitly set to `true`; absent, `false` and `null` all fail
/// the same way.
pub async fn admin_guard(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth = auth.ok_or(AppError::MissingToken)?;

    let claims = state.jwt.verify(auth.token())?;

    if claims.is_admin != Some(true) {
        debug!("token without admin claim rejected");
        return Err(AppError::AdminOnly);
    }

    request.extensions_mut().insert(AdminPrincipal(claims));

    Ok(next.run(request).await)
}
