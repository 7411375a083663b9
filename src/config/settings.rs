use anyhow::{Context, Result};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use validator::Validate;

/// Runtime environment, selected with `APP_ENV`.
///
/// `Test` switches the mail transport to a local relay without TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

/// Process-wide configuration, read once at startup from the environment
/// (i.e. `SMTP_HOST=smtp.example.com`) and passed by reference into the
/// services that need it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[serde(default = "default_app_env")]
    pub app_env: AppEnv,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: Secret<String>,
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_secure: bool,
    pub smtp_user: String,
    pub smtp_pass: Secret<String>,
    /// Recipient of contact submissions.
    #[validate(email)]
    #[serde(default = "default_mail_to")]
    pub mail_to: String,
    #[serde(default = "default_template_dir")]
    pub template_dir: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings: Settings =
            envy::from_env().context("Failed to load settings from environment")?;

        settings
            .validate()
            .context("Invalid configuration values")?;

        Ok(settings)
    }

    pub fn is_test(&self) -> bool {
        self.app_env == AppEnv::Test
    }

    /// The JWT signing secret as raw bytes. Empty means misconfigured;
    /// `JwtVerifier::new` refuses to start in that case.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

fn default_app_env() -> AppEnv {
    AppEnv::Development
}

fn default_port() -> u16 {
    3000
}

fn default_smtp_port() -> u16 {
    587
}

fn default_mail_to() -> String {
    "contact@example.com".to_string()
}

fn default_template_dir() -> String {
    "templates".to_string()
}
