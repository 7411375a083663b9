use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::config::Settings;

/// Dispatch seam for outbound mail. Implement this to provide alternative
/// backends (a stub in tests, an API-based relay, ...).
#[async_trait]
pub trait MailTransport: Send + Sync + 'static {
    async fn send(&self, message: &Message) -> Result<()>;
}

/// SMTP transport. The connection strategy is decided once at construction:
/// in the test environment it targets a local relay on port 1025 without
/// TLS, otherwise the configured host with STARTTLS (or wrapper TLS when
/// `SMTP_SECURE` is set) and credentials.
pub struct SmtpMailTransport {
    mailer: SmtpTransport,
}

impl SmtpMailTransport {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mailer = if settings.is_test() {
            warn!("mail transport in TEST MODE - connecting to localhost:1025 without TLS");
            SmtpTransport::builder_dangerous("localhost").port(1025).build()
        } else {
            let creds = Credentials::new(
                settings.smtp_user.clone(),
                settings.smtp_pass.expose_secret().clone(),
            );

            let tls_parameters = TlsParameters::builder(settings.smtp_host.clone())
                .build()
                .context("Failed to build TLS parameters")?;

            let tls = if settings.smtp_secure {
                Tls::Wrapper(tls_parameters)
            } else {
                Tls::Required(tls_parameters)
            };

            info!(
                "Configuring SMTP transport for {}:{}",
                settings.smtp_host, settings.smtp_port
            );

            SmtpTransport::relay(&settings.smtp_host)?
                .port(settings.smtp_port)
                .credentials(creds)
                .tls(tls)
                .build()
        };

        Ok(Self { mailer })
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &Message) -> Result<()> {
        self.mailer
            .send(message)
            .context("SMTP transport rejected the message")?;
        Ok(())
    }
}
