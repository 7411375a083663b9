use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use lettre::message::header::ContentType;
use lettre::message::SinglePart;
use lettre::Message;
use minijinja::{context, Environment};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::models::contact::ContactMessage;

pub mod transport;

pub use transport::{MailTransport, SmtpMailTransport};

const CONTACT_TEMPLATE: &str = "contact.html";
const CONTACT_SUBJECT: &str = "Nouveau message de contact";

/// What the transport reported back for a dispatched message.
#[derive(Debug, Clone)]
pub struct SentMessageInfo {
    pub message_id: String,
}

/// Renders contact submissions into emails and hands them to the transport.
#[derive(Clone)]
pub struct MailService {
    transport: Arc<dyn MailTransport>,
    mail_to: String,
    template_path: PathBuf,
}

impl MailService {
    pub fn new(settings: &Settings) -> Result<Self> {
        let transport = Arc::new(SmtpMailTransport::from_settings(settings)?);
        Ok(Self::with_transport(settings, transport))
    }

    pub fn with_transport(settings: &Settings, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            transport,
            mail_to: settings.mail_to.clone(),
            template_path: PathBuf::from(&settings.template_dir).join(CONTACT_TEMPLATE),
        }
    }

    /// Render the submission and dispatch it.
    ///
    /// Template failures degrade to an inline body and never block
    /// delivery; transport failures are logged and re-raised unchanged.
    /// The caller turns them into an error response, there is no retry.
    pub async fn send_contact_mail(&self, submission: &ContactMessage) -> Result<SentMessageInfo> {
        let html = self.render_body(submission);

        let message_id = format!("<{}@courrier>", Uuid::new_v4());

        let email = Message::builder()
            .from(
                submission
                    .email
                    .parse()
                    .context("Failed to parse sender address")?,
            )
            .to(self
                .mail_to
                .parse()
                .context("Failed to parse recipient address")?)
            .subject(CONTACT_SUBJECT)
            .message_id(Some(message_id.clone()))
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(html),
            )
            .context("Failed to build email message")?;

        match self.transport.send(&email).await {
            Ok(()) => {
                info!("Message envoyé: {}", message_id);
                Ok(SentMessageInfo { message_id })
            }
            Err(e) => {
                error!("Erreur lors de l'envoi du mail: {:#}", e);
                Err(e)
            }
        }
    }

    fn render_body(&self, submission: &ContactMessage) -> String {
        match self.render_template(submission) {
            Ok(html) => html,
            Err(e) => {
                error!("Erreur lors de la lecture du template: {:#}", e);
                warn!("Utilisation du template par défaut");
                format!(
                    "<h1>Message de {}</h1><p>{}</p>",
                    submission.name, submission.message
                )
            }
        }
    }

    /// The template is read from disk on every send so that a template
    /// deployed later is picked up without a restart.
    fn render_template(&self, submission: &ContactMessage) -> Result<String> {
        let source = std::fs::read_to_string(&self.template_path)
            .with_context(|| format!("Failed to read {}", self.template_path.display()))?;

        let mut env = Environment::new();
        env.add_template(CONTACT_TEMPLATE, &source)
            .context("Failed to compile contact template")?;

        let template = env.get_template(CONTACT_TEMPLATE)?;
        let html = template
            .render(context! {
                name => submission.name.as_str(),
                email => submission.email.as_str(),
                company => submission.company.as_deref(),
                message => submission.message.as_str(),
                title => format!("Message de contact de {}", submission.name),
                current_year => Utc::now().year(),
            })
            .context("Failed to render contact template")?;

        Ok(html)
    }
}
