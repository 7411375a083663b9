mod common;

use std::sync::Arc;

use common::{test_settings, StubMailTransport};
use courrier::mail::MailService;
use courrier::models::contact::ContactMessage;

fn submission() -> ContactMessage {
    ContactMessage {
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        company: None,
        message: "Hello".to_string(),
    }
}

#[tokio::test]
async fn test_missing_template_falls_back_to_inline_body() {
    let mut settings = test_settings();
    settings.template_dir = "no-such-directory".to_string();

    let transport = StubMailTransport::new();
    let service = MailService::with_transport(&settings, Arc::new(transport.clone()));

    // template failure alone must never block delivery
    let info = service.send_contact_mail(&submission()).await.unwrap();
    assert!(!info.message_id.is_empty());

    let sent = transport.sent_messages();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains("Message de John Doe"));
    assert!(sent[0].contains("Hello"));
}

#[tokio::test]
async fn test_envelope_headers() {
    let mut settings = test_settings();
    settings.template_dir = "no-such-directory".to_string();

    let transport = StubMailTransport::new();
    let service = MailService::with_transport(&settings, Arc::new(transport.clone()));

    service.send_contact_mail(&submission()).await.unwrap();

    let sent = transport.sent_messages();
    // from is the (unverified) submitter, to is the configured recipient
    assert!(sent[0].contains("From: john@example.com"));
    assert!(sent[0].contains("To: contact@example.com"));
    assert!(sent[0].contains("Subject: Nouveau message de contact"));
}

#[tokio::test]
async fn test_shipped_template_renders() {
    // the real template under templates/
    let settings = test_settings();

    let transport = StubMailTransport::new();
    let service = MailService::with_transport(&settings, Arc::new(transport.clone()));

    let info = service.send_contact_mail(&submission()).await.unwrap();

    assert!(info.message_id.starts_with('<'));
    assert!(info.message_id.contains("@courrier>"));
    assert_eq!(transport.sent_messages().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let settings = test_settings();

    let transport = StubMailTransport::failing();
    let service = MailService::with_transport(&settings, Arc::new(transport.clone()));

    let result = service.send_contact_mail(&submission()).await;

    assert!(result.is_err());
    assert!(transport.sent_messages().is_empty());
}

#[tokio::test]
async fn test_message_ids_differ_between_sends() {
    let settings = test_settings();

    let transport = StubMailTransport::new();
    let service = MailService::with_transport(&settings, Arc::new(transport.clone()));

    let first = service.send_contact_mail(&submission()).await.unwrap();
    let second = service.send_contact_mail(&submission()).await.unwrap();

    assert_ne!(first.message_id, second.message_id);
}
