//! Blocking SMTP implementation of the mail transport via `lettre`.
//!
//! Supports STARTTLS, implicit TLS, and plaintext connections. `lettre`
//! establishes the SMTP session when the message is submitted, so
//! [`SmtpConnection`] records the endpoint and credentials and builds the
//! transport at send time.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::{Encryption, MailConnection, MailTransport, OutboundEmail};
use crate::error::TransportError;
use crate::template::BodyFormat;

/// SMTP backend for the notifier.
#[derive(Debug, Default)]
pub struct SmtpMailer;

impl SmtpMailer {
    pub fn new() -> Self {
        Self
    }
}

impl MailTransport for SmtpMailer {
    type Connection = SmtpConnection;

    fn connect(
        &self,
        host: &str,
        port: u16,
        encryption: Encryption,
    ) -> Result<Self::Connection, TransportError> {
        // Validate that a transport can be built for this endpoint; relay
        // construction fails on unusable TLS parameters.
        build_transport(host, port, encryption, None)?;

        Ok(SmtpConnection {
            host: host.to_string(),
            port,
            encryption,
            credentials: None,
        })
    }
}

/// One SMTP session's parameters.
pub struct SmtpConnection {
    host: String,
    port: u16,
    encryption: Encryption,
    credentials: Option<Credentials>,
}

impl MailConnection for SmtpConnection {
    fn authenticate(&mut self, username: &str, password: &str) -> Result<(), TransportError> {
        self.credentials = Some(Credentials::new(username.to_string(), password.to_string()));
        Ok(())
    }

    fn send(&mut self, email: &OutboundEmail) -> Result<(), TransportError> {
        let message = build_message(email)?;
        let transport = build_transport(
            &self.host,
            self.port,
            self.encryption,
            self.credentials.clone(),
        )?;

        transport
            .send(&message)
            .map(|_| ())
            .map_err(|e| TransportError::Send(e.to_string()))
    }

    fn close(self) {
        // Transports are built per send and torn down on drop.
    }
}

fn build_transport(
    host: &str,
    port: u16,
    encryption: Encryption,
    credentials: Option<Credentials>,
) -> Result<SmtpTransport, TransportError> {
    let mut builder = match encryption {
        Encryption::Ssl => {
            SmtpTransport::relay(host).map_err(|e| TransportError::Connection(e.to_string()))?
        }
        Encryption::Tls => SmtpTransport::starttls_relay(host)
            .map_err(|e| TransportError::Connection(e.to_string()))?,
        Encryption::None => SmtpTransport::builder_dangerous(host),
    };
    builder = builder.port(port);

    if let Some(credentials) = credentials {
        builder = builder.credentials(credentials);
    }

    Ok(builder.build())
}

fn build_message(email: &OutboundEmail) -> Result<Message, TransportError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e: lettre::address::AddressError| TransportError::Send(e.to_string()))?;

    let mut builder = Message::builder().from(from).subject(email.subject.clone());
    for recipient in &email.to {
        let to: Mailbox = recipient
            .parse()
            .map_err(|e: lettre::address::AddressError| TransportError::Send(e.to_string()))?;
        builder = builder.to(to);
    }

    let content_type = match email.body_format {
        BodyFormat::Plain => ContentType::TEXT_PLAIN,
        BodyFormat::Html => ContentType::TEXT_HTML,
    };

    builder
        .header(content_type)
        .body(email.body.clone())
        .map_err(|e| TransportError::Send(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email() -> OutboundEmail {
        OutboundEmail {
            from: "alerts@example.com".to_string(),
            to: vec!["ops@example.com".to_string(), "oncall@example.com".to_string()],
            subject: "disk full".to_string(),
            body: "volume /data is at 100%".to_string(),
            body_format: BodyFormat::Plain,
        }
    }

    #[test]
    fn connect_succeeds_for_each_encryption_mode() {
        let mailer = SmtpMailer::new();
        assert!(mailer.connect("smtp.example.com", 587, Encryption::Tls).is_ok());
        assert!(mailer.connect("smtp.example.com", 465, Encryption::Ssl).is_ok());
        assert!(mailer.connect("localhost", 25, Encryption::None).is_ok());
    }

    #[test]
    fn builds_message_with_all_recipients() {
        let message = build_message(&sample_email()).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("ops@example.com"));
        assert!(rendered.contains("oncall@example.com"));
        assert!(rendered.contains("disk full"));
    }

    #[test]
    fn html_body_sets_html_content_type() {
        let mut email = sample_email();
        email.body_format = BodyFormat::Html;
        email.body = "<b>down</b>".to_string();

        let message = build_message(&email).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("text/html"));
    }

    #[test]
    fn invalid_sender_address_fails_message_build() {
        let mut email = sample_email();
        email.from = "not-an-address".to_string();

        let result = build_message(&email);
        assert!(matches!(result, Err(TransportError::Send(_))));
    }
}
