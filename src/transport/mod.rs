//! Mail transport capability consumed by the notifier.
//!
//! The notifier only depends on these traits; [`smtp::SmtpMailer`] is the
//! production implementation and tests substitute recording mocks.

pub mod smtp;

use serde::Deserialize;

use crate::error::TransportError;
use crate::template::BodyFormat;

/// Connection encryption mode for the mail server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encryption {
    /// Plaintext connection.
    None,
    /// STARTTLS upgrade after connecting.
    #[default]
    Tls,
    /// Implicit TLS from the first byte.
    Ssl,
}

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub body_format: BodyFormat,
}

/// Factory for mail connections.
pub trait MailTransport {
    type Connection: MailConnection;

    /// Open a connection to the mail server.
    fn connect(
        &self,
        host: &str,
        port: u16,
        encryption: Encryption,
    ) -> Result<Self::Connection, TransportError>;
}

/// One mail-server session. The notifier calls [`close`](Self::close) on
/// every exit path after a successful connect.
pub trait MailConnection {
    /// Authenticate the session. Only invoked when credentials are
    /// configured.
    fn authenticate(&mut self, username: &str, password: &str) -> Result<(), TransportError>;

    /// Submit one message.
    fn send(&mut self, email: &OutboundEmail) -> Result<(), TransportError>;

    /// Release the connection.
    fn close(self);
}
