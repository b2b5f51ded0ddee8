use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::transport::Encryption;

/// SMTP username/password pair.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Mail server and sender configuration for the notifier.
///
/// No connection is opened when the config is built; the notifier connects
/// once per delivered entry.
#[derive(Debug, Clone, Deserialize)]
pub struct MailerConfig {
    /// Mail server hostname.
    pub host: String,
    /// Mail server port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sender address placed in the From header.
    pub sender: String,
    /// Optional credentials; when present, the notifier authenticates
    /// after connecting.
    #[serde(default)]
    pub credentials: Option<Credentials>,
    /// Connection encryption mode.
    #[serde(default)]
    pub encryption: Encryption,
}

fn default_port() -> u16 {
    587
}

impl MailerConfig {
    /// Build a config with the default port and STARTTLS, no credentials.
    pub fn new(host: impl Into<String>, port: u16, sender: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            sender: sender.into(),
            credentials: None,
            encryption: Encryption::default(),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_encryption(mut self, encryption: Encryption) -> Self {
        self.encryption = encryption;
        self
    }

    /// Load configuration from defaults, an optional `config/mailer` file,
    /// and `SMTP_*` environment variables (e.g. `SMTP_HOST`,
    /// `SMTP_CREDENTIALS__USERNAME`).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let builder = Config::builder()
            .set_default("port", 587)?
            .set_default("encryption", "tls")?
            .add_source(File::with_name("config/mailer").required(false))
            .add_source(
                Environment::with_prefix("SMTP")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_to_starttls_without_credentials() {
        let config = MailerConfig::new("smtp.example.com", 587, "alerts@example.com");
        assert_eq!(config.encryption, Encryption::Tls);
        assert!(config.credentials.is_none());
    }

    #[test]
    fn builder_attaches_credentials_and_encryption() {
        let config = MailerConfig::new("smtp.example.com", 465, "alerts@example.com")
            .with_credentials(Credentials::new("user", "secret"))
            .with_encryption(Encryption::Ssl);

        assert_eq!(config.encryption, Encryption::Ssl);
        let credentials = config.credentials.expect("credentials set");
        assert_eq!(credentials.username, "user");
        assert_eq!(credentials.password, "secret");
    }

    #[test]
    fn encryption_deserializes_from_lowercase_names() {
        let encryption: Encryption = serde_json::from_str("\"ssl\"").unwrap();
        assert_eq!(encryption, Encryption::Ssl);
        let encryption: Encryption = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(encryption, Encryption::None);
    }
}
