//! Email notifications for application errors.
//!
//! Callers register notification templates per error type against a
//! registry; when an error occurs, [`ErrorNotifier::notify`] walks the
//! error's type hierarchy toward its root, renders every template
//! registered for the nearest matching type, and delivers each rendered
//! message over a mail transport.
//!
//! ```no_run
//! use errmail::{
//!     BodyFormat, ErrorNotifier, ErrorType, MailerConfig, Notifiable, SmtpMailer,
//! };
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("payment declined")]
//! struct PaymentError;
//!
//! impl Notifiable for PaymentError {
//!     fn error_type() -> ErrorType {
//!         ErrorType::root::<Self>("PaymentError")
//!     }
//! }
//!
//! let config = MailerConfig::new("smtp.example.com", 587, "alerts@example.com");
//! let mut notifier = ErrorNotifier::new(config, SmtpMailer::new());
//!
//! notifier
//!     .register_exception(
//!         ErrorType::of::<PaymentError>(),
//!         vec!["oncall@example.com".to_string()],
//!         "[$timestamp] $error_type",
//!         "The payment pipeline reported: $error_message",
//!         BodyFormat::Plain,
//!     )
//!     .expect("valid template");
//!
//! notifier.notify(&PaymentError);
//! ```

pub mod config;
pub mod error;
pub mod notifier;
pub mod registry;
pub mod sink;
pub mod template;
pub mod transport;

pub use config::{Credentials, MailerConfig};
pub use error::{TransportError, ValidationError};
pub use notifier::ErrorNotifier;
pub use registry::{Ancestors, ErrorRegistry, ErrorType, Notifiable};
pub use sink::{ObservabilitySink, TracingSink};
pub use template::{BodyFormat, Context, TemplateEntry};
pub use transport::smtp::SmtpMailer;
pub use transport::{Encryption, MailConnection, MailTransport, OutboundEmail};
