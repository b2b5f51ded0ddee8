//! Dispatches registered email notifications when errors occur.

use std::backtrace::Backtrace;

use chrono::Local;
use serde_json::Value;

use crate::config::MailerConfig;
use crate::error::{TransportError, ValidationError};
use crate::registry::{ErrorRegistry, ErrorType, Notifiable};
use crate::sink::{ObservabilitySink, TracingSink};
use crate::template::{BodyFormat, Context, TemplateEntry};
use crate::transport::{MailConnection, MailTransport, OutboundEmail};

/// Format of the `timestamp` context key.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sends registered email notifications when errors occur.
///
/// Each `notify` call is a stateless transaction: build the rendering
/// context, look up matching templates, then render and deliver each one
/// over a fresh transport connection. Delivery failures are reported to the
/// observability sink and never abort the remaining entries.
pub struct ErrorNotifier<T: MailTransport> {
    config: MailerConfig,
    registry: ErrorRegistry,
    transport: T,
    sink: Box<dyn ObservabilitySink>,
}

impl<T: MailTransport> ErrorNotifier<T> {
    /// Create a notifier reporting outcomes through [`TracingSink`].
    pub fn new(config: MailerConfig, transport: T) -> Self {
        Self::with_sink(config, transport, Box::new(TracingSink))
    }

    /// Create a notifier with a custom observability sink.
    pub fn with_sink(
        config: MailerConfig,
        transport: T,
        sink: Box<dyn ObservabilitySink>,
    ) -> Self {
        Self {
            config,
            registry: ErrorRegistry::new(),
            transport,
            sink,
        }
    }

    /// Register a notification template for `error_type`.
    ///
    /// Repeated registrations accumulate and are delivered in registration
    /// order.
    ///
    /// # Errors
    ///
    /// Propagates [`ValidationError`] when the template inputs are invalid.
    pub fn register_exception(
        &mut self,
        error_type: ErrorType,
        recipients: Vec<String>,
        subject: &str,
        body: &str,
        body_format: BodyFormat,
    ) -> Result<(), ValidationError> {
        self.registry
            .register(error_type, recipients, subject, body, body_format)
    }

    /// Notify the recipients registered for `error`'s type (or its nearest
    /// registered ancestor). A no-op when nothing matches.
    pub fn notify<E: Notifiable>(&self, error: &E) {
        self.notify_with_context(error, Context::new());
    }

    /// Like [`notify`](Self::notify), with caller-supplied context merged
    /// over the defaults (caller keys win on collision).
    pub fn notify_with_context<E: Notifiable>(&self, error: &E, additional: Context) {
        let error_type = ErrorType::of::<E>();
        let entries = self.registry.entries(error_type);
        if entries.is_empty() {
            return;
        }

        let context = build_context(error_type, error, additional);

        for entry in entries {
            let recipients = entry.recipients().join(", ");
            match self.deliver(entry, &context) {
                Ok(()) => self
                    .sink
                    .info(&format!("notification sent to: {recipients}")),
                Err(e) => self
                    .sink
                    .error(&format!("failed to send notification to {recipients}: {e}")),
            }
        }
    }

    fn deliver(&self, entry: &TemplateEntry, context: &Context) -> Result<(), TransportError> {
        let (subject, body) = entry.render(context);
        let email = OutboundEmail {
            from: self.config.sender.clone(),
            to: entry.recipients().to_vec(),
            subject,
            body,
            body_format: entry.body_format(),
        };

        let mut connection =
            self.transport
                .connect(&self.config.host, self.config.port, self.config.encryption)?;
        let result = self.transmit(&mut connection, &email);
        // Release the connection on success and failure alike.
        connection.close();
        result
    }

    fn transmit(
        &self,
        connection: &mut T::Connection,
        email: &OutboundEmail,
    ) -> Result<(), TransportError> {
        if let Some(credentials) = &self.config.credentials {
            connection.authenticate(&credentials.username, &credentials.password)?;
        }
        connection.send(email)
    }
}

/// Default context keys merged with (and overridden by) caller-supplied ones.
fn build_context<E: Notifiable>(
    error_type: ErrorType,
    error: &E,
    additional: Context,
) -> Context {
    let mut context = Context::new();
    context.insert(
        "error_type".to_string(),
        Value::String(error_type.name().to_string()),
    );
    context.insert(
        "error_message".to_string(),
        Value::String(error.to_string()),
    );
    context.insert(
        "error_traceback".to_string(),
        Value::String(Backtrace::force_capture().to_string()),
    );
    context.insert(
        "timestamp".to_string(),
        Value::String(Local::now().format(TIMESTAMP_FORMAT).to_string()),
    );

    for (key, value) in additional {
        context.insert(key, value);
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("boom")]
    struct ParseError;

    impl Notifiable for ParseError {
        fn error_type() -> ErrorType {
            ErrorType::root::<Self>("ParseError")
        }
    }

    #[test]
    fn default_context_has_all_four_keys() {
        let context = build_context(ErrorType::of::<ParseError>(), &ParseError, Context::new());
        assert_eq!(context["error_type"], json!("ParseError"));
        assert_eq!(context["error_message"], json!("boom"));
        assert!(context.contains_key("error_traceback"));
        let timestamp = context["timestamp"].as_str().unwrap();
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(timestamp.len(), 19);
        assert_eq!(&timestamp[4..5], "-");
        assert_eq!(&timestamp[13..14], ":");
    }

    #[test]
    fn caller_context_overrides_defaults() {
        let mut additional = Context::new();
        additional.insert("error_message".to_string(), json!("redacted"));
        additional.insert("service".to_string(), json!("billing"));

        let context = build_context(ErrorType::of::<ParseError>(), &ParseError, additional);
        assert_eq!(context["error_message"], json!("redacted"));
        assert_eq!(context["service"], json!("billing"));
        assert_eq!(context["error_type"], json!("ParseError"));
    }
}
