use thiserror::Error;

/// Rejected inputs at template registration time.
///
/// Always surfaced to the caller of `register_exception`; never swallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("recipients must be a non-empty list of addresses")]
    NoRecipients,

    #[error("recipient addresses must not be blank")]
    BlankRecipient,

    #[error("subject must be a non-empty string")]
    BlankSubject,

    #[error("body must be a non-empty string")]
    BlankBody,

    #[error("unknown body format '{0}', expected 'plain' or 'html'")]
    UnknownBodyFormat(String),
}

/// Failures raised by the mail transport during delivery.
///
/// These are reported through the observability sink at single-entry
/// granularity and never propagate out of `notify`.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The connection could not be established or its parameters were
    /// rejected. Backends that open the session lazily (such as the SMTP
    /// backend, where `lettre` connects at submit time) surface an
    /// unreachable host as [`Send`](Self::Send) instead.
    #[error("failed to connect to mail server: {0}")]
    Connection(String),

    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("message delivery failed: {0}")]
    Send(String),
}
