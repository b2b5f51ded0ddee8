//! Notification templates with safe placeholder substitution.

pub mod substitution;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use substitution::substitute;

/// Key/value map used to fill template placeholders at render time.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// MIME text subtype of a rendered body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    #[default]
    Plain,
    Html,
}

impl BodyFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyFormat::Plain => "plain",
            BodyFormat::Html => "html",
        }
    }
}

impl FromStr for BodyFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(BodyFormat::Plain),
            "html" => Ok(BodyFormat::Html),
            other => Err(ValidationError::UnknownBodyFormat(other.to_string())),
        }
    }
}

/// An immutable notification template: who to mail and what to say.
///
/// Subject and body may contain `$key` / `${key}` placeholders resolved
/// against a [`Context`] at render time. All fields are validated at
/// construction and never change afterwards.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    recipients: Vec<String>,
    subject: String,
    body: String,
    body_format: BodyFormat,
}

impl TemplateEntry {
    /// Validate and build a template entry.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the recipient list is empty or
    /// contains a blank address, or when subject or body is blank.
    pub fn new(
        recipients: Vec<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        body_format: BodyFormat,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::NoRecipients);
        }
        if recipients.iter().any(|r| r.trim().is_empty()) {
            return Err(ValidationError::BlankRecipient);
        }

        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(ValidationError::BlankSubject);
        }

        let body = body.into();
        if body.trim().is_empty() {
            return Err(ValidationError::BlankBody);
        }

        Ok(Self {
            recipients,
            subject,
            body,
            body_format,
        })
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn body_format(&self) -> BodyFormat {
        self.body_format
    }

    /// Render the subject and body against `context`.
    ///
    /// Substitution is safe/partial: placeholders without a matching key are
    /// left verbatim, so rendering never fails.
    pub fn render(&self, context: &Context) -> (String, String) {
        (
            substitute(&self.subject, context),
            substitute(&self.body, context),
        )
    }
}
