//! Registry mapping error types to ordered notification templates.

mod types;

pub use types::{Ancestors, ErrorType, Notifiable};

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::template::{BodyFormat, TemplateEntry};

/// Maps error types to ordered lists of [`TemplateEntry`] values, with
/// ancestor fallback on lookup.
///
/// Registration takes `&mut self`, so concurrent mutation requires external
/// synchronization; shared lookups are fine while no registration is in
/// flight.
#[derive(Debug, Default)]
pub struct ErrorRegistry {
    table: HashMap<ErrorType, Vec<TemplateEntry>>,
}

impl ErrorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a new template entry and append it to `error_type`'s list.
    ///
    /// Repeated registrations for the same type accumulate; their order is
    /// the order notifications will later be sent.
    ///
    /// # Errors
    ///
    /// Propagates [`ValidationError`] from [`TemplateEntry::new`].
    pub fn register(
        &mut self,
        error_type: ErrorType,
        recipients: Vec<String>,
        subject: &str,
        body: &str,
        body_format: BodyFormat,
    ) -> Result<(), ValidationError> {
        let entry = TemplateEntry::new(recipients, subject, body, body_format)?;
        self.table.entry(error_type).or_default().push(entry);
        Ok(())
    }

    /// All entries matching `error_type`, walking toward the root type.
    ///
    /// The first ancestor (nearest first, starting with the type itself)
    /// holding a non-empty list wins; lists are never merged across
    /// ancestors. Returns an empty slice when nothing up to and including
    /// the root is registered.
    pub fn entries(&self, error_type: ErrorType) -> &[TemplateEntry] {
        for ancestor in error_type.ancestors() {
            if let Some(entries) = self.table.get(&ancestor) {
                if !entries.is_empty() {
                    return entries;
                }
            }
        }
        &[]
    }

    /// Number of types with at least one registered entry.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
