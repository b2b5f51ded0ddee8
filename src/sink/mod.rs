//! Delivery-outcome reporting for the notifier.

/// Sink for notification delivery outcomes.
///
/// Injected into the notifier so hosts can route outcomes wherever they
/// like; the default [`TracingSink`] forwards to `tracing`.
pub trait ObservabilitySink: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink that forwards to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ObservabilitySink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!(target: "errmail", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "errmail", "{message}");
    }
}
