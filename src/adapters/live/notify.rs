//! Live notifier that writes to the tracing log.
//!
//! The crate has no UI of its own; hosts that do render toasts wrap
//! their surface in a [`Notifier`] and inject it instead.

use crate::ports::notify::{NoticeLevel, Notifier};

/// Notifier that emits tracing events.
pub struct LiveNotifier;

impl Notifier for LiveNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => tracing::info!(target: "tasklane::notify", "{message}"),
            NoticeLevel::Error => tracing::error!(target: "tasklane::notify", "{message}"),
        }
    }
}
