//! Notifier port for user-facing outcome messages.

use serde::{Deserialize, Serialize};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    /// The operation completed.
    Success,
    /// The operation failed and the user should retry or report.
    Error,
}

/// Delivers outcome messages to the user.
///
/// The editor never owns a message surface; whoever hosts it injects
/// one (a toast bar, a log sink in tests, a cassette recorder).
pub trait Notifier: Send + Sync {
    /// Emits a notification at the given level.
    fn notify(&self, level: NoticeLevel, message: &str);
}
