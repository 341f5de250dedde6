//! Replaying adapter for the `Notifier` port.

use std::sync::{Arc, Mutex};

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{NoticeLevel, Notifier};

/// Consumes recorded notifications from a cassette.
///
/// Notifications carry no output; consuming the interaction keeps the
/// replay stream aligned with the recording and makes an unexpected
/// extra notification fail loudly.
pub struct ReplayingNotifier {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingNotifier {
    /// Create a replaying notifier backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying notifier with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl Notifier for ReplayingNotifier {
    fn notify(&self, _level: NoticeLevel, _message: &str) {
        let _ = next_output(self.replayer.as_ref(), "notify", "notify");
    }
}
