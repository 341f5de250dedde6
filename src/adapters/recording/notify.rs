//! Recording adapter for the `Notifier` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{NoticeLevel, Notifier};

/// Records notifications while delegating to an inner implementation.
pub struct RecordingNotifier {
    inner: Box<dyn Notifier>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingNotifier {
    /// Creates a new recording notifier wrapping the given implementation.
    pub fn new(inner: Box<dyn Notifier>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct NotifyInput<'a> {
    level: NoticeLevel,
    message: &'a str,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.inner.notify(level, message);
        let input = NotifyInput { level, message };
        record_interaction(&self.recorder, "notify", "notify", &input, &());
    }
}
