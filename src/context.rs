//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::categories::LiveCategoryDirectory;
use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::notify::LiveNotifier;
use crate::adapters::live::tasks::LiveTaskGateway;
use crate::adapters::live::ApiConfig;
use crate::adapters::recording::categories::RecordingCategoryDirectory;
use crate::adapters::recording::clock::RecordingClock;
use crate::adapters::recording::notify::RecordingNotifier;
use crate::adapters::recording::tasks::RecordingTaskGateway;
use crate::adapters::replaying::{
    ReplayingCategoryDirectory, ReplayingClock, ReplayingNotifier, ReplayingTaskGateway,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::categories::CategoryDirectory;
use crate::ports::clock::Clock;
use crate::ports::notify::Notifier;
use crate::ports::tasks::TaskGateway;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Category directory for loading project catalogs.
    pub categories: Box<dyn CategoryDirectory>,
    /// Task gateway for creating and updating tasks.
    pub tasks: Box<dyn TaskGateway>,
    /// Notifier for user-facing outcome messages.
    pub notifier: Box<dyn Notifier>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live(config: ApiConfig) -> Self {
        Self {
            clock: Box::new(LiveClock),
            categories: Box::new(LiveCategoryDirectory::new(config.clone())),
            tasks: Box::new(LiveTaskGateway::new(config)),
            notifier: Box::new(LiveNotifier),
        }
    }

    /// Creates a recording context layered over live adapters.
    ///
    /// Every interaction is captured into the session's per-port
    /// recorders; the caller finishes the session to write the
    /// cassette files.
    #[must_use]
    pub fn recording(config: ApiConfig, session: &RecordingSession) -> Self {
        Self::recording_over(Self::live(config), session)
    }

    /// Creates a recording context layered over the given adapters.
    ///
    /// Same wiring as [`ServiceContext::recording`] but with injected
    /// inner implementations, so cassettes can be captured from any
    /// adapter set, not just the live one.
    #[must_use]
    pub fn recording_over(inner: Self, session: &RecordingSession) -> Self {
        Self {
            clock: Box::new(RecordingClock::new(inner.clock, Arc::clone(&session.clock))),
            categories: Box::new(RecordingCategoryDirectory::new(
                inner.categories,
                Arc::clone(&session.categories),
            )),
            tasks: Box::new(RecordingTaskGateway::new(
                inner.tasks,
                Arc::clone(&session.tasks),
            )),
            notifier: Box::new(RecordingNotifier::new(
                inner.notifier,
                Arc::clone(&session.notify),
            )),
        }
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// All ports are served by a single cassette — each port/method pair
    /// is dispatched to the right interaction stream automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

        // Each port gets its own replayer from the same cassette so that
        // per-port cursors are independent.
        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            categories: Box::new(ReplayingCategoryDirectory::new(shared(&cassette))),
            tasks: Box::new(ReplayingTaskGateway::new(shared(&cassette))),
            notifier: Box::new(ReplayingNotifier::new(shared(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Each port can have its own cassette file. Ports without a configured
    /// cassette file will use an adapter that panics with a clear message
    /// when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            categories: match replayers.categories {
                Some(r) => Box::new(ReplayingCategoryDirectory::new(Arc::new(Mutex::new(r)))),
                None => Box::new(ReplayingCategoryDirectory::unconfigured()),
            },
            tasks: match replayers.tasks {
                Some(r) => Box::new(ReplayingTaskGateway::new(Arc::new(Mutex::new(r)))),
                None => Box::new(ReplayingTaskGateway::unconfigured()),
            },
            notifier: match replayers.notify {
                Some(r) => Box::new(ReplayingNotifier::new(Arc::new(Mutex::new(r)))),
                None => Box::new(ReplayingNotifier::unconfigured()),
            },
        })
    }
}

fn shared(cassette: &Cassette) -> Arc<Mutex<CassetteReplayer>> {
    Arc::new(Mutex::new(CassetteReplayer::new(cassette)))
}

// --- Panicking adapter for the one port without an unconfigured variant ---

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig — no cassette loaded for clock");
    }
}
