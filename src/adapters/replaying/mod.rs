//! Replaying adapters that replay recorded interactions.

pub mod categories;
pub mod clock;
pub mod notify;
pub mod tasks;

use std::error::Error;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

pub use categories::ReplayingCategoryDirectory;
pub use clock::ReplayingClock;
pub use notify::ReplayingNotifier;
pub use tasks::ReplayingTaskGateway;

/// Pop the next recorded output for a port/method pair.
///
/// # Panics
///
/// Panics if no cassette is configured for the port or the cassette has
/// no further interactions for the pair.
pub(crate) fn next_output(
    replayer: Option<&Arc<Mutex<CassetteReplayer>>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let replayer = replayer.unwrap_or_else(|| {
        panic!("No cassette configured for port={port:?}; cannot replay {method:?}")
    });
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output.clone()
}

/// Decode a recorded output stored with the Ok/Err JSON convention.
///
/// Counterpart of `recording::record_result`: `{"Ok": v}` becomes
/// `Ok(v)`, `{"Err": "msg"}` becomes a boxed error.
///
/// # Panics
///
/// Panics if the output is not an Ok/Err object or the Ok value cannot
/// be deserialized, since that means the cassette does not match the
/// code replaying it.
pub(crate) fn replay_result<T>(
    output: serde_json::Value,
) -> Result<T, Box<dyn Error + Send + Sync>>
where
    T: DeserializeOwned,
{
    let object = output
        .as_object()
        .unwrap_or_else(|| panic!("replayed output is not an Ok/Err object: {output}"));

    if let Some(ok) = object.get("Ok") {
        Ok(serde_json::from_value(ok.clone())
            .expect("failed to deserialize replayed Ok value"))
    } else if let Some(err) = object.get("Err") {
        Err(err.as_str().unwrap_or("replayed error was not a string").to_string().into())
    } else {
        panic!("replayed output missing an Ok or Err key: {output}")
    }
}
