//! Replaying adapters that serve recorded interactions from a cassette.

pub mod clock;
pub mod hosting;
pub mod llm;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

pub use clock::ReplayingClock;
pub use hosting::ReplayingHostingApi;
pub use llm::ReplayingLlmClient;

/// Take the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics when the adapter has no cassette or the cassette is exhausted.
pub(crate) fn next_output(
    replayer: Option<&Arc<Mutex<CassetteReplayer>>>,
    port: &str,
    method: &str,
) -> Value {
    let replayer = replayer.unwrap_or_else(|| {
        panic!("{port} port has no cassette loaded; cannot replay {port}::{method}")
    });
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Decode a recorded `Result` using the `{"Ok": v}` / `{"Err": msg}` convention.
///
/// Lowercase `ok`/`err` keys are accepted for hand-written cassettes. Any
/// other shape is decoded directly as the success value.
pub(crate) fn replay_result<T: DeserializeOwned>(output: Value) -> Result<T, PortError> {
    if let Some(err) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err.as_str().map_or_else(|| err.to_string(), str::to_string);
        return Err(msg.into());
    }
    let value = match output {
        Value::Object(mut map) if map.contains_key("Ok") || map.contains_key("ok") => {
            map.remove("Ok").or_else(|| map.remove("ok")).unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| format!("failed to decode replayed value: {e}").into())
}
