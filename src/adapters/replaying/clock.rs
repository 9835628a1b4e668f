//! Replaying adapter for the Clock port.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingClock {
    /// Creates a replaying clock backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Creates a replaying clock with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let output = next_output(self.replayer.as_ref(), "clock", "now");
        serde_json::from_value(output).expect("clock::now: failed to deserialize DateTime<Utc>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn clock(times: &[&str]) -> ReplayingClock {
        let interactions = times
            .iter()
            .zip(0..)
            .map(|(ts, seq)| Interaction {
                seq,
                port: "clock".into(),
                method: "now".into(),
                input: json!({}),
                output: json!(ts),
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        ReplayingClock::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    #[test]
    fn serves_recorded_times_in_order() {
        let clock = clock(&["2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z"]);
        assert_eq!(clock.now().to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(clock.now().to_rfc3339(), "2024-01-01T00:01:00+00:00");
    }

    #[test]
    #[should_panic(expected = "no cassette loaded")]
    fn unconfigured_clock_panics() {
        let _ = ReplayingClock::unconfigured().now();
    }
}
