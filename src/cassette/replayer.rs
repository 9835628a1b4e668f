//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Replays a cassette as independent per-`port::method` queues.
///
/// Interleaving between different methods does not matter; calls to the
/// same method must happen in recorded order.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Number of interactions not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Take the next interaction recorded for `port::method`.
    ///
    /// # Panics
    ///
    /// Panics if nothing was recorded for the pair or every recorded
    /// interaction for it has already been served.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        let Some(queue) = self.queues.get_mut(&key) else {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        };
        queue.pop_front().unwrap_or_else(|| {
            panic!(
                "Cassette exhausted: every interaction for port={port:?} method={method:?} \
                 has already been consumed"
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input: json!({}),
            output,
        }
    }

    fn cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        }
    }

    #[test]
    fn serves_each_method_in_recorded_order() {
        let mut replayer = CassetteReplayer::new(&cassette(vec![
            interaction(0, "hosting", "default_branch", json!("main")),
            interaction(1, "hosting", "tree", json!([])),
            interaction(2, "hosting", "default_branch", json!("develop")),
        ]));
        assert_eq!(replayer.remaining(), 3);

        // Methods are independent: tree can be served before the second branch.
        assert_eq!(replayer.next_interaction("hosting", "tree").seq, 1);
        assert_eq!(replayer.next_interaction("hosting", "default_branch").output, json!("main"));
        assert_eq!(replayer.next_interaction("hosting", "default_branch").output, json!("develop"));
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "already been consumed")]
    fn exhausted_method_panics() {
        let mut replayer =
            CassetteReplayer::new(&cassette(vec![interaction(0, "llm", "complete", json!({}))]));
        let _ = replayer.next_interaction("llm", "complete");
        let _ = replayer.next_interaction("llm", "complete");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_port_panics() {
        let mut replayer = CassetteReplayer::new(&cassette(vec![]));
        let _ = replayer.next_interaction("hosting", "tree");
    }
}
