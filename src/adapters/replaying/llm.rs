//! Replaying adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CompletionFuture, CompletionRequest, LlmClient};

/// Provider label reported while replaying.
pub const REPLAY_PROVIDER_LABEL: &str = "Anthropic Claude (replay)";

/// Serves recorded LLM completions from a cassette.
pub struct ReplayingLlmClient {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
        let output = next_output(Some(&self.replayer), "llm", "complete");
        Box::pin(async move { replay_result(output) })
    }

    fn provider_label(&self) -> String {
        REPLAY_PROVIDER_LABEL.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "m".into(),
            prompt: "p".into(),
            max_tokens: 10,
        }
    }

    fn client(outputs: Vec<serde_json::Value>) -> ReplayingLlmClient {
        let interactions = outputs
            .into_iter()
            .zip(0..)
            .map(|(output, seq)| Interaction {
                seq,
                port: "llm".into(),
                method: "complete".into(),
                input: json!({}),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "t".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        ReplayingLlmClient::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    #[tokio::test]
    async fn serves_recorded_completions_in_order() {
        let llm = client(vec![
            json!({"Ok": {"text": "first", "prompt_tokens": 1, "completion_tokens": 2}}),
            json!({"Ok": {"text": "second", "prompt_tokens": 3, "completion_tokens": 4}}),
        ]);
        assert_eq!(llm.complete(&request()).await.unwrap().text, "first");
        assert_eq!(llm.complete(&request()).await.unwrap().text, "second");
    }

    #[tokio::test]
    async fn serves_recorded_errors() {
        let llm = client(vec![json!({"Err": "rate limited"})]);
        let err = llm.complete(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
    }
}
