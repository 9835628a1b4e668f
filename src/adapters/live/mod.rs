//! Live adapters for real external interactions.

pub mod clock;
pub mod hosting;
pub mod llm;

pub use clock::LiveClock;
pub use hosting::GitHubHostingApi;
pub use llm::AnthropicLlmClient;
