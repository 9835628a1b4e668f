//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (time, repository hosting, language model).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod hosting;
pub mod llm;

pub use clock::Clock;
pub use hosting::{
    decode_tree_entries, EntryKind, HostingApi, HostingFuture, RepositorySummary, TreeEntry,
};
pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Error type shared by the fallible ports.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
