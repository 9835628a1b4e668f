//! Port implementations.
//!
//! - `live` talks to the real hosting API, language model, and system clock.
//! - `recording` wraps live adapters and captures every interaction.
//! - `replaying` serves captured interactions back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
