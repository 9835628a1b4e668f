//! YAML cassettes of recorded port interactions, used to replay hosting
//! and model traffic deterministically.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
