//! # Contracts
//!
//! Frozen interface contracts, defining inter-crate data structures and errors.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Data Model
//! - `AgentConfig` / `SourceConfig` / `DestinationConfig`: immutable after load
//! - `MonitorState`: per-source polling state, owned by exactly one monitor
//! - `LogChunk`: bytes extracted from a source between two size observations

mod chunk;
mod config;
mod error;
mod event;
mod state;

pub use chunk::LogChunk;
pub use config::*;
pub use error::*;
pub use event::EventKind;
pub use state::MonitorState;
