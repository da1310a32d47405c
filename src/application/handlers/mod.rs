//! Application handlers.
//!
//! Query and command handlers that orchestrate storage operations.

pub mod analysis;
