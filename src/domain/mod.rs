//! Domain layer containing the persisted data shapes and their key layouts.
//!
//! # Module Organization
//!
//! - `analysis` - Analysis data, storage layouts and store errors

pub mod analysis;
