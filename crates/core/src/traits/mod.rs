//! Core traits for platform-agnostic configuration logic.
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Platform implementations (Embassy) live in the root crate

pub mod time;

pub use time::{MockTime, TimeSource};
