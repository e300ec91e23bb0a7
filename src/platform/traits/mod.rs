//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod flash;

// Re-export trait interfaces
pub use flash::{FlashInterface, FlashLayout};
