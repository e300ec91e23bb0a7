//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the flash and clock the
//! configuration store depends on. All platform-specific code lives here.

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "pico2_w")]
pub mod rp2350;

#[cfg(feature = "pico2_w")]
pub mod time;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{FlashError, PlatformError, Result};
pub use traits::{FlashInterface, FlashLayout};

#[cfg(feature = "pico2_w")]
pub use time::EmbassyTime;
