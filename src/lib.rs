#![cfg_attr(not(test), no_std)]

//! tiny_tweet - Persistent configuration for the tinyTweet Wi-Fi module
//!
//! This library provides the platform layer around `tiny_tweet_core`:
//! flash abstraction, a versioned record store with reset-to-defaults on
//! layout mismatch, and boot helpers that hand out a `DeviceConfig`.

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Platform abstraction layer (flash, clock)
pub mod platform;

// Logging macros (log_info!, log_warn!, ...) exported at crate root
pub mod core;

// Versioned record store and boot helpers
pub mod storage;

pub use storage::{boot, ConfigStore, LoadOutcome, RecordStore, ResetReason};
pub use tiny_tweet_core::config::{ConfigRecord, DeviceConfig};
pub use tiny_tweet_core::traits::TimeSource;
