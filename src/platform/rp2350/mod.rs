//! RP2350 platform implementation for Raspberry Pi Pico 2 W
//!
//! # Feature Gate
//!
//! This module is only available when the `pico2_w` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! tiny_tweet = { version = "0.1", features = ["pico2_w"] }
//! ```

mod flash;

pub use flash::Rp2350Flash;
