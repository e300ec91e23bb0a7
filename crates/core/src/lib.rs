//! tiny_tweet_core - Pure no_std configuration logic for the tinyTweet module
//!
//! This crate contains the persisted configuration record and the policies
//! around it. It has no platform dependencies and can be tested on host.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Clock and storage injected via traits
//!
//! # Modules
//!
//! - [`text`]: Fixed-capacity text fields with silent truncation
//! - [`record`]: Versioned record contract consumed by storage backends
//! - [`config`]: The device configuration record and its accessors
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)

#![no_std]

pub mod config;
pub mod record;
pub mod text;
pub mod traits;

pub use config::{ConfigRecord, DeviceConfig};
pub use record::{RecordError, VersionedRecord};
pub use text::{BoundedText, TextSource};
pub use traits::{MockTime, TimeSource};
