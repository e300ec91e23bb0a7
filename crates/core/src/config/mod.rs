//! Device configuration
//!
//! One fixed-layout record holds everything the module needs across power
//! cycles:
//!
//! - Home network credentials (station mode)
//! - Fallback access point credentials
//! - NTP server and web application hostnames
//! - Timezone offset
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │  Provisioning / network / display      │
//! └──────────────┬─────────────────────────┘
//!                │ setters, getters, queries
//!                ▼
//! ┌────────────────────────────────────────┐
//! │        DeviceConfig                    │
//! │  - Bounded text fields                 │
//! │  - AP credential disclosure window     │
//! └──────────────┬─────────────────────────┘
//!                │ ConfigRecord (shadow copy)
//!                ▼
//! ┌────────────────────────────────────────┐
//! │   Versioned record store (root crate)  │
//! │  - Layout version + type tag           │
//! │  - Reset to defaults on mismatch       │
//! └────────────────────────────────────────┘
//! ```

pub mod device;
pub mod record;

pub use device::{DeviceConfig, DEFAULT_AP_EXPOSURE_MS};
pub use record::{
    ConfigRecord, HostName, Password, Ssid, CONFIG_TYPE, CONFIG_VERSION, DEFAULT_AP_PASSWORD,
    DEFAULT_AP_SSID, DEFAULT_GMT_HOUR_OFFSET, DEFAULT_GMT_MIN_OFFSET, DEFAULT_NTP_SERVER,
    HOSTNAME_MAX_LENGTH, MAX_PASSWORD_LEN, MAX_SSID_LEN,
};
