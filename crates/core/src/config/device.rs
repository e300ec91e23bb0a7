//! Typed access to the configuration record
//!
//! `DeviceConfig` is a typed view over a [`ConfigRecord`] plus the uptime
//! clock used by the AP-credential disclosure window. On the device it
//! borrows the storage backend's shadow copy, so setters mutate exactly what
//! the next save writes. It can also own a record (the default), which is
//! how host code and tests build one without flash. Persisting changes is
//! the caller's job.
//!
//! # AP Credential Disclosure
//!
//! ```text
//!  uptime:   0 ─────────────── DEFAULT_AP_EXPOSURE_MS ─────────────►
//!  force=false:   factory SSID/password   │   stored SSID/password
//!  force=true:    stored SSID/password    │   stored SSID/password
//! ```
//!
//! Right after boot, display and advertisement code sees the documented
//! factory credentials so an operator can always reach the device. Code that
//! actually configures the radio passes `force = true`.

use super::record::{ConfigRecord, DEFAULT_AP_PASSWORD, DEFAULT_AP_SSID};
use crate::record::VersionedRecord;
use crate::text::TextSource;
use crate::traits::TimeSource;
use core::borrow::{Borrow, BorrowMut};

/// Uptime (ms) during which non-forced AP getters return factory credentials
pub const DEFAULT_AP_EXPOSURE_MS: u64 = 300_000;

/// Device configuration with bounded setters and policy-aware getters
///
/// `R` is the record storage: an owned [`ConfigRecord`] or a
/// `&mut ConfigRecord` borrowed from a store. Single writer: mutate through
/// `&mut DeviceConfig` only. Wrap it in a mutex if several tasks need write
/// access.
///
/// # Example
///
/// ```
/// use tiny_tweet_core::config::{DeviceConfig, DEFAULT_AP_PASSWORD};
/// use tiny_tweet_core::traits::MockTime;
///
/// let time = MockTime::new();
/// let mut config = DeviceConfig::with_defaults(&time);
/// assert!(!config.is_home_wifi_configured());
///
/// config.set_home_ssid("HomeNet");
/// config.set_ap_pwd("s3cret-ap-pass");
/// assert!(config.is_home_wifi_configured());
/// assert!(config.is_ap_initialized());
///
/// // Shortly after boot the factory password is shown unless forced
/// assert_eq!(config.ap_pwd(false), DEFAULT_AP_PASSWORD);
/// assert_eq!(config.ap_pwd(true), "s3cret-ap-pass");
/// ```
#[derive(Debug, Clone)]
pub struct DeviceConfig<T, R = ConfigRecord> {
    record: R,
    clock: T,
}

impl<T: TimeSource> DeviceConfig<T> {
    /// Owned configuration holding factory values
    pub fn with_defaults(clock: T) -> Self {
        Self::new(ConfigRecord::factory(), clock)
    }
}

impl<T: TimeSource, R: BorrowMut<ConfigRecord>> DeviceConfig<T, R> {
    /// View over `record`, owned or borrowed from a store's shadow copy
    pub fn new(record: R, clock: T) -> Self {
        Self { record, clock }
    }

    pub fn record(&self) -> &ConfigRecord {
        self.record.borrow()
    }

    fn record_mut(&mut self) -> &mut ConfigRecord {
        self.record.borrow_mut()
    }

    pub fn into_record(self) -> R {
        self.record
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Restore every field to its factory value
    ///
    /// The store header is untouched; it belongs to the storage backend.
    pub fn init_from_default(&mut self) {
        self.record_mut().init_from_default();
    }

    // ------------------------------------------------------------------
    // Hostnames
    // ------------------------------------------------------------------

    pub fn set_ntp_server<S: TextSource + ?Sized>(&mut self, host: &S) {
        self.record_mut().ntp_host_name.assign(host);
    }

    pub fn ntp_server(&self) -> &str {
        self.record().ntp_host_name.as_str()
    }

    /// Set the web application host the device reports to
    pub fn set_app_host<S: TextSource + ?Sized>(&mut self, host: &S) {
        self.record_mut().app_host.assign(host);
    }

    pub fn app_host(&self) -> &str {
        self.record().app_host.as_str()
    }

    // ------------------------------------------------------------------
    // Home network (station mode)
    // ------------------------------------------------------------------

    /// Set the home network SSID; an empty SSID marks home Wi-Fi unconfigured
    pub fn set_home_ssid<S: TextSource + ?Sized>(&mut self, ssid: &S) {
        self.record_mut().home_ssid.assign(ssid);
    }

    pub fn home_ssid(&self) -> &str {
        self.record().home_ssid.as_str()
    }

    pub fn set_home_pwd<S: TextSource + ?Sized>(&mut self, pwd: &S) {
        self.record_mut().home_pwd.assign(pwd);
    }

    pub fn home_pwd(&self) -> &str {
        self.record().home_pwd.as_str()
    }

    // ------------------------------------------------------------------
    // Access point
    // ------------------------------------------------------------------

    pub fn set_ap_ssid<S: TextSource + ?Sized>(&mut self, ssid: &S) {
        self.record_mut().ap_ssid.assign(ssid);
    }

    /// AP SSID, or the factory SSID while inside the exposure window
    pub fn ap_ssid(&self, force: bool) -> &str {
        if self.credentials_exposed(force) {
            self.record().ap_ssid.as_str()
        } else {
            DEFAULT_AP_SSID
        }
    }

    pub fn set_ap_pwd<S: TextSource + ?Sized>(&mut self, pwd: &S) {
        self.record_mut().ap_pwd.assign(pwd);
    }

    /// AP password, or the factory password while inside the exposure window
    pub fn ap_pwd(&self, force: bool) -> &str {
        if self.credentials_exposed(force) {
            self.record().ap_pwd.as_str()
        } else {
            DEFAULT_AP_PASSWORD
        }
    }

    fn credentials_exposed(&self, force: bool) -> bool {
        force || self.clock.now_ms() > DEFAULT_AP_EXPOSURE_MS
    }

    // ------------------------------------------------------------------
    // Timezone
    // ------------------------------------------------------------------

    /// Set the GMT offset; hour and minute are stored independently, unchecked
    pub fn set_gmt_offset(&mut self, hour: i8, minute: i8) {
        let record = self.record_mut();
        record.gmt_hour_offset = hour;
        record.gmt_min_offset = minute;
    }

    pub fn gmt_hour_offset(&self) -> i8 {
        self.record().gmt_hour_offset
    }

    pub fn gmt_min_offset(&self) -> i8 {
        self.record().gmt_min_offset
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    /// The home Wi-Fi is configured if its SSID is not empty
    pub fn is_home_wifi_configured(&self) -> bool {
        self.record().is_home_wifi_configured()
    }

    /// The AP is initialized once its password differs from the factory one
    pub fn is_ap_initialized(&self) -> bool {
        self.record().is_ap_initialized()
    }
}
