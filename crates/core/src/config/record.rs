//! Persisted configuration record
//!
//! # Record Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ ntp_host_name: [u8; 51]                       │  Offset: 0
//! ├───────────────────────────────────────────────┤
//! │ app_host: [u8; 51]                            │  Offset: 51
//! ├───────────────────────────────────────────────┤
//! │ home_ssid: [u8; 33]                           │  Offset: 102
//! ├───────────────────────────────────────────────┤
//! │ home_pwd: [u8; 64]                            │  Offset: 135
//! ├───────────────────────────────────────────────┤
//! │ ap_ssid: [u8; 33]                             │  Offset: 199
//! ├───────────────────────────────────────────────┤
//! │ ap_pwd: [u8; 64]                              │  Offset: 232
//! ├───────────────────────────────────────────────┤
//! │ gmt_hour_offset: i8                           │  Offset: 296
//! │ gmt_min_offset: i8                            │  Offset: 297
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Text slots are zero padded and always end with a 0 byte. The layout
//! version and type tag are not part of the record; the store keeps them in
//! its own header.

use crate::record::{RecordError, VersionedRecord};
use crate::text::BoundedText;

/// Layout version of [`ConfigRecord`]; bump on any layout change
pub const CONFIG_VERSION: u16 = 1;

/// Type tag stored next to the layout version
pub const CONFIG_TYPE: &str = "tinyTweet";

/// Maximum hostname length (NTP server, web app host)
pub const HOSTNAME_MAX_LENGTH: usize = 50;

/// Maximum SSID length (IEEE 802.11 standard)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WiFi password length (WPA2 standard)
pub const MAX_PASSWORD_LEN: usize = 63;

/// NTP server restored on default reset
pub const DEFAULT_NTP_SERVER: &str = "0.europe.pool.ntp.org";

/// Timezone hour restored on default reset (GMT+2:00)
pub const DEFAULT_GMT_HOUR_OFFSET: i8 = 2;

/// Timezone minutes restored on default reset
pub const DEFAULT_GMT_MIN_OFFSET: i8 = 0;

/// Factory access point SSID (build-time, see build.rs)
pub const DEFAULT_AP_SSID: &str = env!("TINYTWEET_AP_SSID");

/// Factory access point password (build-time, see build.rs)
pub const DEFAULT_AP_PASSWORD: &str = env!("TINYTWEET_AP_PASSWORD");

pub type HostName = BoundedText<HOSTNAME_MAX_LENGTH>;
pub type Ssid = BoundedText<MAX_SSID_LEN>;
pub type Password = BoundedText<MAX_PASSWORD_LEN>;

/// The device configuration as stored in flash
///
/// `ConfigRecord::default()` is the blank shadow copy (all strings empty,
/// zero offsets). Use [`ConfigRecord::factory`] for factory values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigRecord {
    pub(crate) ntp_host_name: HostName,
    pub(crate) app_host: HostName,
    pub(crate) home_ssid: Ssid,
    pub(crate) home_pwd: Password,
    pub(crate) ap_ssid: Ssid,
    pub(crate) ap_pwd: Password,
    pub(crate) gmt_hour_offset: i8,
    pub(crate) gmt_min_offset: i8,
}

impl ConfigRecord {
    /// Record holding factory values
    pub fn factory() -> Self {
        let mut record = Self::default();
        record.init_from_default();
        record
    }

    /// The home Wi-Fi is configured if its SSID is not empty
    pub fn is_home_wifi_configured(&self) -> bool {
        !self.home_ssid.is_empty()
    }

    /// The AP is initialized once its password differs from the factory one
    pub fn is_ap_initialized(&self) -> bool {
        self.ap_pwd.as_bytes() != DEFAULT_AP_PASSWORD.as_bytes()
    }
}

impl VersionedRecord for ConfigRecord {
    const TYPE_TAG: &'static str = CONFIG_TYPE;

    const SIZE: usize =
        2 * HostName::SLOT_SIZE + 2 * Ssid::SLOT_SIZE + 2 * Password::SLOT_SIZE + 2;

    fn init_from_default(&mut self) {
        self.ntp_host_name.assign(DEFAULT_NTP_SERVER);
        self.app_host.clear();
        self.home_ssid.clear();
        self.home_pwd.clear();
        self.ap_ssid.assign(DEFAULT_AP_SSID);
        self.ap_pwd.assign(DEFAULT_AP_PASSWORD);
        self.gmt_hour_offset = DEFAULT_GMT_HOUR_OFFSET;
        self.gmt_min_offset = DEFAULT_GMT_MIN_OFFSET;
    }

    fn encode(&self, out: &mut [u8]) -> Result<(), RecordError> {
        if out.len() < Self::SIZE {
            return Err(RecordError::BufferTooSmall);
        }

        let mut offset = 0;

        self.ntp_host_name
            .write_slot(&mut out[offset..offset + HostName::SLOT_SIZE]);
        offset += HostName::SLOT_SIZE;

        self.app_host
            .write_slot(&mut out[offset..offset + HostName::SLOT_SIZE]);
        offset += HostName::SLOT_SIZE;

        self.home_ssid
            .write_slot(&mut out[offset..offset + Ssid::SLOT_SIZE]);
        offset += Ssid::SLOT_SIZE;

        self.home_pwd
            .write_slot(&mut out[offset..offset + Password::SLOT_SIZE]);
        offset += Password::SLOT_SIZE;

        self.ap_ssid
            .write_slot(&mut out[offset..offset + Ssid::SLOT_SIZE]);
        offset += Ssid::SLOT_SIZE;

        self.ap_pwd
            .write_slot(&mut out[offset..offset + Password::SLOT_SIZE]);
        offset += Password::SLOT_SIZE;

        out[offset] = self.gmt_hour_offset as u8;
        out[offset + 1] = self.gmt_min_offset as u8;

        Ok(())
    }

    fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        if bytes.len() < Self::SIZE {
            return Err(RecordError::BufferTooSmall);
        }

        let mut offset = 0;

        let ntp_host_name = HostName::read_slot(&bytes[offset..offset + HostName::SLOT_SIZE]);
        offset += HostName::SLOT_SIZE;

        let app_host = HostName::read_slot(&bytes[offset..offset + HostName::SLOT_SIZE]);
        offset += HostName::SLOT_SIZE;

        let home_ssid = Ssid::read_slot(&bytes[offset..offset + Ssid::SLOT_SIZE]);
        offset += Ssid::SLOT_SIZE;

        let home_pwd = Password::read_slot(&bytes[offset..offset + Password::SLOT_SIZE]);
        offset += Password::SLOT_SIZE;

        let ap_ssid = Ssid::read_slot(&bytes[offset..offset + Ssid::SLOT_SIZE]);
        offset += Ssid::SLOT_SIZE;

        let ap_pwd = Password::read_slot(&bytes[offset..offset + Password::SLOT_SIZE]);
        offset += Password::SLOT_SIZE;

        Ok(Self {
            ntp_host_name,
            app_host,
            home_ssid,
            home_pwd,
            ap_ssid,
            ap_pwd,
            gmt_hour_offset: bytes[offset] as i8,
            gmt_min_offset: bytes[offset + 1] as i8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_size() {
        assert_eq!(ConfigRecord::SIZE, 298);
    }

    #[test]
    fn test_factory_values() {
        let record = ConfigRecord::factory();
        assert_eq!(record.ntp_host_name.as_str(), DEFAULT_NTP_SERVER);
        assert!(record.app_host.is_empty());
        assert!(record.home_ssid.is_empty());
        assert!(record.home_pwd.is_empty());
        assert_eq!(record.ap_ssid.as_str(), DEFAULT_AP_SSID);
        assert_eq!(record.ap_pwd.as_str(), DEFAULT_AP_PASSWORD);
        assert_eq!(record.gmt_hour_offset, DEFAULT_GMT_HOUR_OFFSET);
        assert_eq!(record.gmt_min_offset, DEFAULT_GMT_MIN_OFFSET);
    }

    #[test]
    fn test_factory_credentials_fit_their_slots() {
        assert!(DEFAULT_AP_SSID.len() <= MAX_SSID_LEN);
        assert!(DEFAULT_AP_PASSWORD.len() <= MAX_PASSWORD_LEN);
        assert!(DEFAULT_NTP_SERVER.len() <= HOSTNAME_MAX_LENGTH);
    }

    #[test]
    fn test_factory_record_queries() {
        let mut record = ConfigRecord::factory();
        assert!(!record.is_home_wifi_configured());
        assert!(!record.is_ap_initialized());

        record.home_ssid.assign("HomeNet");
        record.ap_pwd.assign("changed");
        assert!(record.is_home_wifi_configured());
        assert!(record.is_ap_initialized());
    }

    #[test]
    fn test_init_from_default_is_idempotent() {
        let mut record = ConfigRecord::default();
        record.home_ssid.assign("Upstairs");
        record.gmt_hour_offset = -5;

        record.init_from_default();
        let once = record.clone();
        record.init_from_default();
        assert_eq!(record, once);
        assert_eq!(record, ConfigRecord::factory());
    }

    #[test]
    fn test_encode_terminates_every_slot() {
        let mut record = ConfigRecord::factory();
        record.ntp_host_name.assign(&[b'n'; 80][..]);
        record.home_pwd.assign(&[b'p'; 80][..]);

        let mut buf = [0xAAu8; ConfigRecord::SIZE];
        record.encode(&mut buf).unwrap();

        // Last byte of each text slot
        for end in [51, 102, 135, 199, 232, 296] {
            assert_eq!(buf[end - 1], 0, "slot ending at {} not terminated", end);
        }
        assert_eq!(&buf[..HOSTNAME_MAX_LENGTH], &[b'n'; HOSTNAME_MAX_LENGTH][..]);
    }

    #[test]
    fn test_encode_offsets() {
        let mut record = ConfigRecord::factory();
        record.gmt_hour_offset = -3;
        record.gmt_min_offset = 30;

        let mut buf = [0u8; ConfigRecord::SIZE];
        record.encode(&mut buf).unwrap();

        assert_eq!(&buf[..DEFAULT_NTP_SERVER.len()], DEFAULT_NTP_SERVER.as_bytes());
        assert_eq!(&buf[199..199 + DEFAULT_AP_SSID.len()], DEFAULT_AP_SSID.as_bytes());
        assert_eq!(buf[296] as i8, -3);
        assert_eq!(buf[297], 30);
    }

    #[test]
    fn test_decode_restores_encoded_record() {
        let mut record = ConfigRecord::factory();
        record.app_host.assign("tweet.example.org");
        record.home_ssid.assign("HomeNet");
        record.home_pwd.assign("hunter22");
        record.ap_pwd.assign("changed-ap-pass");
        record.gmt_hour_offset = -11;
        record.gmt_min_offset = -30;

        let mut buf = [0u8; ConfigRecord::SIZE];
        record.encode(&mut buf).unwrap();
        assert_eq!(ConfigRecord::decode(&buf).unwrap(), record);
    }

    #[test]
    fn test_decode_garbage_is_bounded() {
        let buf = [0xFFu8; ConfigRecord::SIZE];
        let record = ConfigRecord::decode(&buf).unwrap();
        assert!(record.ntp_host_name.is_empty());
        assert!(record.ap_pwd.is_empty());
        assert_eq!(record.gmt_hour_offset, -1);
    }

    #[test]
    fn test_short_buffers_rejected() {
        let record = ConfigRecord::factory();
        let mut buf = [0u8; ConfigRecord::SIZE - 1];
        assert_eq!(record.encode(&mut buf), Err(RecordError::BufferTooSmall));
        assert_eq!(ConfigRecord::decode(&buf), Err(RecordError::BufferTooSmall));
    }
}
