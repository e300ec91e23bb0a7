//! Configuration Storage
//!
//! Flash persistence for the device configuration record.
//!
//! # Boot Flow
//!
//! ```text
//! boot() ──► RecordStore::load() ──► match?  ── yes ──► decode
//!                                        │
//!                                        no ──► reset header, defaults,
//!                                               save as new baseline
//!                 ▼
//!        ConfigStore::config(clock)   DeviceConfig borrowing the shadow copy
//!                 │  provisioning mutates in place
//!                 ▼
//!        RecordStore::save()
//! ```
//!
//! # Flash Layout
//!
//! ```text
//! [Config Block]  0x040000 - 0x041000 (4 KB)
//! ```

pub mod store;

pub use store::{LoadOutcome, RecordHeader, RecordStore, ResetReason, TYPE_TAG_LEN};

use crate::platform::{FlashInterface, Result};
use tiny_tweet_core::config::{ConfigRecord, DeviceConfig, CONFIG_VERSION};
use tiny_tweet_core::traits::TimeSource;

/// Flash offset of the configuration block (first block after firmware)
pub const CONFIG_BLOCK_ADDRESS: u32 = 0x040000;

/// Store holding the device configuration record
pub type ConfigStore<F> = RecordStore<F, ConfigRecord>;

impl<F: FlashInterface> ConfigStore<F> {
    /// Typed view over the shadow copy
    ///
    /// Setters write straight into the shadow, so the next
    /// [`RecordStore::save`] persists them.
    pub fn config<T: TimeSource>(&mut self, clock: T) -> DeviceConfig<T, &mut ConfigRecord> {
        DeviceConfig::new(self.shadow_mut(), clock)
    }
}

/// Load the configuration at boot
///
/// Stale or missing records are replaced by factory values, which are
/// persisted before this returns.
///
/// # Example
///
/// ```ignore
/// use tiny_tweet::platform::mock::MockFlash;
/// use tiny_tweet::storage::{boot, CONFIG_BLOCK_ADDRESS};
/// use tiny_tweet_core::traits::MockTime;
///
/// let mut store = boot(MockFlash::new(), CONFIG_BLOCK_ADDRESS).unwrap();
/// let mut config = store.config(MockTime::new());
/// config.set_home_ssid("HomeNet");
/// store.save().unwrap();
/// ```
pub fn boot<F: FlashInterface>(flash: F, address: u32) -> Result<ConfigStore<F>> {
    let mut store = ConfigStore::new(flash, address, CONFIG_VERSION)?;

    if let LoadOutcome::Defaulted(reason) = store.load()? {
        crate::log_info!("Configuration initialized from defaults ({})", reason.as_str());
    }

    let record = store.shadow();
    crate::log_debug!(
        "Home WiFi configured: {}, AP initialized: {}",
        record.is_home_wifi_configured(),
        record.is_ap_initialized()
    );

    Ok(store)
}
