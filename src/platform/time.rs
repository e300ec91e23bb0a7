//! Uptime from the Embassy time driver

use tiny_tweet_core::traits::TimeSource;

/// Device clock for `DeviceConfig` on the Pico 2 W
///
/// Embassy's `Instant` counts from timer start, which is boot for the AP
/// disclosure window.
///
/// ```ignore
/// use tiny_tweet::platform::EmbassyTime;
/// use tiny_tweet::storage::{boot, CONFIG_BLOCK_ADDRESS};
///
/// let mut store = boot(Rp2350Flash::new(), CONFIG_BLOCK_ADDRESS)?;
/// let config = store.config(EmbassyTime);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTime;

impl TimeSource for EmbassyTime {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }

    fn now_us(&self) -> u64 {
        embassy_time::Instant::now().as_micros()
    }
}
