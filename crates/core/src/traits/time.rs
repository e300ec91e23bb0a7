//! Uptime abstraction
//!
//! The AP-credential disclosure window is measured from boot. `TimeSource`
//! lets the policy read uptime without knowing whether it runs on the
//! Embassy driver or under a host test with a hand-driven clock.

use core::cell::Cell;

/// Monotonic time since boot
///
/// Implementations:
/// - `EmbassyTime` (root crate, `pico2_w` feature) on the device
/// - [`MockTime`] for host tests
///
/// # Example
///
/// ```
/// use tiny_tweet_core::traits::{MockTime, TimeSource};
///
/// fn past_window<T: TimeSource>(clock: &T, window_ms: u64) -> bool {
///     clock.now_ms() > window_ms
/// }
///
/// let clock = MockTime::new();
/// assert!(!past_window(&clock, 1000));
/// clock.set_ms(1001);
/// assert!(past_window(&clock, 1000));
/// ```
pub trait TimeSource {
    /// Milliseconds since boot
    fn now_ms(&self) -> u64;

    /// Microseconds since boot
    fn now_us(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

/// Hand-driven clock for tests
///
/// Interior mutability lets a test keep moving the clock while a
/// `DeviceConfig` holds a shared reference to it.
///
/// ```
/// use tiny_tweet_core::traits::{MockTime, TimeSource};
///
/// let clock = MockTime::at_ms(250);
/// clock.advance(1500);
/// assert_eq!(clock.now_us(), 251_500);
/// assert_eq!(clock.now_ms(), 251);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTime {
    now_us: Cell<u64>,
}

impl MockTime {
    /// Clock at boot (uptime 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock at the given uptime in microseconds
    pub fn with_initial(us: u64) -> Self {
        Self {
            now_us: Cell::new(us),
        }
    }

    /// Clock at the given uptime in milliseconds
    pub fn at_ms(ms: u64) -> Self {
        Self::with_initial(ms.saturating_mul(1000))
    }

    pub fn set(&self, us: u64) {
        self.now_us.set(us);
    }

    pub fn set_ms(&self, ms: u64) {
        self.now_us.set(ms.saturating_mul(1000));
    }

    /// Move the clock forward by `us` microseconds
    pub fn advance(&self, us: u64) {
        self.now_us.set(self.now_us.get().saturating_add(us));
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.now_us.get() / 1000
    }

    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}
