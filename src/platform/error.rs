//! Platform error types
//!
//! Drivers map their HAL-specific failures onto [`FlashError`]; the store
//! adds [`PlatformError::InvalidConfig`] for a record that cannot be placed.

use core::fmt;
use tiny_tweet_core::record::RecordError;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Errors from flash access and record storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum PlatformError {
    /// Flash operation failed
    Flash(FlashError),
    /// Record store layout cannot be placed in flash
    InvalidConfig,
}

/// Flash-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum FlashError {
    /// Erase operation failed
    EraseFailed,
    /// Write operation failed
    WriteFailed,
    /// Read operation failed
    ReadFailed,
    /// Invalid address (out of bounds, protected, or unaligned)
    InvalidAddress,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Flash(e) => write!(f, "Flash error: {}", e),
            PlatformError::InvalidConfig => write!(f, "Invalid store configuration"),
        }
    }
}

impl fmt::Display for FlashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashError::EraseFailed => write!(f, "erase failed"),
            FlashError::WriteFailed => write!(f, "write failed"),
            FlashError::ReadFailed => write!(f, "read failed"),
            FlashError::InvalidAddress => write!(f, "invalid address"),
        }
    }
}

impl From<FlashError> for PlatformError {
    fn from(error: FlashError) -> Self {
        PlatformError::Flash(error)
    }
}

impl From<RecordError> for PlatformError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::BufferTooSmall => PlatformError::InvalidConfig,
        }
    }
}
