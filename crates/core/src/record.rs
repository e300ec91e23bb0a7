//! Versioned record contract
//!
//! A storage backend persists one fixed-size record per region and tags it
//! with a layout version and a type identifier. When the stored tags do not
//! match what the firmware expects, the backend owns the header reset and
//! then hands control to the record's default-initialization callback.
//!
//! ```text
//! load ──► header matches? ──yes──► decode body ──► shadow copy
//!                 │
//!                 no
//!                 ▼
//!          store writes header
//!                 ▼
//!      R::init_from_default()  ──► shadow copy (persisted as new baseline)
//! ```

/// Errors from record encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// Buffer shorter than the record's fixed size
    BufferTooSmall,
}

impl core::fmt::Display for RecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecordError::BufferTooSmall => write!(f, "buffer too small for record"),
        }
    }
}

/// A fixed-layout record that a versioned store can persist
///
/// `Default` yields the blank shadow copy a store starts from before
/// calling [`VersionedRecord::init_from_default`].
pub trait VersionedRecord: Default {
    /// Type identifier stored next to the layout version
    const TYPE_TAG: &'static str;

    /// Encoded size of the record body in bytes
    const SIZE: usize;

    /// Restore every field to its factory value
    ///
    /// Called by the store after it has written its own header. Must be
    /// idempotent.
    fn init_from_default(&mut self);

    /// Encode the record into the first [`Self::SIZE`] bytes of `out`
    fn encode(&self, out: &mut [u8]) -> Result<(), RecordError>;

    /// Decode a record from the first [`Self::SIZE`] bytes of `bytes`
    fn decode(bytes: &[u8]) -> Result<Self, RecordError>;
}
