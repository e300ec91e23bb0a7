//! Flash-backed versioned record store
//!
//! Persists one [`VersionedRecord`] per flash block, tagged with a layout
//! version and a type identifier and protected by a CRC32.
//!
//! # Flash Block Format
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ Version: u16                                  │  Offset: 0
//! ├───────────────────────────────────────────────┤
//! │ Type tag: [u8; 16] (zero padded)              │  Offset: 2
//! ├───────────────────────────────────────────────┤
//! │ Record body: [u8; R::SIZE]                    │  Offset: 18
//! ├───────────────────────────────────────────────┤
//! │ CRC32: u32 (over all preceding bytes)         │  Offset: 18 + R::SIZE
//! ├───────────────────────────────────────────────┤
//! │ 0xFF padding up to a whole program page       │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Any mismatch in version, type tag, or CRC resets the shadow copy to the
//! record's defaults and persists it as the new baseline. The caller never
//! sees that as an error.

use crate::platform::{FlashInterface, PlatformError, Result};
use tiny_tweet_core::record::VersionedRecord;

/// Size of the type tag slot in the header
pub const TYPE_TAG_LEN: usize = 16;

/// Header size (version + type tag)
const HEADER_SIZE: usize = 2 + TYPE_TAG_LEN;

/// Trailing CRC32 size
const CRC_SIZE: usize = 4;

/// Largest frame the store can stage (one 4 KB block)
const MAX_FRAME_SIZE: usize = 4096;

const CRC32: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);

/// Layout version and type identifier written ahead of the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub version: u16,
    pub type_tag: [u8; TYPE_TAG_LEN],
}

impl RecordHeader {
    /// Build a header; `type_tag` is truncated to [`TYPE_TAG_LEN`] bytes
    pub fn new(version: u16, type_tag: &str) -> Self {
        let mut tag = [0u8; TYPE_TAG_LEN];
        let len = type_tag.len().min(TYPE_TAG_LEN);
        tag[..len].copy_from_slice(&type_tag.as_bytes()[..len]);
        Self {
            version,
            type_tag: tag,
        }
    }

    /// Serialize header to bytes (little-endian)
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..2].copy_from_slice(&self.version.to_le_bytes());
        buf[2..].copy_from_slice(&self.type_tag);
        buf
    }

    /// Deserialize header from bytes (little-endian)
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }

        let mut type_tag = [0u8; TYPE_TAG_LEN];
        type_tag.copy_from_slice(&buf[2..HEADER_SIZE]);

        Some(Self {
            version: u16::from_le_bytes([buf[0], buf[1]]),
            type_tag,
        })
    }
}

/// Why a stored record was replaced by defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum ResetReason {
    /// Stored layout version differs (includes blank flash)
    VersionMismatch,
    /// Stored type tag differs
    TypeMismatch,
    /// Header matches but the CRC does not (torn or corrupted write)
    Corrupted,
}

impl ResetReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetReason::VersionMismatch => "version mismatch",
            ResetReason::TypeMismatch => "type mismatch",
            ResetReason::Corrupted => "crc mismatch",
        }
    }
}

/// Result of [`RecordStore::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum LoadOutcome {
    /// Stored record matched and was decoded
    Loaded,
    /// Stored record was absent or stale; defaults were restored and saved
    Defaulted(ResetReason),
}

/// Versioned record store over one flash block
///
/// Holds the in-memory shadow copy of `R`. Mutations of the shadow are not
/// persisted until [`RecordStore::save`] is called.
///
/// # Example
///
/// ```ignore
/// use tiny_tweet::platform::mock::MockFlash;
/// use tiny_tweet::storage::{RecordStore, CONFIG_BLOCK_ADDRESS};
/// use tiny_tweet_core::config::{ConfigRecord, CONFIG_VERSION};
///
/// let mut store: RecordStore<_, ConfigRecord> =
///     RecordStore::new(MockFlash::new(), CONFIG_BLOCK_ADDRESS, CONFIG_VERSION).unwrap();
/// store.load().unwrap();
/// store.save().unwrap();
/// ```
pub struct RecordStore<F, R> {
    flash: F,
    address: u32,
    version: u16,
    header: RecordHeader,
    shadow: R,
    /// Frame size rounded up to whole program pages
    write_len: usize,
}

impl<F: FlashInterface, R: VersionedRecord> RecordStore<F, R> {
    /// Bytes occupied in flash (header + record + CRC)
    pub const FRAME_SIZE: usize = HEADER_SIZE + R::SIZE + CRC_SIZE;

    /// Bind a flash block and the expected layout version
    ///
    /// The shadow copy is blank until [`Self::load`] or
    /// [`Self::reset_to_default`] runs.
    ///
    /// # Errors
    ///
    /// `PlatformError::InvalidConfig` if the frame does not fit one block,
    /// the address is not block-aligned, or the type tag is empty or longer
    /// than [`TYPE_TAG_LEN`].
    pub fn new(flash: F, address: u32, version: u16) -> Result<Self> {
        let block_size = flash.block_size() as usize;
        let page_size = flash.page_size() as usize;

        if page_size == 0 {
            return Err(PlatformError::InvalidConfig);
        }

        let write_len = Self::FRAME_SIZE.next_multiple_of(page_size);
        if write_len > block_size || write_len > MAX_FRAME_SIZE {
            return Err(PlatformError::InvalidConfig);
        }

        if !address.is_multiple_of(flash.block_size()) {
            return Err(PlatformError::InvalidConfig);
        }

        if R::TYPE_TAG.is_empty() || R::TYPE_TAG.len() > TYPE_TAG_LEN {
            return Err(PlatformError::InvalidConfig);
        }

        Ok(Self {
            flash,
            address,
            version,
            header: RecordHeader::new(version, R::TYPE_TAG),
            shadow: R::default(),
            write_len,
        })
    }

    /// Load the record from flash
    ///
    /// On version/type/CRC mismatch the shadow copy is reset to defaults and
    /// immediately saved, so the defaults become the persisted baseline.
    ///
    /// # Errors
    ///
    /// Only flash I/O errors are returned.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let frame = &mut buf[..Self::FRAME_SIZE];
        self.flash.read(self.address, frame)?;

        match self.check_frame(frame) {
            Ok(header) => {
                self.shadow = R::decode(&frame[HEADER_SIZE..HEADER_SIZE + R::SIZE])?;
                self.header = header;
                crate::log_info!("Loaded {} record v{}", R::TYPE_TAG, self.version);
                Ok(LoadOutcome::Loaded)
            }
            Err(reason) => {
                crate::log_warn!(
                    "Stored {} record rejected ({}), restoring defaults",
                    R::TYPE_TAG,
                    reason.as_str()
                );
                self.reset_to_default();
                self.save()?;
                Ok(LoadOutcome::Defaulted(reason))
            }
        }
    }

    /// Write header, record, and CRC to flash
    ///
    /// Erases the whole block first. The frame is padded with 0xFF to whole
    /// program pages.
    pub fn save(&mut self) -> Result<()> {
        let mut buf = [0xFFu8; MAX_FRAME_SIZE];
        let frame = &mut buf[..Self::FRAME_SIZE];

        frame[..HEADER_SIZE].copy_from_slice(&self.header.to_bytes());
        self.shadow
            .encode(&mut frame[HEADER_SIZE..HEADER_SIZE + R::SIZE])?;

        let crc_offset = Self::FRAME_SIZE - CRC_SIZE;
        let crc = CRC32.checksum(&frame[..crc_offset]);
        frame[crc_offset..].copy_from_slice(&crc.to_le_bytes());

        let block_size = self.flash.block_size();
        self.flash.erase(self.address, block_size)?;
        self.flash.write(self.address, &buf[..self.write_len])?;

        crate::log_info!("Saved {} record ({} bytes)", R::TYPE_TAG, Self::FRAME_SIZE);
        Ok(())
    }

    /// Replace the shadow copy and save it
    pub fn save_record(&mut self, record: &R) -> Result<()>
    where
        R: Clone,
    {
        self.shadow.clone_from(record);
        self.save()
    }

    /// Reset the shadow copy to factory values (in memory only)
    ///
    /// The header is set up first, then the record's default callback runs.
    pub fn reset_to_default(&mut self) {
        self.header = RecordHeader::new(self.version, R::TYPE_TAG);
        self.shadow = R::default();
        self.shadow.init_from_default();
    }

    pub fn shadow(&self) -> &R {
        &self.shadow
    }

    pub fn shadow_mut(&mut self) -> &mut R {
        &mut self.shadow
    }

    pub fn header(&self) -> &RecordHeader {
        &self.header
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn flash(&self) -> &F {
        &self.flash
    }

    pub fn into_parts(self) -> (F, R) {
        (self.flash, self.shadow)
    }

    /// Validate a raw frame against the expected version, tag, and CRC
    fn check_frame(&self, frame: &[u8]) -> core::result::Result<RecordHeader, ResetReason> {
        let header = RecordHeader::from_bytes(frame).ok_or(ResetReason::Corrupted)?;
        let expected = RecordHeader::new(self.version, R::TYPE_TAG);

        if header.version != expected.version {
            return Err(ResetReason::VersionMismatch);
        }

        if header.type_tag != expected.type_tag {
            return Err(ResetReason::TypeMismatch);
        }

        let crc_offset = frame.len() - CRC_SIZE;
        let stored_crc = u32::from_le_bytes([
            frame[crc_offset],
            frame[crc_offset + 1],
            frame[crc_offset + 2],
            frame[crc_offset + 3],
        ]);
        if stored_crc != CRC32.checksum(&frame[..crc_offset]) {
            return Err(ResetReason::Corrupted);
        }

        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockFlash;
    use crate::platform::FlashError;
    use tiny_tweet_core::config::{ConfigRecord, DeviceConfig, CONFIG_VERSION};
    use tiny_tweet_core::traits::MockTime;

    const ADDR: u32 = 0x040000;

    fn open(flash: &mut MockFlash) -> RecordStore<&mut MockFlash, ConfigRecord> {
        RecordStore::new(flash, ADDR, CONFIG_VERSION).unwrap()
    }

    fn customized() -> ConfigRecord {
        let mut config = DeviceConfig::with_defaults(MockTime::new());
        config.set_home_ssid("HomeNet");
        config.set_home_pwd("hunter22");
        config.set_ap_pwd("ap-pass-123");
        config.set_gmt_offset(-5, 30);
        config.into_record()
    }

    #[test]
    fn test_header_serialization() {
        let header = RecordHeader::new(7, "tinyTweet");
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..2], &[7, 0]);
        assert_eq!(&bytes[2..11], b"tinyTweet");
        assert!(bytes[11..].iter().all(|&b| b == 0));
        assert_eq!(RecordHeader::from_bytes(&bytes), Some(header));
        assert_eq!(RecordHeader::from_bytes(&bytes[..4]), None);
    }

    #[test]
    fn test_blank_flash_loads_defaults_and_persists_them() {
        let mut flash = MockFlash::new();
        {
            let mut store = open(&mut flash);
            let outcome = store.load().unwrap();
            assert_eq!(outcome, LoadOutcome::Defaulted(ResetReason::VersionMismatch));
            assert_eq!(store.shadow(), &ConfigRecord::factory());
        }
        assert_eq!(flash.get_erase_count(ADDR), 1);

        // Defaults are now the stored baseline
        let mut store = open(&mut flash);
        assert_eq!(store.load().unwrap(), LoadOutcome::Loaded);
        assert_eq!(store.shadow(), &ConfigRecord::factory());
    }

    #[test]
    fn test_saved_record_reloads_unchanged() {
        let mut flash = MockFlash::new();
        let record = customized();
        {
            let mut store = open(&mut flash);
            store.load().unwrap();
            store.save_record(&record).unwrap();
        }

        let mut store = open(&mut flash);
        assert_eq!(store.load().unwrap(), LoadOutcome::Loaded);
        assert_eq!(store.shadow(), &record);
    }

    #[test]
    fn test_save_programs_whole_pages() {
        let frame_size = RecordStore::<MockFlash, ConfigRecord>::FRAME_SIZE;
        assert_eq!(frame_size, 320);

        let mut flash = MockFlash::new();
        {
            let mut store = open(&mut flash);
            store.load().unwrap();
            store.save_record(&customized()).unwrap();
        }

        // CRC ends the frame, padding runs to the 512-byte page boundary
        let written = flash.get_contents(ADDR, 512);
        assert_ne!(&written[frame_size - CRC_SIZE..frame_size], &[0xFF; 4][..]);
        assert!(written[frame_size..].iter().all(|&b| b == 0xFF));

        let mut store = open(&mut flash);
        assert_eq!(store.load().unwrap(), LoadOutcome::Loaded);
        assert_eq!(store.shadow(), &customized());
    }

    #[test]
    fn test_shadow_mutation_not_persisted_until_save() {
        let mut flash = MockFlash::new();
        {
            let mut store = open(&mut flash);
            store.load().unwrap();
            *store.shadow_mut() = customized();
        }

        let mut store = open(&mut flash);
        store.load().unwrap();
        assert_eq!(store.shadow(), &ConfigRecord::factory());
    }

    #[test]
    fn test_version_mismatch_resets_to_defaults() {
        let mut flash = MockFlash::new();
        {
            let mut old: RecordStore<_, ConfigRecord> =
                RecordStore::new(&mut flash, ADDR, CONFIG_VERSION + 1).unwrap();
            old.load().unwrap();
            old.save_record(&customized()).unwrap();
        }

        let mut store = open(&mut flash);
        assert_eq!(
            store.load().unwrap(),
            LoadOutcome::Defaulted(ResetReason::VersionMismatch)
        );
        assert_eq!(store.shadow(), &ConfigRecord::factory());
        assert_eq!(store.header().version, CONFIG_VERSION);
    }

    #[test]
    fn test_type_mismatch_resets_to_defaults() {
        let mut flash = MockFlash::new();
        {
            let mut store = open(&mut flash);
            store.load().unwrap();
            store.save_record(&customized()).unwrap();
        }

        // Rewrite the block with a foreign type tag
        let mut frame = flash.get_contents(ADDR, 512);
        frame[2..2 + TYPE_TAG_LEN].copy_from_slice(&RecordHeader::new(1, "otherApp").type_tag);
        flash.erase(ADDR, 4096).unwrap();
        flash.write(ADDR, &frame).unwrap();

        let mut store = open(&mut flash);
        assert_eq!(
            store.load().unwrap(),
            LoadOutcome::Defaulted(ResetReason::TypeMismatch)
        );
        assert_eq!(store.shadow(), &ConfigRecord::factory());
    }

    #[test]
    fn test_corrupted_body_resets_to_defaults() {
        let mut flash = MockFlash::new();
        {
            let mut store = open(&mut flash);
            store.load().unwrap();
            store.save_record(&customized()).unwrap();
        }

        flash.inject_corruption(ADDR + HEADER_SIZE as u32 + 10, 4);

        let mut store = open(&mut flash);
        assert_eq!(
            store.load().unwrap(),
            LoadOutcome::Defaulted(ResetReason::Corrupted)
        );
        assert_eq!(store.shadow(), &ConfigRecord::factory());
    }

    #[test]
    fn test_power_loss_during_save_recovers_defaults() {
        let mut flash = MockFlash::new();
        {
            let mut store = open(&mut flash);
            store.load().unwrap();
        }

        flash.simulate_power_loss();
        {
            let mut store = open(&mut flash);
            store.load().unwrap();
            store.save_record(&customized()).unwrap();
        }

        let mut store = open(&mut flash);
        assert_eq!(
            store.load().unwrap(),
            LoadOutcome::Defaulted(ResetReason::Corrupted)
        );
        assert_eq!(store.shadow(), &ConfigRecord::factory());
    }

    #[test]
    fn test_reset_to_default_is_idempotent() {
        let mut flash = MockFlash::new();
        let mut store = open(&mut flash);
        *store.shadow_mut() = customized();

        store.reset_to_default();
        let once = store.shadow().clone();
        store.reset_to_default();
        assert_eq!(store.shadow(), &once);
        assert_eq!(store.header(), &RecordHeader::new(CONFIG_VERSION, "tinyTweet"));
    }

    #[test]
    fn test_new_rejects_unaligned_address() {
        let mut flash = MockFlash::new();
        let result: Result<RecordStore<_, ConfigRecord>> =
            RecordStore::new(&mut flash, ADDR + 1, CONFIG_VERSION);
        assert!(matches!(result, Err(PlatformError::InvalidConfig)));
    }

    #[test]
    fn test_save_into_protected_region_fails() {
        let mut flash = MockFlash::new();
        let mut store: RecordStore<_, ConfigRecord> =
            RecordStore::new(&mut flash, 0x000000, CONFIG_VERSION).unwrap();
        assert_eq!(
            store.load(),
            Err(PlatformError::Flash(FlashError::InvalidAddress))
        );
    }
}
