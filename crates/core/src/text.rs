//! Fixed-capacity text fields
//!
//! Every string in the configuration record is stored in a slot of fixed
//! capacity. Assigning a longer value truncates it silently; nothing is ever
//! written past the slot and no error is reported.
//!
//! # Slot Format
//!
//! ```text
//! ┌──────────────────────────────┬────┐
//! │ text bytes, zero padded (N)  │ 00 │   N + 1 bytes
//! └──────────────────────────────┴────┘
//! ```
//!
//! The last byte of a slot is always a terminator, whatever the input length.

use core::ffi::CStr;
use core::fmt;
use heapless::String;

/// Anything that can be copied into a [`BoundedText`] field
///
/// Implemented for raw buffers (`[u8]`, `[u8; M]`, `CStr`) and for string
/// types (`str`, `heapless::String`, `BoundedText`). All of them are read
/// with C-string semantics: the text ends at the first NUL byte, so the same
/// content stores the same bytes regardless of the input type.
pub trait TextSource {
    /// Bytes of the input, possibly including a terminator and trailing data
    fn text_bytes(&self) -> &[u8];
}

impl TextSource for str {
    fn text_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TextSource for [u8] {
    fn text_bytes(&self) -> &[u8] {
        self
    }
}

impl<const M: usize> TextSource for [u8; M] {
    fn text_bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

impl TextSource for CStr {
    fn text_bytes(&self) -> &[u8] {
        self.to_bytes()
    }
}

impl<const M: usize> TextSource for String<M> {
    fn text_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const M: usize> TextSource for BoundedText<M> {
    fn text_bytes(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<T: TextSource + ?Sized> TextSource for &T {
    fn text_bytes(&self) -> &[u8] {
        (**self).text_bytes()
    }
}

/// Text field holding at most `N` bytes
///
/// The stored value is always valid UTF-8 and never contains NUL, so it can
/// be handed out as `&str` and written to a terminated slot of `N + 1` bytes.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct BoundedText<const N: usize> {
    text: String<N>,
}

impl<const N: usize> BoundedText<N> {
    /// Maximum number of text bytes
    pub const CAPACITY: usize = N;

    /// Size of the persisted slot (text + terminator)
    pub const SLOT_SIZE: usize = N + 1;

    /// Create an empty field
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Create a field from any text source, truncating to `N` bytes
    pub fn from_text<S: TextSource + ?Sized>(source: &S) -> Self {
        let mut field = Self::new();
        field.assign(source);
        field
    }

    /// Replace the contents with `source`
    ///
    /// Copies up to the first NUL byte, at most `N` bytes. If the cut lands
    /// inside a multi-byte character, or a raw buffer carries invalid UTF-8,
    /// only the longest valid prefix is kept.
    pub fn assign<S: TextSource + ?Sized>(&mut self, source: &S) {
        let bytes = until_nul(source.text_bytes());
        let bounded = &bytes[..bytes.len().min(N)];
        let valid = match core::str::from_utf8(bounded) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bounded[..e.valid_up_to()]).unwrap_or_default(),
        };

        self.text.clear();
        // Cannot fail: `valid` is at most N bytes
        self.text.push_str(valid).ok();
    }

    /// Clear the field
    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Write the field into a persisted slot
    ///
    /// The slot is zero-filled past the text, and its last byte is always 0.
    /// A slot shorter than [`Self::SLOT_SIZE`] receives a truncated copy.
    pub fn write_slot(&self, slot: &mut [u8]) {
        let Some(text_room) = slot.len().checked_sub(1) else {
            return;
        };
        let len = self.len().min(text_room);
        slot[..len].copy_from_slice(&self.as_bytes()[..len]);
        slot[len..].fill(0);
    }

    /// Read a field back from a persisted slot
    ///
    /// Applies the same bounded copy as [`Self::assign`], so a slot with a
    /// missing terminator or garbage bytes still yields a valid field.
    pub fn read_slot(slot: &[u8]) -> Self {
        Self::from_text(slot)
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> PartialEq<str> for BoundedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Cut a buffer at its first NUL byte
fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}
