//! Growable write cursor
//!
//! The cursor appends bytes either into a shared allocation it owns, which is
//! reallocated as needed, or into a fixed region supplied by the caller.

use core::fmt;

use crate::buffers::{BorrowedView, SharedBuffer};
use crate::error::{Error, Result};
use crate::{DEFAULT_RESERVED_CAPACITY, GROWTH_FACTOR};

/// What a cursor over an external region does when a write does not fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Fail the write with `Error::ShortBuffer`
    #[default]
    Reject,
    /// Copy the written bytes into an owned allocation and keep growing there
    Spill,
}

enum Storage<'a> {
    Owned(SharedBuffer),
    External(&'a mut [u8]),
}

/// Write cursor accumulating bytes into owned or external storage
///
/// Not `Clone`: two cursors over one storage would corrupt each other's
/// position.
pub struct WriteCursor<'a> {
    storage: Storage<'a>,
    pos: usize,
    policy: OverflowPolicy,
}

/// Capacity to grow to when `incoming` bytes do not fit after `written`
///
/// Computes `incoming + ceil(written * GROWTH_FACTOR)`.
#[inline]
pub fn grown_capacity(written: usize, incoming: usize) -> Result<usize> {
    let scaled = written as f64 * GROWTH_FACTOR;
    let mut grown = scaled as usize;
    if (grown as f64) < scaled {
        grown = grown.checked_add(1).ok_or(Error::Overflow)?;
    }
    grown.checked_add(incoming).ok_or(Error::Overflow)
}

impl WriteCursor<'static> {
    /// Create a cursor with the default 20 KiB reservation
    #[inline]
    pub fn new() -> Result<Self> {
        Self::with_capacity(DEFAULT_RESERVED_CAPACITY)
    }

    /// Create a cursor owning a fresh allocation of `reserved` bytes
    #[inline]
    pub fn with_capacity(reserved: usize) -> Result<Self> {
        Ok(Self {
            storage: Storage::Owned(SharedBuffer::allocate(reserved)?),
            pos: 0,
            policy: OverflowPolicy::Reject,
        })
    }
}

impl<'a> WriteCursor<'a> {
    /// Create a cursor writing into a caller-supplied region
    ///
    /// The cursor never frees the region. Writes past its end fail with
    /// `Error::ShortBuffer`.
    #[inline]
    pub fn from_external(region: &'a mut [u8]) -> Self {
        Self::from_external_with_policy(region, OverflowPolicy::Reject)
    }

    /// Create a cursor writing into a caller-supplied region with an explicit
    /// overflow policy
    #[inline]
    pub fn from_external_with_policy(region: &'a mut [u8], policy: OverflowPolicy) -> Self {
        Self {
            storage: Storage::External(region),
            pos: 0,
            policy,
        }
    }

    /// Append `src`, growing the storage if needed
    ///
    /// Returns the number of bytes written, which is always `src.len()`.
    /// On error nothing is written and the position is unchanged.
    pub fn write(&mut self, src: &[u8]) -> Result<usize> {
        if src.is_empty() {
            return Ok(0);
        }

        let end = self.pos.checked_add(src.len()).ok_or(Error::Overflow)?;
        if end > self.capacity() {
            self.grow(src.len())?;
        }

        let pos = self.pos;
        self.storage_mut()?[pos..end].copy_from_slice(src);
        self.pos = end;

        Ok(src.len())
    }

    fn grow(&mut self, incoming: usize) -> Result<()> {
        let written = self.pos;

        if self.is_external() && self.policy == OverflowPolicy::Reject {
            tracing::debug!(
                written,
                requested = incoming,
                capacity = self.capacity(),
                "external region exhausted"
            );
            return Err(Error::ShortBuffer);
        }

        let new_capacity = grown_capacity(written, incoming)?;
        tracing::trace!(
            written,
            requested = incoming,
            new_capacity,
            spill = self.is_external(),
            "growing write cursor storage"
        );

        // The written prefix comes from whatever is active, external region included
        let fresh = SharedBuffer::with_prefix(new_capacity, self.as_slice())?;
        self.storage = Storage::Owned(fresh);

        Ok(())
    }

    fn storage_mut(&mut self) -> Result<&mut [u8]> {
        let written = self.pos;
        match &mut self.storage {
            Storage::Owned(buf) => buf.make_unique(written),
            Storage::External(region) => Ok(&mut **region),
        }
    }

    /// Get the bytes written so far
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned(buf) => &buf[..self.pos],
            Storage::External(region) => &region[..self.pos],
        }
    }

    /// Zero-copy view of the bytes written so far
    #[inline]
    pub fn as_borrowed_view(&self) -> BorrowedView<'_> {
        BorrowedView::new(self.as_slice())
    }

    /// Shared handle to the bytes written so far
    ///
    /// Owned storage is shared without copying; the handle keeps the bytes it
    /// saw even if the cursor is written to or dropped afterwards. An external
    /// region has no allocation to share, so its bytes are copied.
    pub fn as_shared_buffer(&self) -> Result<SharedBuffer> {
        match &self.storage {
            Storage::Owned(buf) => Ok(buf.truncated(self.pos)),
            Storage::External(region) => SharedBuffer::copy_from_slice(&region[..self.pos]),
        }
    }

    /// Consume the cursor, returning the bytes written as a shared buffer
    #[inline]
    pub fn into_shared_buffer(self) -> Result<SharedBuffer> {
        self.as_shared_buffer()
    }

    /// Get current write position (bytes written so far)
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get current storage capacity
    #[inline]
    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Owned(buf) => buf.len(),
            Storage::External(region) => region.len(),
        }
    }

    /// Get bytes left before the next growth
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.pos
    }

    /// Check if nothing has been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Check if the cursor still writes into a caller-supplied region
    #[inline]
    pub fn is_external(&self) -> bool {
        matches!(self.storage, Storage::External(_))
    }

    /// Get the overflow policy for external regions
    #[inline]
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Reset for reuse, keeping storage and capacity
    #[inline]
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

impl fmt::Debug for WriteCursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteCursor")
            .field("position", &self.pos)
            .field("capacity", &self.capacity())
            .field("external", &self.is_external())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_factor_value() {
        let root = GROWTH_FACTOR * 1.5 - 1.0;
        assert!((root * root - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_grown_capacity() {
        assert_eq!(grown_capacity(0, 5), Ok(5));
        // 4 * 2.1574 = 8.63, rounded up
        assert_eq!(grown_capacity(4, 6), Ok(15));
        assert_eq!(grown_capacity(10, 1), Ok(23));
        assert_eq!(grown_capacity(usize::MAX, 1), Err(Error::Overflow));
    }

    #[test]
    fn test_default_reservation() {
        let cursor = WriteCursor::new().unwrap();
        assert_eq!(cursor.capacity(), 20 * 1024);
        assert_eq!(cursor.position(), 0);
        assert!(cursor.is_empty());
        assert!(!cursor.is_external());
    }

    #[test]
    fn test_write_within_reservation() {
        let mut cursor = WriteCursor::with_capacity(4).unwrap();
        let storage = cursor.as_slice().as_ptr();

        assert_eq!(cursor.write(b"ABCD"), Ok(4));
        assert_eq!(cursor.capacity(), 4);
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.as_slice().as_ptr(), storage);
        assert_eq!(&*cursor.as_borrowed_view(), b"ABCD");
    }

    #[test]
    fn test_growth_preserves_content() {
        let mut cursor = WriteCursor::with_capacity(4).unwrap();
        cursor.write(b"ABCD").unwrap();

        assert_eq!(cursor.write(b"EFGHIJ"), Ok(6));
        assert_eq!(cursor.capacity(), 15);
        assert_eq!(cursor.position(), 10);
        assert_eq!(cursor.as_slice(), b"ABCDEFGHIJ");
    }

    #[test]
    fn test_growth_from_zero_capacity() {
        let mut cursor = WriteCursor::with_capacity(0).unwrap();
        cursor.write(b"x").unwrap();
        assert_eq!(cursor.capacity(), 1);

        cursor.write(b"yz").unwrap();
        assert_eq!(cursor.capacity(), 5); // 2 + ceil(1 * 2.157)
        assert_eq!(cursor.as_slice(), b"xyz");
    }

    #[test]
    fn test_zero_length_write() {
        let mut cursor = WriteCursor::with_capacity(0).unwrap();
        assert_eq!(cursor.write(&[]), Ok(0));
        assert_eq!(cursor.capacity(), 0);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_shared_buffer_outlives_cursor() {
        let mut cursor = WriteCursor::with_capacity(8).unwrap();
        cursor.write(b"payload").unwrap();

        let buf = cursor.as_shared_buffer().unwrap();
        assert_eq!(buf.ref_count(), 2);

        drop(cursor);
        assert_eq!(buf.ref_count(), 1);
        assert_eq!(buf.as_slice(), b"payload");
    }

    #[test]
    fn test_shared_buffer_is_snapshot() {
        let mut cursor = WriteCursor::with_capacity(16).unwrap();
        cursor.write(b"abc").unwrap();

        let snapshot = cursor.as_shared_buffer().unwrap();
        cursor.write(b"def").unwrap();

        assert_eq!(snapshot.as_slice(), b"abc");
        assert_eq!(cursor.as_slice(), b"abcdef");
        assert_eq!(cursor.capacity(), 16);
        assert_eq!(snapshot.ref_count(), 1);
    }

    #[test]
    fn test_extractions_share_allocation() {
        let mut cursor = WriteCursor::with_capacity(16).unwrap();
        cursor.write(b"abc").unwrap();

        let first = cursor.as_shared_buffer().unwrap();
        let second = cursor.as_shared_buffer().unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(first.as_ptr(), cursor.as_slice().as_ptr());
        assert_eq!(first.ref_count(), 3);
    }

    #[test]
    fn test_external_region_reject() {
        let mut region = [0u8; 4];
        {
            let mut cursor = WriteCursor::from_external(&mut region);
            assert_eq!(cursor.policy(), OverflowPolicy::Reject);

            assert_eq!(cursor.write(b"ab"), Ok(2));
            assert_eq!(cursor.write(b"xyz"), Err(Error::ShortBuffer));
            assert_eq!(cursor.position(), 2);
            assert_eq!(cursor.capacity(), 4);
            assert!(cursor.is_external());

            assert_eq!(cursor.write(b"cd"), Ok(2));
            assert_eq!(cursor.write(b"e"), Err(Error::ShortBuffer));
        }
        assert_eq!(&region, b"abcd");
    }

    #[test]
    fn test_external_region_spill() {
        let mut region = [0u8; 4];
        {
            let mut cursor =
                WriteCursor::from_external_with_policy(&mut region, OverflowPolicy::Spill);
            cursor.write(b"abcd").unwrap();
            cursor.write(b"ef").unwrap();

            assert!(!cursor.is_external());
            assert_eq!(cursor.capacity(), 2 + 9); // 2 + ceil(4 * 2.157)
            assert_eq!(cursor.as_slice(), b"abcdef");
        }
        assert_eq!(&region, b"abcd");
    }

    #[test]
    fn test_external_shared_buffer_copies() {
        let mut region = [0u8; 8];
        let mut cursor = WriteCursor::from_external(&mut region);
        cursor.write(b"hi").unwrap();

        let buf = cursor.as_shared_buffer().unwrap();
        assert_eq!(buf.as_slice(), b"hi");
        assert_ne!(buf.as_ptr(), cursor.as_slice().as_ptr());
    }

    #[test]
    fn test_reset() {
        let mut cursor = WriteCursor::with_capacity(8).unwrap();
        cursor.write(b"first").unwrap();
        let first = cursor.as_shared_buffer().unwrap();

        cursor.reset();
        assert!(cursor.is_empty());
        assert_eq!(cursor.capacity(), 8);

        cursor.write(b"second").unwrap();
        assert_eq!(cursor.as_slice(), b"second");
        assert_eq!(first.as_slice(), b"first");
    }

    #[test]
    fn test_into_shared_buffer() {
        let mut cursor = WriteCursor::with_capacity(2).unwrap();
        cursor.write(&0x0102_0304_u32.to_le_bytes()).unwrap();

        let buf = cursor.into_shared_buffer().unwrap();
        assert_eq!(buf.as_slice(), &[4, 3, 2, 1]);
        assert_eq!(buf.ref_count(), 1);
    }
}
