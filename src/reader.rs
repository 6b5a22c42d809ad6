//! Bounded read cursor
//!
//! Reads never fail: a request past the end is truncated to what is left and
//! the shorter count is returned. Callers that need an exact amount compare
//! the result with what they asked for, or use [`ReadCursor::read_exact`].

use crate::buffers::{BorrowedView, SharedBuffer};
use crate::error::{Error, Result};

/// Read cursor over borrowed bytes
///
/// Never allocates on the read path and never owns its input.
#[derive(Debug)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    /// Create a cursor over the given bytes
    #[inline]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Create a cursor over a borrowed view
    #[inline]
    pub const fn from_view(view: BorrowedView<'a>) -> Self {
        Self::new(view.as_slice())
    }

    /// Create a cursor borrowing a shared buffer
    ///
    /// Takes no reference on the allocation.
    #[inline]
    pub fn from_shared(buf: &'a SharedBuffer) -> Self {
        Self::new(buf.as_slice())
    }

    /// Copy up to `dst.len()` bytes into `dst`
    ///
    /// Returns the number of bytes copied, which is smaller than requested
    /// when the input runs out and 0 once it is exhausted.
    #[inline]
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let to_copy = self.remaining().min(dst.len());
        dst[..to_copy].copy_from_slice(&self.buf[self.pos..self.pos + to_copy]);
        self.pos += to_copy;
        to_copy
    }

    /// Fill `dst` completely or read nothing
    #[inline]
    pub fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
        if dst.len() > self.remaining() {
            return Err(Error::UnexpectedEof);
        }
        self.read(dst);
        Ok(())
    }

    /// Skip up to `n` bytes, returning how many were skipped
    #[inline]
    pub fn skip(&mut self, n: usize) -> usize {
        let skipped = self.remaining().min(n);
        self.pos += skipped;
        skipped
    }

    /// Peek at up to `n` unread bytes without advancing
    #[inline]
    pub fn peek(&self, n: usize) -> &'a [u8] {
        let len = self.remaining().min(n);
        &self.buf[self.pos..self.pos + len]
    }

    /// Zero-copy view of the unread bytes
    #[inline]
    pub fn as_borrowed_view(&self) -> BorrowedView<'a> {
        BorrowedView::new(&self.buf[self.pos..])
    }

    /// Copy of the unread bytes in a fresh shared allocation
    #[inline]
    pub fn as_shared_buffer(&self) -> Result<SharedBuffer> {
        SharedBuffer::copy_from_slice(&self.buf[self.pos..])
    }

    /// Get current read position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get total size of the input range
    #[inline]
    pub fn size(&self) -> usize {
        self.buf.len()
    }

    /// Get remaining unread bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if every byte has been consumed
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.buf.len()
    }
}

impl<'a> From<&'a [u8]> for ReadCursor<'a> {
    #[inline]
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

impl<'a> From<BorrowedView<'a>> for ReadCursor<'a> {
    #[inline]
    fn from(view: BorrowedView<'a>) -> Self {
        Self::from_view(view)
    }
}

impl<'a> From<&'a SharedBuffer> for ReadCursor<'a> {
    #[inline]
    fn from(buf: &'a SharedBuffer) -> Self {
        Self::from_shared(buf)
    }
}
