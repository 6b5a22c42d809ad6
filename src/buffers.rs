//! Storage primitives backing the cursors
//!
//! [`SharedBuffer`] is a reference-counted heap allocation that can be handed
//! out by reference and outlives whoever created it. [`BorrowedView`] is a
//! plain pointer + length over someone else's bytes, tied to their lifetime.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

use crate::error::{Error, Result};

/// Reference-counted byte buffer with shared ownership
///
/// Cloning shares the allocation; it is freed when the last clone drops.
/// A buffer may cover only a sub-range of its allocation.
#[derive(Clone)]
pub struct SharedBuffer {
    data: Arc<Vec<u8>>,
    start: usize,
    len: usize,
}

impl SharedBuffer {
    /// Allocate a zeroed buffer of `size` bytes
    ///
    /// Returns `Error::OutOfMemory` instead of aborting when the allocator
    /// cannot satisfy the request.
    #[inline]
    pub fn allocate(size: usize) -> Result<Self> {
        Self::with_prefix(size, &[])
    }

    /// Allocate a buffer holding a copy of `bytes`
    #[inline]
    pub fn copy_from_slice(bytes: &[u8]) -> Result<Self> {
        Self::with_prefix(bytes.len(), bytes)
    }

    /// Allocate `size` bytes starting with a copy of `prefix`, zeroed after it
    pub(crate) fn with_prefix(size: usize, prefix: &[u8]) -> Result<Self> {
        debug_assert!(prefix.len() <= size);

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|_| Error::OutOfMemory)?;
        bytes.extend_from_slice(prefix);
        bytes.resize(size, 0);

        Ok(Self {
            data: Arc::new(bytes),
            start: 0,
            len: size,
        })
    }

    /// Get the buffer contents
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.start..self.start + self.len]
    }

    /// Get a raw pointer to the first byte
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.as_slice().as_ptr()
    }

    /// Size in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer holds no bytes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the contents as a view
    #[inline]
    pub fn view(&self) -> BorrowedView<'_> {
        BorrowedView::new(self.as_slice())
    }

    /// Number of live handles sharing this allocation
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }

    /// Check whether two buffers share the same allocation
    #[inline]
    pub fn ptr_eq(&self, other: &SharedBuffer) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// New handle to the same allocation limited to the first `len` bytes
    #[inline]
    pub(crate) fn truncated(&self, len: usize) -> Self {
        debug_assert!(len <= self.len);
        Self {
            data: Arc::clone(&self.data),
            start: self.start,
            len,
        }
    }

    /// Mutable access to the contents
    ///
    /// If other handles share the allocation, the leading `keep` bytes are
    /// first moved into a private allocation of the same size so the other
    /// handles never observe the mutation.
    pub(crate) fn make_unique(&mut self, keep: usize) -> Result<&mut [u8]> {
        if Arc::get_mut(&mut self.data).is_none() {
            *self = Self::with_prefix(self.len, &self.as_slice()[..keep])?;
        }

        // Sole owner at this point, so make_mut never clones
        let (start, len) = (self.start, self.len);
        Ok(&mut Arc::make_mut(&mut self.data)[start..start + len])
    }
}

impl Deref for SharedBuffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for SharedBuffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for SharedBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for SharedBuffer {}

impl fmt::Debug for SharedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("len", &self.len)
            .field("refs", &self.ref_count())
            .finish()
    }
}

/// Non-owning view over bytes stored elsewhere
///
/// The lifetime ties the view to its storage, so it cannot outlive it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BorrowedView<'a> {
    data: &'a [u8],
}

impl<'a> BorrowedView<'a> {
    /// Create a view over the given bytes
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Create an empty view
    #[inline]
    pub const fn empty() -> Self {
        Self { data: &[] }
    }

    /// Get a raw pointer to the first byte
    #[inline]
    pub const fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    /// Size in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the view covers no bytes
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the viewed bytes with the full storage lifetime
    #[inline]
    pub const fn as_slice(&self) -> &'a [u8] {
        self.data
    }
}

impl Deref for BorrowedView<'_> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.data
    }
}

impl AsRef<[u8]> for BorrowedView<'_> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}

impl<'a> From<&'a [u8]> for BorrowedView<'a> {
    #[inline]
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a SharedBuffer> for BorrowedView<'a> {
    #[inline]
    fn from(buf: &'a SharedBuffer) -> Self {
        buf.view()
    }
}
