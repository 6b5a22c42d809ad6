//! memcursor: in-memory byte cursors for binary serialization
//!
//! This crate provides the lowest-level I/O primitive of a binary
//! serializer: a growable [`WriteCursor`] that encoders append bytes to, and a
//! bounded [`ReadCursor`] that decoders pull bytes from.
//!
//! # Storage
//!
//! ```text
//! WriteCursor                     ReadCursor
//! +------------------+-------+    +---------+--------------+
//! | written (pos)    | spare |    | consumed| unread       |
//! +------------------+-------+    +---------+--------------+
//! ^ SharedBuffer or &mut [u8]     ^ &[u8], BorrowedView or &SharedBuffer
//! ```
//!
//! - An owned write cursor grows by `incoming + written * GROWTH_FACTOR`
//!   and never loses bytes across reallocation
//! - Written bytes are extracted as a reference-counted [`SharedBuffer`]
//!   (may outlive the cursor) or a zero-copy [`BorrowedView`]
//! - Reads past the end are truncated, never failed: the returned count is
//!   the only "not enough data" signal
//! - Allocation failure surfaces as [`Error::OutOfMemory`] instead of aborting
//! - `no_std` with `alloc`; `std::io` traits with the `std` feature
//!
//! # Example
//!
//! ```rust
//! use memcursor::*;
//!
//! let mut writer = WriteCursor::with_capacity(4)?;
//! writer.write(b"ABCD")?;
//! writer.write(b"EFGHIJ")?; // grows
//! let buf = writer.as_shared_buffer()?;
//!
//! let mut reader = ReadCursor::from_shared(&buf);
//! let mut head = [0u8; 3];
//! assert_eq!(reader.read(&mut head), 3);
//! assert_eq!(&head, b"ABC");
//!
//! let mut rest = [0u8; 16];
//! assert_eq!(reader.read(&mut rest), 7); // short read
//! assert_eq!(reader.read(&mut rest), 0);
//! # Ok::<(), memcursor::Error>(())
//! ```

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod buffers;
pub mod error;
#[cfg(feature = "std")]
pub mod io;
pub mod reader;
pub mod writer;

// Re-export main types
pub use buffers::{BorrowedView, SharedBuffer};
pub use error::Error;
pub use reader::ReadCursor;
pub use writer::{OverflowPolicy, WriteCursor};

/// Default reservation of an owned write cursor (20 KiB)
pub const DEFAULT_RESERVED_CAPACITY: usize = 20 * 1024;

/// Multiplier applied to the bytes already written when a write cursor grows
///
/// Equal to `(1 + sqrt(5)) / 1.5`.
pub const GROWTH_FACTOR: f64 = 2.157_378_651_666_526;
