//! `std::io` adapters for the cursors

use std::io;

use crate::reader::ReadCursor;
use crate::writer::WriteCursor;

impl io::Write for WriteCursor<'_> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        WriteCursor::write(self, buf).map_err(io::Error::from)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for ReadCursor<'_> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(ReadCursor::read(self, buf))
    }

    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        ReadCursor::read_exact(self, buf).map_err(io::Error::from)
    }
}

impl io::BufRead for ReadCursor<'_> {
    #[inline]
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.peek(self.remaining()))
    }

    #[inline]
    fn consume(&mut self, amt: usize) {
        self.skip(amt);
    }
}
