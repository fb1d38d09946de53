use embedded_io::Read;
use heapless::Vec;

use crate::helpers::find_subslice;

/// Fixed capacity receive buffer.
///
/// The last of the `N` bytes is never filled, so at most `N - 1` response
/// bytes are held at any time. Writes past that are truncated.
#[derive(Debug, Default)]
pub struct ReceiveBuffer<const N: usize> {
    buf: Vec<u8, N>,
}

impl<const N: usize> ReceiveBuffer<N> {
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Number of response bytes the buffer can hold.
    pub const fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    /// Current write position.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes that can still be written before the buffer is full.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Move the write position back to the start.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        find_subslice(&self.buf, needle)
    }

    /// Read at most `max` bytes from `reader` into the buffer, after the
    /// bytes already held. `max` is clamped to [`remaining`](Self::remaining).
    ///
    /// Returns the number of bytes actually read.
    pub fn fill_from<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        max: usize,
    ) -> Result<usize, R::Error> {
        let start = self.buf.len();
        let max = max.min(self.remaining());
        if max == 0 || self.buf.resize(start + max, 0).is_err() {
            return Ok(0);
        }

        match reader.read(&mut self.buf[start..]) {
            Ok(read) => {
                self.buf.truncate(start + read);
                Ok(read)
            }
            Err(e) => {
                self.buf.truncate(start);
                Err(e)
            }
        }
    }
}
