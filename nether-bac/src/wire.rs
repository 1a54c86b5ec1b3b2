//! Little-endian cursor helpers for reading and writing BAC binary data
//!
//! All multi-byte values in a BAC file are little-endian. [`Reader`] tracks
//! its position so errors can report the exact byte offset that failed;
//! [`Writer`] supports reserving a placeholder i32 and patching it later,
//! which is how offset tables get back-filled once payload positions are
//! known.

use crate::error::BacError;

/// Bounds-checked little-endian reader over a byte slice.
pub(crate) struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(data: &'a [u8], pos: usize) -> Self {
        Reader { data, pos }
    }

    /// Current absolute byte offset.
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub(crate) fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], BacError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(BacError::UnexpectedEof(self.pos))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn skip(&mut self, len: usize) -> Result<(), BacError> {
        self.take(len).map(|_| ())
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16, BacError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn read_i16(&mut self) -> Result<i16, BacError> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, BacError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, BacError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn read_f32(&mut self) -> Result<f32, BacError> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read an f32, or 0.0 if the buffer ends first. Used by legacy-tolerant
    /// record kinds whose tables may be truncated on disk.
    pub(crate) fn read_f32_or_zero(&mut self) -> f32 {
        match self.read_f32() {
            Ok(v) => v,
            Err(_) => {
                self.pos = self.data.len();
                0.0
            }
        }
    }
}

/// Little-endian writer with reserve/patch support for offset back-filling.
pub(crate) struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Writer {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far (the absolute offset of the next write).
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub(crate) fn write_u16(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    pub(crate) fn write_i16(&mut self, val: i16) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    pub(crate) fn write_u32(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    pub(crate) fn write_i32(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    pub(crate) fn write_f32(&mut self, val: f32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Write a placeholder i32 and return its position for a later
    /// [`Writer::patch_i32`].
    pub(crate) fn reserve_i32(&mut self) -> usize {
        let pos = self.buf.len();
        self.write_i32(0);
        pos
    }

    /// Overwrite a previously reserved i32 slot.
    pub(crate) fn patch_i32(&mut self, pos: usize, val: i32) {
        self.buf[pos..pos + 4].copy_from_slice(&val.to_le_bytes());
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_sequential() {
        let data = [0x01, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x80, 0x3F];
        let mut r = Reader::new(&data, 0);
        assert_eq!(r.read_u16().unwrap(), 1);
        assert_eq!(r.read_i32().unwrap(), -1);
        assert_eq!(r.read_f32().unwrap(), 1.0);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_reader_eof_reports_position() {
        let data = [0u8; 6];
        let mut r = Reader::new(&data, 0);
        r.read_u32().unwrap();
        assert_eq!(r.read_u32(), Err(BacError::UnexpectedEof(4)));
    }

    #[test]
    fn test_reader_or_zero_consumes_tail() {
        let data = [0x00, 0x00, 0x80, 0x3F, 0x09, 0x00];
        let mut r = Reader::new(&data, 0);
        assert_eq!(r.read_f32_or_zero(), 1.0);
        // Only two bytes left: value defaults to zero, cursor pins to the end.
        assert_eq!(r.read_f32_or_zero(), 0.0);
        assert_eq!(r.remaining(), 0);
        assert_eq!(r.read_f32_or_zero(), 0.0);
    }

    #[test]
    fn test_writer_reserve_and_patch() {
        let mut w = Writer::with_capacity(16);
        w.write_u16(0xABCD);
        let slot = w.reserve_i32();
        w.write_i16(-2);
        w.patch_i32(slot, 0x11223344);
        let bytes = w.into_bytes();
        assert_eq!(bytes, [0xCD, 0xAB, 0x44, 0x33, 0x22, 0x11, 0xFE, 0xFF]);
    }
}
