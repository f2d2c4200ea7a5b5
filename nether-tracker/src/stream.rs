//! Byte stream abstraction used by every decoder
//!
//! Decoders never touch files directly; they read fixed-width little-endian
//! values and blocks through [`ByteStream`] and seek relative to the stream's
//! base offset (the start of the module inside a larger container).

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use crate::error::StreamError;

/// Sequential little-endian reader with absolute seeking
pub trait ByteStream {
    /// Fill `buf` completely or fail with [`StreamError::Truncated`]
    fn read_block(&mut self, buf: &mut [u8]) -> Result<(), StreamError>;

    /// Seek to `offset` bytes past the base offset
    fn seek_with_base_offset(&mut self, offset: u64) -> Result<(), StreamError>;

    /// Current position relative to the base offset
    fn position(&mut self) -> Result<u64, StreamError>;

    /// Read a single byte
    fn read_u8(&mut self) -> Result<u8, StreamError> {
        let mut buf = [0u8; 1];
        self.read_block(&mut buf)?;
        Ok(buf[0])
    }

    /// Read a 16-bit little-endian integer
    fn read_u16(&mut self) -> Result<u16, StreamError> {
        let mut buf = [0u8; 2];
        self.read_block(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Read a 32-bit little-endian integer
    fn read_u32(&mut self) -> Result<u32, StreamError> {
        let mut buf = [0u8; 4];
        self.read_block(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Fill `out` with consecutive 16-bit little-endian integers
    fn read_words(&mut self, out: &mut [u16]) -> Result<(), StreamError> {
        for word in out.iter_mut() {
            *word = self.read_u16()?;
        }
        Ok(())
    }

    /// Skip `count` bytes
    fn skip(&mut self, count: u64) -> Result<(), StreamError> {
        let position = self.position()?;
        self.seek_with_base_offset(position + count)
    }
}

/// [`ByteStream`] over any `Read + Seek` source
#[derive(Debug)]
pub struct IoStream<R> {
    inner: R,
    base_offset: u64,
}

impl<R: Read + Seek> IoStream<R> {
    /// Wrap a reader whose module data starts at its current beginning
    pub fn new(inner: R) -> Self {
        Self::with_base_offset(inner, 0)
    }

    /// Wrap a reader whose module data starts `base_offset` bytes in
    pub fn with_base_offset(inner: R, base_offset: u64) -> Self {
        Self { inner, base_offset }
    }
}

impl<'a> IoStream<Cursor<&'a [u8]>> {
    /// Stream over an in-memory module
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self::new(Cursor::new(data))
    }
}

impl<R: Read + Seek> ByteStream for IoStream<R> {
    fn read_block(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        let offset = self.position()?;
        self.inner.read_exact(buf).map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => StreamError::Truncated { offset },
            _ => StreamError::Io(err),
        })
    }

    fn seek_with_base_offset(&mut self, offset: u64) -> Result<(), StreamError> {
        self.inner.seek(SeekFrom::Start(self.base_offset + offset))?;
        Ok(())
    }

    fn position(&mut self) -> Result<u64, StreamError> {
        let absolute = self.inner.stream_position()?;
        Ok(absolute.saturating_sub(self.base_offset))
    }
}
