//! Error types shared by decoders and sample loaders

use std::io;

/// Errors raised by a [`ByteStream`](crate::ByteStream)
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A read ran past the end of the underlying data
    #[error("unexpected end of stream at offset {offset}")]
    Truncated { offset: u64 },

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by a [`SampleLoader`](crate::SampleLoader)
#[derive(Debug, thiserror::Error)]
pub enum SampleLoadError {
    /// Reading the payload from the stream failed
    #[error("failed to read sample payload: {0}")]
    Stream(#[from] StreamError),

    /// The decoded payload buffer could not be allocated
    #[error("sample payload of {bytes} bytes could not be allocated")]
    OutOfMemory { bytes: usize },
}
