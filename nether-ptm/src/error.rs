//! Error types for PTM decoding

use std::collections::TryReserveError;
use std::io;

use nether_tracker::{SampleLoadError, StreamError};

/// Errors that can occur when decoding a PTM module
#[derive(Debug, thiserror::Error)]
pub enum PtmError {
    /// The probe did not find the "PTMF" signature
    #[error("not a PolyTracker module (missing 'PTMF' signature)")]
    UnrecognizedFormat,

    /// Version word other than 0x0203
    #[error("unsupported PTM version 0x{version:04X} (expected 0x0203)")]
    MalformedHeader { version: u16 },

    /// A buffer could not be allocated or the module has no containers
    #[error("out of memory while decoding module")]
    OutOfMemory,

    /// The stream ended before a read completed
    #[error("unexpected end of stream at offset {offset}")]
    TruncatedStream { offset: u64 },

    /// The sample loader failed to transfer a payload
    #[error("failed to transfer sample {sample}: {source}")]
    SampleTransferFailure {
        sample: usize,
        #[source]
        source: SampleLoadError,
    },

    /// A declared count does not fit the module containers
    #[error("too many {what}: {requested} (capacity {capacity})")]
    CapacityExceeded {
        what: &'static str,
        requested: usize,
        capacity: usize,
    },

    /// Any other I/O failure of the stream
    #[error("IO error: {0}")]
    Io(#[source] io::Error),
}

impl From<StreamError> for PtmError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Truncated { offset } => Self::TruncatedStream { offset },
            StreamError::Io(e) => Self::Io(e),
        }
    }
}

impl From<TryReserveError> for PtmError {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}
