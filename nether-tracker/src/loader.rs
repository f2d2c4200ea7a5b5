//! Sample payload loading
//!
//! Decoders only parse sample metadata. Once a module's tables are decoded
//! they position the stream at each payload and hand it to a
//! [`SampleLoader`], which owns the payload encoding.

use std::collections::TryReserveError;

use crate::TrackerModule;
use crate::error::SampleLoadError;
use crate::sample::{SampleCodec, SampleData, TrackerSample};
use crate::stream::ByteStream;

/// Payload codecs a format uses, by sample bit width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleCodecs {
    /// Codec of 8-bit payloads
    pub eight_bit: SampleCodec,
    /// Codec of 16-bit payloads
    pub sixteen_bit: SampleCodec,
}

impl SampleCodecs {
    /// Codec for a given sample
    pub fn for_sample(&self, sample: &TrackerSample) -> SampleCodec {
        if sample.sixteen_bit {
            self.sixteen_bit
        } else {
            self.eight_bit
        }
    }
}

/// Transfers sample payloads out of the stream
pub trait SampleLoader {
    /// Load the payload of sample slot `index`
    ///
    /// The stream is already positioned at the first payload byte.
    fn load_sample(
        &mut self,
        stream: &mut dyn ByteStream,
        index: usize,
        sample: &mut TrackerSample,
        codecs: SampleCodecs,
    ) -> Result<(), SampleLoadError>;

    /// Hook run once every payload has been transferred
    fn post_process(&mut self, _module: &mut TrackerModule) {}
}

/// Loader that leaves payloads untouched (metadata-only decoding)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSampleLoader;

impl SampleLoader for NullSampleLoader {
    fn load_sample(
        &mut self,
        _stream: &mut dyn ByteStream,
        _index: usize,
        _sample: &mut TrackerSample,
        _codecs: SampleCodecs,
    ) -> Result<(), SampleLoadError> {
        Ok(())
    }
}

/// Loader that decodes payloads into [`SampleData`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PcmSampleLoader;

impl SampleLoader for PcmSampleLoader {
    fn load_sample(
        &mut self,
        stream: &mut dyn ByteStream,
        index: usize,
        sample: &mut TrackerSample,
        codecs: SampleCodecs,
    ) -> Result<(), SampleLoadError> {
        let codec = codecs.for_sample(sample);
        let bytes = read_payload(stream, sample.byte_length())?;

        let data = if sample.sixteen_bit {
            SampleData::I16(decode_16bit(&bytes, codec))
        } else {
            SampleData::I8(decode_8bit(&bytes, codec))
        };

        tracing::trace!(
            "Loaded sample {} ({} frames, {:?})",
            index,
            data.len(),
            codec
        );
        sample.data = Some(data);
        Ok(())
    }
}

/// Largest block read from the stream in one go
const READ_CHUNK: usize = 64 * 1024;

/// Read `len` payload bytes, growing the buffer only as data arrives
///
/// Declared lengths are untrusted, so a short stream fails with
/// `Truncated` before more than one chunk beyond its end is allocated.
fn read_payload(stream: &mut dyn ByteStream, len: usize) -> Result<Vec<u8>, SampleLoadError> {
    let out_of_memory = |_: TryReserveError| SampleLoadError::OutOfMemory { bytes: len };

    let mut bytes = Vec::new();
    bytes.try_reserve_exact(len.min(READ_CHUNK)).map_err(out_of_memory)?;

    let mut chunk = [0u8; READ_CHUNK];
    while bytes.len() < len {
        let n = (len - bytes.len()).min(READ_CHUNK);
        stream.read_block(&mut chunk[..n])?;
        bytes.try_reserve(n).map_err(out_of_memory)?;
        bytes.extend_from_slice(&chunk[..n]);
    }
    Ok(bytes)
}

fn decode_8bit(bytes: &[u8], codec: SampleCodec) -> Vec<i8> {
    match codec {
        SampleCodec::Pcm => bytes.iter().map(|&b| b as i8).collect(),
        SampleCodec::Delta | SampleCodec::PtmDelta => {
            let mut acc = 0i8;
            bytes
                .iter()
                .map(|&b| {
                    acc = acc.wrapping_add(b as i8);
                    acc
                })
                .collect()
        }
    }
}

fn decode_16bit(bytes: &[u8], codec: SampleCodec) -> Vec<i16> {
    match codec {
        SampleCodec::Pcm => bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
        SampleCodec::Delta => {
            let mut acc = 0i16;
            bytes
                .chunks_exact(2)
                .map(|pair| {
                    acc = acc.wrapping_add(i16::from_le_bytes([pair[0], pair[1]]));
                    acc
                })
                .collect()
        }
        SampleCodec::PtmDelta => {
            let mut acc = 0u8;
            let undeltaed: Vec<u8> = bytes
                .iter()
                .map(|&b| {
                    acc = acc.wrapping_add(b);
                    acc
                })
                .collect();
            undeltaed
                .chunks_exact(2)
                .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
                .collect()
        }
    }
}
