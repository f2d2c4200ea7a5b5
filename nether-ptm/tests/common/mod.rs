//! Synthetic PTM file construction for integration tests

#![allow(dead_code)]

use nether_tracker::{
    ByteStream, SampleCodecs, SampleLoadError, SampleLoader, StreamError, TrackerSample,
};

pub const HEADER_SIZE: usize = 608;
pub const RECORD_SIZE: usize = 80;

/// Where an instrument record's sample offset points
#[derive(Debug, Clone)]
pub enum SampleRef {
    /// Offset 0
    None,
    /// Payload appended after the pattern area
    Payload(Vec<u8>),
    /// First byte after the pattern area
    PatternEnd,
    /// Literal offset
    Raw(u32),
}

#[derive(Debug, Clone)]
pub struct InstrumentDef {
    pub type_flags: u8,
    pub filename: &'static str,
    pub name: &'static str,
    pub volume: u8,
    pub c4_speed: u16,
    pub length: u32,
    pub loop_start: u32,
    pub loop_end: u32,
    pub sample: SampleRef,
}

impl InstrumentDef {
    /// Sampled 8-bit instrument with `payload` as its stored bytes
    pub fn sampled(name: &'static str, payload: Vec<u8>) -> Self {
        Self {
            type_flags: 0x01,
            filename: "SAMPLE.SMP",
            name,
            volume: 64,
            c4_speed: 8363,
            length: payload.len() as u32,
            loop_start: 0,
            loop_end: 0,
            sample: SampleRef::Payload(payload),
        }
    }

    /// Record with no sample at all
    pub fn empty(name: &'static str) -> Self {
        Self {
            type_flags: 0x00,
            filename: "",
            name,
            volume: 0,
            c4_speed: 8363,
            length: 0,
            loop_start: 0,
            loop_end: 0,
            sample: SampleRef::None,
        }
    }
}

/// Byte-level PTM writer
#[derive(Debug, Clone)]
pub struct PtmBuilder {
    pub name: &'static str,
    pub version: u16,
    pub num_channels: u16,
    pub orders: Vec<u8>,
    pub channel_settings: [u8; 32],
    pub instruments: Vec<InstrumentDef>,
    /// Packed token streams; `None` stores a zero parapointer
    pub patterns: Vec<Option<Vec<u8>>>,
    /// Bytes written between the pattern area and the first payload
    pub gap: Vec<u8>,
}

impl Default for PtmBuilder {
    fn default() -> Self {
        Self {
            name: "Test Song",
            version: 0x0203,
            num_channels: 4,
            orders: vec![0],
            channel_settings: std::array::from_fn(|c| c as u8),
            instruments: Vec::new(),
            patterns: vec![Some(Vec::new())],
            gap: Vec::new(),
        }
    }
}

fn align16(value: usize) -> usize {
    (value + 15) & !15
}

fn put_text(out: &mut Vec<u8>, text: &str, width: usize) {
    let mut field = vec![0u8; width];
    let bytes = text.as_bytes();
    let len = bytes.len().min(width);
    field[..len].copy_from_slice(&bytes[..len]);
    out.extend_from_slice(&field);
}

impl PtmBuilder {
    /// Offset of each stored pattern and the end of the pattern area
    fn pattern_layout(&self) -> (Vec<Option<usize>>, usize) {
        let mut offset = align16(HEADER_SIZE + self.instruments.len() * RECORD_SIZE);
        let mut offsets = Vec::new();
        for pattern in &self.patterns {
            match pattern {
                Some(data) => {
                    offsets.push(Some(offset));
                    offset = align16(offset + data.len().max(1));
                }
                None => offsets.push(None),
            }
        }
        (offsets, offset)
    }

    /// Offset of the first byte after the pattern area
    pub fn pattern_end(&self) -> usize {
        self.pattern_layout().1
    }

    pub fn build(&self) -> Vec<u8> {
        let (pattern_offsets, pattern_end) = self.pattern_layout();

        let mut payload_offset = pattern_end + self.gap.len();
        let sample_offsets: Vec<u32> = self
            .instruments
            .iter()
            .map(|inst| match &inst.sample {
                SampleRef::None => 0,
                SampleRef::PatternEnd => pattern_end as u32,
                SampleRef::Raw(offset) => *offset,
                SampleRef::Payload(data) => {
                    let offset = payload_offset;
                    payload_offset += data.len();
                    offset as u32
                }
            })
            .collect();

        let mut out = Vec::new();

        // Header
        put_text(&mut out, self.name, 28);
        out.push(0x1A);
        out.extend_from_slice(&self.version.to_le_bytes());
        out.push(0);
        out.extend_from_slice(&(self.orders.len() as u16).to_le_bytes());
        out.extend_from_slice(&(self.instruments.len() as u16).to_le_bytes());
        out.extend_from_slice(&(self.patterns.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.num_channels.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(b"PTMF");
        out.extend_from_slice(&[0u8; 16]);
        out.extend_from_slice(&self.channel_settings);

        let mut orders = [0xFFu8; 256];
        orders[..self.orders.len()].copy_from_slice(&self.orders);
        out.extend_from_slice(&orders);

        for index in 0..128 {
            let pointer = pattern_offsets
                .get(index)
                .copied()
                .flatten()
                .map_or(0, |offset| (offset / 16) as u16);
            out.extend_from_slice(&pointer.to_le_bytes());
        }
        assert_eq!(out.len(), HEADER_SIZE);

        // Instrument records
        for (inst, offset) in self.instruments.iter().zip(&sample_offsets) {
            out.push(inst.type_flags);
            put_text(&mut out, inst.filename, 12);
            out.push(inst.volume);
            out.extend_from_slice(&inst.c4_speed.to_le_bytes());
            out.extend_from_slice(&[0, 0]);
            out.extend_from_slice(&offset.to_le_bytes());
            out.extend_from_slice(&inst.length.to_le_bytes());
            out.extend_from_slice(&inst.loop_start.to_le_bytes());
            out.extend_from_slice(&inst.loop_end.to_le_bytes());
            out.extend_from_slice(&[0u8; 14]);
            put_text(&mut out, inst.name, 28);
            out.extend_from_slice(b"PTMS");
        }

        // Pattern area
        for (pattern, offset) in self.patterns.iter().zip(&pattern_offsets) {
            if let (Some(data), Some(offset)) = (pattern, offset) {
                out.resize(*offset, 0);
                out.extend_from_slice(data);
            }
        }
        out.resize(pattern_end, 0);

        // Gap + payloads
        out.extend_from_slice(&self.gap);
        for inst in &self.instruments {
            if let SampleRef::Payload(data) = &inst.sample {
                out.extend_from_slice(data);
            }
        }

        out
    }
}

/// Stream wrapper that records every byte read and every seek
pub struct CountingStream<S> {
    pub inner: S,
    pub bytes_read: usize,
    pub seeks: Vec<u64>,
}

impl<S: ByteStream> CountingStream<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            bytes_read: 0,
            seeks: Vec::new(),
        }
    }
}

impl<S: ByteStream> ByteStream for CountingStream<S> {
    fn read_block(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        self.inner.read_block(buf)?;
        self.bytes_read += buf.len();
        Ok(())
    }

    fn seek_with_base_offset(&mut self, offset: u64) -> Result<(), StreamError> {
        self.seeks.push(offset);
        self.inner.seek_with_base_offset(offset)
    }

    fn position(&mut self) -> Result<u64, StreamError> {
        self.inner.position()
    }
}

/// Loader that refuses every payload
pub struct FailingLoader;

impl SampleLoader for FailingLoader {
    fn load_sample(
        &mut self,
        _stream: &mut dyn ByteStream,
        _index: usize,
        sample: &mut TrackerSample,
        _codecs: SampleCodecs,
    ) -> Result<(), SampleLoadError> {
        Err(SampleLoadError::OutOfMemory {
            bytes: sample.byte_length(),
        })
    }
}

/// Loader that records the calls it receives
#[derive(Default)]
pub struct RecordingLoader {
    pub calls: Vec<(usize, u64, SampleCodecs)>,
    pub post_processed: bool,
}

impl SampleLoader for RecordingLoader {
    fn load_sample(
        &mut self,
        stream: &mut dyn ByteStream,
        index: usize,
        _sample: &mut TrackerSample,
        codecs: SampleCodecs,
    ) -> Result<(), SampleLoadError> {
        let position = stream.position()?;
        self.calls.push((index, position, codecs));
        Ok(())
    }

    fn post_process(&mut self, _module: &mut nether_tracker::TrackerModule) {
        self.post_processed = true;
    }
}
