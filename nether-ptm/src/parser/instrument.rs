//! Instrument record parsing

use nether_tracker::effects::vol64_to_255;
use nether_tracker::{
    ByteStream, LoopType, TrackerInstrument, TrackerModule, TrackerSample, tuning_from_c4_speed,
};

use crate::error::PtmError;
use crate::sample_flags;

use super::helpers::read_text;
use super::pointers::PatternPointers;

/// One 80-byte instrument record
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InstrumentRecord {
    pub type_flags: u8,
    pub filename: String,
    pub volume: u8,
    pub c4_speed: u16,
    pub sample_offset: u32,
    pub length: u32,
    pub loop_start: u32,
    pub loop_end: u32,
    pub name: String,
}

/// Parse a single instrument record
pub(crate) fn read_instrument_record(
    stream: &mut dyn ByteStream,
) -> Result<InstrumentRecord, PtmError> {
    // Type flags (1 byte)
    let type_flags = stream.read_u8()?;

    // DOS filename (12 bytes)
    let filename = read_text::<12>(stream)?;

    // Volume 0-64 (1 byte)
    let volume = stream.read_u8()?;

    // C4 playback rate (2 bytes)
    let c4_speed = stream.read_u16()?;

    // Sample segment, unused (2 bytes)
    stream.skip(2)?;

    // Absolute payload offset (4 bytes)
    let sample_offset = stream.read_u32()?;

    // Length, loop start, loop end in bytes (4 bytes each)
    let length = stream.read_u32()?;
    let loop_start = stream.read_u32()?;
    let loop_end = stream.read_u32()?;

    // GUS begin/loop/end + loop flags (14 bytes)
    stream.skip(14)?;

    // Instrument name (28 bytes)
    let name = read_text::<28>(stream)?;

    // "PTMS" or zero (4 bytes)
    stream.skip(4)?;

    Ok(InstrumentRecord {
        type_flags,
        filename,
        volume,
        c4_speed,
        sample_offset,
        length,
        loop_start,
        loop_end,
        name,
    })
}

impl InstrumentRecord {
    /// Category bits name a sampled instrument (not empty, OPL or MIDI-less)
    pub(crate) fn has_sample_type(&self) -> bool {
        self.type_flags & sample_flags::TYPE_MASK != 0
    }

    pub(crate) fn is_16bit(&self) -> bool {
        self.type_flags & sample_flags::SIXTEEN_BIT != 0
    }

    pub(crate) fn loop_type(&self) -> LoopType {
        if self.type_flags & sample_flags::LOOP == 0 {
            LoopType::None
        } else if self.type_flags & sample_flags::PING_PONG != 0 {
            LoopType::PingPong
        } else {
            LoopType::Forward
        }
    }

    /// Loop length in bytes
    ///
    /// The stored loop end points one unit past the last looped byte (two for
    /// 16-bit samples).
    pub(crate) fn loop_length(&self) -> u32 {
        let correction = if self.is_16bit() { 2 } else { 1 };
        let length = self.loop_end as i64 - correction - self.loop_start as i64;
        length.max(0) as u32
    }

    /// Convert to a unified sample, lengths in frames
    pub(crate) fn to_sample(&self) -> TrackerSample {
        let sixteen_bit = self.is_16bit();
        let mut length = self.length;
        let mut loop_start = self.loop_start;
        let mut loop_length = self.loop_length();

        // 16-bit payloads count bytes, frames are pairs
        if sixteen_bit {
            length >>= 1;
            loop_start >>= 1;
            loop_length >>= 1;
        }

        let (finetune, relative_note) = tuning_from_c4_speed(self.c4_speed as u32);

        TrackerSample {
            name: self.name.clone(),
            filename: self.filename.clone(),
            volume: vol64_to_255(self.volume),
            finetune,
            relative_note,
            panning: 0x80,
            length,
            loop_start,
            loop_length,
            loop_type: self.loop_type(),
            sixteen_bit,
            file_offset: self.sample_offset,
            data: None,
        }
    }
}

/// Read every declared instrument record into `module`
///
/// Sample offsets feed the pattern boundary patch in file order, before the
/// record is checked for a usable sample.
pub(crate) fn read_instruments(
    stream: &mut dyn ByteStream,
    num_instruments: usize,
    pointers: &mut PatternPointers,
    module: &mut TrackerModule,
) -> Result<(), PtmError> {
    let sample_capacity = module.capacity().samples;

    for index in 0..num_instruments {
        let record = read_instrument_record(stream)?;
        pointers.observe_sample_offset(record.sample_offset);

        let mut instrument = TrackerInstrument {
            name: record.name.clone(),
            ..Default::default()
        };

        let sample = record.to_sample();
        if record.has_sample_type() && sample.length != 0 {
            let slot = module.samples.len();
            if slot >= sample_capacity {
                return Err(PtmError::CapacityExceeded {
                    what: "samples",
                    requested: slot + 1,
                    capacity: sample_capacity,
                });
            }

            instrument.map_all_notes(slot as u16);
            module.samples.push(sample);
        } else {
            tracing::trace!(
                "Instrument {} ('{}') carries no sample (type 0x{:02X})",
                index,
                record.name,
                record.type_flags
            );
        }

        module.instruments.push(instrument);
    }

    Ok(())
}
