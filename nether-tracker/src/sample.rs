//! Sample data structures

/// Playback rate of an untransposed C-4 (Amiga standard)
pub const C4_SPEED: u32 = 8363;

/// Unified tracker sample
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSample {
    /// Sample name
    pub name: String,
    /// DOS filename the sample was imported from
    pub filename: String,
    /// Default volume (0-255)
    pub volume: u8,
    /// Finetune in 1/128 semitone steps
    pub finetune: i8,
    /// Transpose in semitones
    pub relative_note: i8,
    /// Default panning (0-255)
    pub panning: u8,
    /// Sample length in frames
    pub length: u32,
    /// Loop start in frames
    pub loop_start: u32,
    /// Loop length in frames
    pub loop_length: u32,
    /// Loop type
    pub loop_type: LoopType,
    /// Payload frames are 16 bits wide
    pub sixteen_bit: bool,
    /// Absolute file offset of the payload (0 = none)
    pub file_offset: u32,
    /// Decoded payload, filled in by a [`SampleLoader`](crate::SampleLoader)
    pub data: Option<SampleData>,
}

impl Default for TrackerSample {
    fn default() -> Self {
        Self {
            name: String::new(),
            filename: String::new(),
            volume: 255,
            finetune: 0,
            relative_note: 0,
            panning: 0x80,
            length: 0,
            loop_start: 0,
            loop_length: 0,
            loop_type: LoopType::None,
            sixteen_bit: false,
            file_offset: 0,
            data: None,
        }
    }
}

impl TrackerSample {
    /// Payload size in bytes as stored in the file
    pub fn byte_length(&self) -> usize {
        let bytes_per_frame = if self.sixteen_bit { 2 } else { 1 };
        self.length as usize * bytes_per_frame
    }

    /// Exclusive loop end in frames
    pub fn loop_end(&self) -> u32 {
        self.loop_start.saturating_add(self.loop_length)
    }
}

/// Sample loop type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopType {
    /// No loop
    #[default]
    None,
    /// Forward loop
    Forward,
    /// Ping-pong (bidirectional) loop
    PingPong,
}

/// Decoded sample payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleData {
    /// 8-bit signed frames
    I8(Vec<i8>),
    /// 16-bit signed frames
    I16(Vec<i16>),
}

impl SampleData {
    /// Number of frames
    pub fn len(&self) -> usize {
        match self {
            Self::I8(frames) => frames.len(),
            Self::I16(frames) => frames.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a sample payload is encoded in the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCodec {
    /// Plain signed PCM
    Pcm,
    /// Each frame stored as the difference to the previous frame
    Delta,
    /// Delta coding applied to the raw bytes, frames assembled afterwards
    /// (PolyTracker 16-bit samples)
    PtmDelta,
}

/// Decompose a C-4 playback rate into (finetune, relative note)
///
/// The rate is expressed in semitones against [`C4_SPEED`]; the nearest whole
/// semitone becomes the relative note and the remainder becomes finetune in
/// 1/128 semitone steps. A rate of zero maps to `(0, 0)`.
pub fn tuning_from_c4_speed(rate: u32) -> (i8, i8) {
    if rate == 0 {
        return (0, 0);
    }

    let semitones = 12.0 * (rate as f64 / C4_SPEED as f64).log2();
    let relative_note = semitones.round();
    let finetune = ((semitones - relative_note) * 128.0).round();

    (
        finetune.clamp(-128.0, 127.0) as i8,
        relative_note.clamp(-128.0, 127.0) as i8,
    )
}
