//! Nether-PTM: PolyTracker (PTM) module decoder for Nethercore
//!
//! Decodes PolyTracker 2.03 modules into the unified
//! [`TrackerModule`](nether_tracker::TrackerModule) shared by every format
//! decoder in the workspace.
//!
//! # PTM Format Overview
//!
//! PTM files contain:
//! - A 608-byte header: song name, counts, `"PTMF"` signature at offset 44,
//!   channel settings, a 256-entry order list and 128 pattern parapointers
//! - 80-byte instrument records with absolute sample payload offsets
//! - Packed patterns (64 rows, up to 32 channels, flag-prefixed tokens)
//! - Delta-coded sample payloads
//!
//! Parapointers count 16-byte paragraphs. The format stores no end pointer
//! for the last pattern; the first nonzero sample offset stands in for it.
//!
//! # Usage
//!
//! ```ignore
//! use nether_ptm::{identify_module, parse_ptm};
//!
//! let data = std::fs::read("song.ptm").unwrap();
//! assert_eq!(identify_module(&data), Some("PTM"));
//!
//! let module = parse_ptm(&data).unwrap();
//! println!("Song: {}", module.header.name);
//! println!("Patterns: {}", module.patterns.len());
//! ```

mod builder;
mod error;
mod parser;
mod probe;
mod translate;

pub use error::PtmError;
pub use parser::{PTM_SAMPLE_CODECS, PtmDecoder, parse_ptm};
pub use probe::{identify_module, probe};
pub use translate::{translate_effect, translate_note, translate_volume};

// =============================================================================
// Constants
// =============================================================================

/// PTM signature "PTMF"
pub const PTM_MAGIC: &[u8; 4] = b"PTMF";

/// Byte offset of the signature inside the header
pub const PTM_MAGIC_OFFSET: usize = 44;

/// Bytes needed to identify a PTM file
pub const PROBE_LENGTH: usize = PTM_MAGIC_OFFSET + PTM_MAGIC.len();

/// The only version word the decoder accepts (2.03)
pub const PTM_VERSION: u16 = 0x0203;

/// Format tag reported by the probe
pub const FORMAT_TAG: &str = "PTM";

/// Tracker name stored in decoded modules
pub const TRACKER_NAME: &str = "Polytracker";

/// Size of the fixed header including order list and pointer table
pub const HEADER_SIZE: usize = 608;

/// Size of one instrument record
pub const INSTRUMENT_RECORD_SIZE: usize = 80;

/// Length of the stored order list
pub const MAX_ORDERS: usize = 256;

/// Entries in the pattern parapointer table
pub const MAX_PATTERNS: usize = 128;

/// Channels addressable by a pattern token
pub const MAX_CHANNELS: usize = 32;

/// Rows per pattern
pub const PATTERN_ROWS: u16 = 64;

/// Effect slots per decoded cell (volume column, effect column)
pub const EFFECT_SLOTS: u8 = 2;

/// Song name length
pub const SONG_NAME_LENGTH: usize = 28;

// =============================================================================
// Note Constants
// =============================================================================

/// Note value for "note cut" in PTM pattern data
pub const NOTE_CUT: u8 = 254;

/// Volume column value meaning "no volume"
pub const VOLUME_UNSET: u8 = 0xFF;

/// Highest volume column value that sets a volume
pub const VOLUME_MAX: u8 = 64;

// =============================================================================
// Instrument Type Flags
// =============================================================================

/// Bits of the instrument type byte
pub mod sample_flags {
    /// Category mask: 0 = empty, 1 = sample, 2 = OPL, 3 = MIDI
    pub const TYPE_MASK: u8 = 0x03;
    /// Loop enabled
    pub const LOOP: u8 = 0x04;
    /// Ping-pong loop (only with LOOP)
    pub const PING_PONG: u8 = 0x08;
    /// 16-bit payload
    pub const SIXTEEN_BIT: u8 = 0x10;
}

// =============================================================================
// Effect Constants
// =============================================================================

/// PTM effect commands as stored in pattern data
pub mod effects {
    /// 0xy - Arpeggio
    pub const ARPEGGIO: u8 = 0x00;
    /// 1xx - Portamento up
    pub const PORTA_UP: u8 = 0x01;
    /// 2xx - Portamento down
    pub const PORTA_DOWN: u8 = 0x02;
    /// 3xx - Tone portamento
    pub const TONE_PORTA: u8 = 0x03;
    /// 4xy - Vibrato
    pub const VIBRATO: u8 = 0x04;
    /// 5xy - Tone portamento + volume slide
    pub const TONE_PORTA_VOL_SLIDE: u8 = 0x05;
    /// 6xy - Vibrato + volume slide
    pub const VIBRATO_VOL_SLIDE: u8 = 0x06;
    /// 7xy - Tremolo
    pub const TREMOLO: u8 = 0x07;
    /// 8xx - Set panning (not supported)
    pub const SET_PANNING: u8 = 0x08;
    /// 9xx - Sample offset
    pub const SAMPLE_OFFSET: u8 = 0x09;
    /// Axy - Volume slide
    pub const VOLUME_SLIDE: u8 = 0x0A;
    /// Bxx - Position jump
    pub const POSITION_JUMP: u8 = 0x0B;
    /// Cxx - Set volume
    pub const SET_VOLUME: u8 = 0x0C;
    /// Dxx - Pattern break
    pub const PATTERN_BREAK: u8 = 0x0D;
    /// Exy - Extended effects
    pub const EXTENDED: u8 = 0x0E;
    /// Fxx - Set speed
    pub const SET_SPEED: u8 = 0x0F;
    /// Gxx - Set global volume
    pub const SET_GLOBAL_VOLUME: u8 = 0x10;
    /// Hxy - Retrigger
    pub const RETRIGGER: u8 = 0x11;
    /// Ixy - Fine vibrato
    pub const FINE_VIBRATO: u8 = 0x12;
}
