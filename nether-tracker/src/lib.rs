//! Nether-Tracker: Unified tracker module representation for Nethercore
//!
//! Every format decoder in the workspace fills the same [`TrackerModule`].
//! The mixer and the debug tools only ever see this representation, so
//! format quirks end at the decoder boundary.
//!
//! # Design
//!
//! - Containers are created up front with a fixed [`ModuleCapacity`]; a
//!   decoder resets them and fills them in place, and never grows them past
//!   that capacity
//! - Pattern cells are flat byte buffers (`note, instrument, effect slots...`)
//!   using the unified effect codes from [`effects`]
//! - Raw bytes reach a decoder through the [`ByteStream`] trait and sample
//!   payloads leave it through a [`SampleLoader`]
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  PTM File (.ptm) │   (other formats plug in the same way)
//! └────────┬─────────┘
//!          │  ByteStream
//!          ▼
//!     format decoder ──────────────► SampleLoader
//!          │                          (payload transfer)
//!          ▼
//!     ┌────────────────────────────────────────┐
//!     │         TrackerModule (unified)        │
//!     │  - header: ModuleHeader                │
//!     │  - patterns: Vec<TrackerPattern>       │
//!     │  - instruments: Vec<TrackerInstrument> │
//!     │  - samples: Vec<TrackerSample>         │
//!     └────────────────────────────────────────┘
//! ```

mod capacity;
pub mod effects;
mod error;
mod instrument;
mod loader;
mod pattern;
mod sample;
mod stream;


pub use capacity::ModuleCapacity;
pub use error::{SampleLoadError, StreamError};
pub use instrument::{NOTE_COUNT, TrackerInstrument};
pub use loader::{NullSampleLoader, PcmSampleLoader, SampleCodecs, SampleLoader};
pub use pattern::{CELL_HEADER_WIDTH, EFFECT_SLOT_WIDTH, TrackerCell, TrackerPattern};
pub use sample::{
    C4_SPEED, LoopType, SampleCodec, SampleData, TrackerSample, tuning_from_c4_speed,
};
pub use stream::{ByteStream, IoStream};

// =============================================================================
// Note Constants
// =============================================================================

/// Highest playable note (1-based, B-9)
pub const NOTE_LAST: u8 = 120;

/// Unified "key off" note value
pub const NOTE_OFF: u8 = 121;

/// Unified "note cut" note value
pub const NOTE_CUT: u8 = 122;

/// Default panning for a channel on the left of an Amiga-style layout
pub const PAN_LEFT: u8 = 0x40;

/// Default panning for a channel on the right of an Amiga-style layout
pub const PAN_RIGHT: u8 = 0xC0;

// =============================================================================
// Unified Tracker Module
// =============================================================================

/// Unified tracker module filled in place by a format decoder
#[derive(Debug, Clone, Default)]
pub struct TrackerModule {
    /// Song-level metadata
    pub header: ModuleHeader,
    /// Instrument definitions (one per declared instrument)
    pub instruments: Vec<TrackerInstrument>,
    /// Physical samples (only slots that carry audio)
    pub samples: Vec<TrackerSample>,
    /// Pattern data, indexed by pattern number
    pub patterns: Vec<TrackerPattern>,
    capacity: ModuleCapacity,
}

impl TrackerModule {
    /// Create a module whose containers are pre-allocated to `capacity`
    pub fn with_capacity(capacity: ModuleCapacity) -> Self {
        Self {
            header: ModuleHeader {
                orders: Vec::with_capacity(capacity.orders),
                ..ModuleHeader::default()
            },
            instruments: Vec::with_capacity(capacity.instruments),
            samples: Vec::with_capacity(capacity.samples),
            patterns: Vec::with_capacity(capacity.patterns),
            capacity,
        }
    }

    /// Capacity the containers were created with
    pub fn capacity(&self) -> ModuleCapacity {
        self.capacity
    }

    /// Whether the instrument, sample and pattern containers exist at all
    ///
    /// A module built with `Default` has zero capacity everywhere and cannot
    /// receive a decode.
    pub fn has_containers(&self) -> bool {
        self.capacity.instruments > 0 && self.capacity.samples > 0 && self.capacity.patterns > 0
    }

    /// Reset all content, keeping the allocated containers
    pub fn clean_up(&mut self) {
        let mut orders = std::mem::take(&mut self.header.orders);
        orders.clear();
        self.header = ModuleHeader {
            orders,
            ..ModuleHeader::default()
        };
        self.instruments.clear();
        self.samples.clear();
        self.patterns.clear();
    }

    /// Get the pattern at the given order position
    pub fn pattern_at_order(&self, order: u16) -> Option<&TrackerPattern> {
        let pattern_idx = *self.header.orders.get(order as usize)? as usize;
        self.patterns.get(pattern_idx)
    }

    /// Assign Amiga-style L R R L panning to every declared channel
    pub fn set_default_panning(&mut self) {
        self.header.panning = (0..self.header.num_channels)
            .map(|channel| match channel & 3 {
                0 | 3 => PAN_LEFT,
                _ => PAN_RIGHT,
            })
            .collect();
    }
}

/// Song-level metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleHeader {
    /// Song name
    pub name: String,
    /// Name of the tracker the module was written with
    pub tracker: String,
    /// Four-byte format signature as stored in the file
    pub signature: [u8; 4],
    /// Marker byte stored after the song name (0x1A in DOS-era formats)
    pub marker: u8,
    /// Number of entries in the order list
    pub num_orders: u16,
    /// Number of declared instruments
    pub num_instruments: u16,
    /// Number of physical samples
    pub num_samples: u16,
    /// Number of patterns
    pub num_patterns: u16,
    /// Number of channels declared by the file
    pub num_channels: u16,
    /// Initial ticks per row
    pub tempo: u8,
    /// Initial BPM
    pub speed: u16,
    /// Initial main volume (0-255)
    pub main_volume: u8,
    /// Module flags
    pub flags: ModuleFlags,
    /// Pattern order table
    pub orders: Vec<u8>,
    /// Raw per-channel settings bytes, as stored by the source format
    pub channel_settings: Vec<u8>,
    /// Per-channel panning (0-255)
    pub panning: Vec<u8>,
}

impl Default for ModuleHeader {
    fn default() -> Self {
        Self {
            name: String::new(),
            tracker: String::new(),
            signature: [0; 4],
            marker: 0,
            num_orders: 0,
            num_instruments: 0,
            num_samples: 0,
            num_patterns: 0,
            num_channels: 0,
            tempo: 6,
            speed: 125,
            main_volume: 255,
            flags: ModuleFlags::empty(),
            orders: Vec::new(),
            channel_settings: Vec::new(),
            panning: Vec::new(),
        }
    }
}

/// Module-level playback flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModuleFlags(u16);

impl ModuleFlags {
    /// Instrument volume overrides channel volume on retrigger (ST3 semantics)
    pub const ST3_NEW_INSTRUMENT: Self = Self(0x0002);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}
