//! Instrument data structures

/// Number of entries in an instrument's note→sample table
pub const NOTE_COUNT: usize = 120;

/// Unified tracker instrument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerInstrument {
    /// Instrument name
    pub name: String,
    /// Number of physical samples this instrument plays (0 = silent)
    pub num_samples: u8,
    /// Note→sample mapping table, values index `TrackerModule::samples`
    pub note_sample_table: [u16; NOTE_COUNT],
}

impl Default for TrackerInstrument {
    fn default() -> Self {
        Self {
            name: String::new(),
            num_samples: 0,
            note_sample_table: [0; NOTE_COUNT],
        }
    }
}

impl TrackerInstrument {
    /// Map every note to one physical sample
    pub fn map_all_notes(&mut self, sample: u16) {
        self.num_samples = 1;
        self.note_sample_table = [sample; NOTE_COUNT];
    }

    /// Get the physical sample index for a given note (0-based note index)
    pub fn sample_for_note(&self, note: u8) -> Option<u16> {
        if self.num_samples == 0 {
            return None;
        }
        self.note_sample_table.get(note as usize).copied()
    }
}
