//! Pattern and cell data structures

use std::collections::TryReserveError;

/// Bytes at the start of every cell: note, instrument
pub const CELL_HEADER_WIDTH: usize = 2;

/// Bytes per effect slot: effect code, operand
pub const EFFECT_SLOT_WIDTH: usize = 2;

/// Tracker pattern stored as one flat cell buffer
///
/// Cells are laid out row-major: `cells[(row * num_channels + channel) * cell_width]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerPattern {
    /// Number of rows
    pub num_rows: u16,
    /// Number of channels stored in this pattern
    pub num_channels: u16,
    /// Number of effect slots per cell
    pub num_effect_slots: u8,
    cells: Vec<u8>,
}

impl TrackerPattern {
    /// Allocate a zeroed pattern
    ///
    /// Allocation is fallible: on failure nothing is retained and the error is
    /// handed back to the decoder.
    pub fn try_new(
        num_rows: u16,
        num_channels: u16,
        num_effect_slots: u8,
    ) -> Result<Self, TryReserveError> {
        let cell_width = Self::cell_width_for(num_effect_slots);
        let len = num_rows as usize * num_channels as usize * cell_width;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, 0);

        Ok(Self {
            num_rows,
            num_channels,
            num_effect_slots,
            cells,
        })
    }

    const fn cell_width_for(num_effect_slots: u8) -> usize {
        CELL_HEADER_WIDTH + num_effect_slots as usize * EFFECT_SLOT_WIDTH
    }

    /// Bytes per cell
    pub fn cell_width(&self) -> usize {
        Self::cell_width_for(self.num_effect_slots)
    }

    /// Raw cell buffer
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn cell_offset(&self, row: u16, channel: u16) -> Option<usize> {
        if row >= self.num_rows || channel >= self.num_channels {
            return None;
        }
        Some((row as usize * self.num_channels as usize + channel as usize) * self.cell_width())
    }

    /// Get the cell at a specific row and channel
    pub fn cell(&self, row: u16, channel: u16) -> Option<TrackerCell<'_>> {
        let offset = self.cell_offset(row, channel)?;
        let width = self.cell_width();
        Some(TrackerCell(&self.cells[offset..offset + width]))
    }

    /// Mutable raw bytes of the cell at a specific row and channel
    pub fn cell_mut(&mut self, row: u16, channel: u16) -> Option<&mut [u8]> {
        let offset = self.cell_offset(row, channel)?;
        let width = self.cell_width();
        Some(&mut self.cells[offset..offset + width])
    }

    /// Iterate over the cells of one row
    pub fn row(&self, row: u16) -> impl Iterator<Item = TrackerCell<'_>> {
        (0..self.num_channels).filter_map(move |channel| self.cell(row, channel))
    }
}

/// Read-only view of one pattern cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerCell<'a>(&'a [u8]);

impl<'a> TrackerCell<'a> {
    /// Note value (0 = none, 1-120 = notes, 121 = off, 122 = cut)
    pub fn note(&self) -> u8 {
        self.0[0]
    }

    /// Instrument number (1-based, 0 = none)
    pub fn instrument(&self) -> u8 {
        self.0[1]
    }

    /// Effect code and operand in the given slot
    pub fn effect(&self, slot: usize) -> Option<(u8, u8)> {
        let offset = CELL_HEADER_WIDTH + slot * EFFECT_SLOT_WIDTH;
        let bytes = self.0.get(offset..offset + EFFECT_SLOT_WIDTH)?;
        Some((bytes[0], bytes[1]))
    }

    /// Check if every byte of the cell is zero
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }
}
