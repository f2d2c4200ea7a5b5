//! Pattern unpacking
//!
//! Packed pattern data is a stream of tokens. A zero token ends the current
//! row; any other token addresses a channel in its low five bits and flags
//! which fields follow:
//!
//! | Bit  | Payload                |
//! |------|------------------------|
//! | 0x20 | note, instrument       |
//! | 0x40 | effect, operand        |
//! | 0x80 | volume                 |

use crate::{MAX_CHANNELS, PATTERN_ROWS, VOLUME_UNSET};

const CHANNEL_MASK: u8 = 0x1F;
const HAS_NOTE: u8 = 0x20;
const HAS_EFFECT: u8 = 0x40;
const HAS_VOLUME: u8 = 0x80;

const ROWS: usize = PATTERN_ROWS as usize;

/// One cell as stored in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawCell {
    pub note: u8,
    pub instrument: u8,
    pub volume: u8,
    pub effect: u8,
    pub operand: u8,
}

impl Default for RawCell {
    fn default() -> Self {
        Self {
            note: 0,
            instrument: 0,
            volume: VOLUME_UNSET,
            effect: 0,
            operand: 0,
        }
    }
}

/// Full 64 × 32 grid a pattern is unpacked into
#[derive(Debug, Clone)]
pub(crate) struct RawGrid {
    cells: Vec<RawCell>,
}

impl RawGrid {
    /// Allocate a grid of default cells
    pub(crate) fn try_new() -> Result<Self, std::collections::TryReserveError> {
        let len = ROWS * MAX_CHANNELS;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, RawCell::default());
        Ok(Self { cells })
    }

    pub(crate) fn get(&self, row: usize, channel: usize) -> RawCell {
        self.cells[row * MAX_CHANNELS + channel]
    }

    fn get_mut(&mut self, row: usize, channel: usize) -> &mut RawCell {
        &mut self.cells[row * MAX_CHANNELS + channel]
    }
}

/// Cursor over a packed chunk
struct TokenReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl TokenReader<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn next_pair(&mut self) -> Option<(u8, u8)> {
        let first = self.next_byte()?;
        let second = self.next_byte()?;
        Some((first, second))
    }
}

/// Scan a packed chunk into `grid`
///
/// Returns the highest channel index addressed by any token, or `None` when
/// the chunk addresses no channel at all. Payload bytes are consumed even on
/// rows past the end of the grid so the token stream stays aligned.
pub(crate) fn unpack_tokens(chunk: &[u8], grid: &mut RawGrid) -> Option<u8> {
    let mut reader = TokenReader {
        data: chunk,
        pos: 0,
    };
    let mut row = 0usize;
    let mut max_channel: Option<u8> = None;

    while let Some(token) = reader.next_byte() {
        if token == 0 {
            row += 1;
            continue;
        }

        let channel = token & CHANNEL_MASK;
        max_channel = Some(max_channel.map_or(channel, |max| max.max(channel)));

        let mut cell = (row < ROWS).then(|| grid.get(row, channel as usize));

        if token & HAS_NOTE != 0 {
            let Some((note, instrument)) = reader.next_pair() else {
                warn_truncated(row, reader.pos);
                break;
            };
            if let Some(cell) = cell.as_mut() {
                cell.note = note;
                cell.instrument = instrument;
            }
        }

        if token & HAS_EFFECT != 0 {
            let Some((effect, operand)) = reader.next_pair() else {
                warn_truncated(row, reader.pos);
                break;
            };
            if let Some(cell) = cell.as_mut() {
                cell.effect = effect;
                cell.operand = operand;
            }
        }

        if token & HAS_VOLUME != 0 {
            let Some(volume) = reader.next_byte() else {
                warn_truncated(row, reader.pos);
                break;
            };
            if let Some(cell) = cell.as_mut() {
                cell.volume = volume;
            }
        }

        if let Some(cell) = cell {
            *grid.get_mut(row, channel as usize) = cell;
        }
    }

    if row > ROWS {
        tracing::trace!("Pattern chunk ran {} rows past the grid", row - ROWS);
    }

    max_channel
}

fn warn_truncated(row: usize, pos: usize) {
    tracing::warn!(
        "Pattern token payload cut off at chunk byte {} (row {}), ignoring the rest",
        pos,
        row
    );
}

/// Channel count of an unpacked pattern
///
/// One past the highest addressed channel, never above the header's channel
/// count and never below one.
pub(crate) fn derive_channel_count(max_channel: Option<u8>, header_channels: u16) -> u16 {
    let used = max_channel.map_or(0, |max| max as u16 + 1);
    used.min(header_channels).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unpack(chunk: &[u8]) -> (RawGrid, Option<u8>) {
        let mut grid = RawGrid::try_new().unwrap();
        let max = unpack_tokens(chunk, &mut grid);
        (grid, max)
    }

    #[test]
    fn test_untouched_cells_are_default() {
        let (grid, max) = unpack(&[]);
        assert_eq!(max, None);
        assert_eq!(grid.get(0, 0), RawCell::default());
        assert_eq!(grid.get(63, 31).volume, VOLUME_UNSET);
    }

    #[test]
    fn test_full_token() {
        // channel 2: note+ins, effect, volume
        let (grid, max) = unpack(&[0xE2, 49, 3, 0x0F, 0x06, 40, 0]);
        assert_eq!(max, Some(2));
        assert_eq!(
            grid.get(0, 2),
            RawCell {
                note: 49,
                instrument: 3,
                volume: 40,
                effect: 0x0F,
                operand: 0x06,
            }
        );
    }

    #[test]
    fn test_zero_tokens_advance_rows() {
        let mut chunk = vec![0u8; 5];
        chunk.extend_from_slice(&[0x21, 60, 1]);
        let (grid, _) = unpack(&chunk);
        assert_eq!(grid.get(5, 1).note, 60);
        assert_eq!(grid.get(4, 1), RawCell::default());
    }

    #[test]
    fn test_rows_past_grid_are_consumed_not_written() {
        let mut chunk = vec![0u8; 64];
        // row 64: payload skipped, still addresses channel 7
        chunk.extend_from_slice(&[0xE7, 1, 2, 3, 4, 5]);
        let (grid, max) = unpack(&chunk);
        assert_eq!(max, Some(7));
        assert_eq!(grid.get(63, 7), RawCell::default());
    }

    #[test]
    fn test_truncated_payload_stops_scan() {
        let (grid, max) = unpack(&[0x21, 60, 1, 0, 0x63, 10]);
        assert_eq!(max, Some(3));
        assert_eq!(grid.get(0, 1).note, 60);
        assert_eq!(grid.get(1, 3), RawCell::default());
    }

    #[test]
    fn test_channel_count_derivation() {
        let (_, max) = unpack(&[0x20, 1, 1, 0x23, 1, 1, 0x25, 1, 1]);
        assert_eq!(max, Some(5));
        assert_eq!(derive_channel_count(max, 8), 6);
        assert_eq!(derive_channel_count(max, 4), 4);
        assert_eq!(derive_channel_count(None, 8), 1);
        assert_eq!(derive_channel_count(Some(31), 0), 1);
    }
}
