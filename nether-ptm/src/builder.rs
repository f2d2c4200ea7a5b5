//! Canonical pattern construction

use nether_tracker::TrackerPattern;

use crate::error::PtmError;
use crate::parser::pattern::RawGrid;
use crate::translate::{translate_effect, translate_note, translate_volume};
use crate::{EFFECT_SLOTS, PATTERN_ROWS};

/// Build a unified pattern from the first `num_channels` columns of `grid`
///
/// Cell layout: note, instrument, volume slot (code, operand), effect slot
/// (code, operand). Nothing is retained if the cell buffer can't be allocated.
pub(crate) fn build_pattern(grid: &RawGrid, num_channels: u16) -> Result<TrackerPattern, PtmError> {
    let mut pattern = TrackerPattern::try_new(PATTERN_ROWS, num_channels, EFFECT_SLOTS)?;

    for row in 0..PATTERN_ROWS {
        for channel in 0..num_channels {
            let raw = grid.get(row as usize, channel as usize);
            let Some(cell) = pattern.cell_mut(row, channel) else {
                continue;
            };

            cell[0] = translate_note(raw.note);
            cell[1] = raw.instrument;

            if let Some((code, operand)) = translate_volume(raw.volume) {
                cell[2] = code;
                cell[3] = operand;
            }

            let (code, operand) = translate_effect(raw.effect, raw.operand);
            cell[4] = code;
            cell[5] = operand;
        }
    }

    Ok(pattern)
}
