//! PTM → unified effect translation

use nether_tracker::effects as unified;
use nether_tracker::effects::vol64_to_255;

use crate::{NOTE_CUT, VOLUME_MAX, effects};

/// Translate a PTM effect command into the unified effect space
///
/// Pure function of `(code, operand)`; unknown commands become `(0, 0)`.
pub fn translate_effect(code: u8, operand: u8) -> (u8, u8) {
    match code {
        // 0xy with no operand is "no effect"
        effects::ARPEGGIO if operand == 0 => (unified::NONE, 0),
        effects::ARPEGGIO => (unified::ARPEGGIO, operand),

        effects::PORTA_UP => (unified::S3M_PORTA_UP, operand),
        effects::PORTA_DOWN => (unified::S3M_PORTA_DOWN, operand),
        effects::TONE_PORTA => (unified::TONE_PORTA, operand),
        effects::VIBRATO => (unified::VIBRATO, operand),
        effects::TONE_PORTA_VOL_SLIDE => (unified::TONE_PORTA_VOL_SLIDE, operand),
        effects::VIBRATO_VOL_SLIDE => (unified::VIBRATO_VOL_SLIDE, operand),
        effects::TREMOLO => (unified::TREMOLO, operand),
        effects::SAMPLE_OFFSET => (unified::SAMPLE_OFFSET, operand),
        effects::VOLUME_SLIDE => (unified::S3M_VOLUME_SLIDE, operand),
        effects::POSITION_JUMP => (unified::POSITION_JUMP, operand),
        effects::SET_VOLUME => (unified::SET_VOLUME, vol64_to_255(operand)),
        effects::PATTERN_BREAK => (unified::PATTERN_BREAK, operand),
        effects::EXTENDED => translate_extended(operand),
        effects::SET_SPEED => (unified::SET_SPEED, operand),
        effects::SET_GLOBAL_VOLUME => (unified::SET_GLOBAL_VOLUME, vol64_to_255(operand)),
        effects::RETRIGGER => (unified::MULTI_RETRIG, operand),
        effects::FINE_VIBRATO => (unified::FINE_VIBRATO, operand),

        _ => (unified::NONE, 0),
    }
}

/// Split an `Exy` command into `0x30 + x` with operand `y`
fn translate_extended(operand: u8) -> (u8, u8) {
    let code = unified::EXTENDED_BASE + (operand >> 4);
    let value = operand & 0x0F;

    if code == unified::COARSE_PANNING {
        (unified::SET_PANNING, value << 4)
    } else {
        (code, value)
    }
}

/// Translate the volume column into a set-volume effect
///
/// Values above 64 (including the 0xFF "unset" marker) carry no volume.
pub fn translate_volume(volume: u8) -> Option<(u8, u8)> {
    (volume <= VOLUME_MAX).then(|| (unified::SET_VOLUME, vol64_to_255(volume)))
}

/// Translate a PTM note value into the unified note space
pub fn translate_note(note: u8) -> u8 {
    if note == NOTE_CUT {
        nether_tracker::NOTE_CUT
    } else {
        note
    }
}
