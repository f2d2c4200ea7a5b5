//! Unified effect codes
//!
//! Every decoder translates its native commands into this single code space.
//! Codes `0x00..=0x10` follow the familiar XM numbering, `0x30..=0x3F` are the
//! split-out extended (`Exy`) commands with `y` as operand, and `0x40..` hold
//! S3M-style commands whose operand encodes fine/extra-fine variants.
//!
//! A cell effect of `(NONE, 0)` means "no effect".

/// No effect
pub const NONE: u8 = 0x00;

// =============================================================================
// Pitch
// =============================================================================

/// Portamento up
pub const PORTA_UP: u8 = 0x01;
/// Portamento down
pub const PORTA_DOWN: u8 = 0x02;
/// Tone portamento
pub const TONE_PORTA: u8 = 0x03;
/// Vibrato (speed << 4 | depth)
pub const VIBRATO: u8 = 0x04;
/// Tone portamento + volume slide
pub const TONE_PORTA_VOL_SLIDE: u8 = 0x05;
/// Vibrato + volume slide
pub const VIBRATO_VOL_SLIDE: u8 = 0x06;
/// Arpeggio (note1 << 4 | note2)
pub const ARPEGGIO: u8 = 0x20;

// =============================================================================
// Volume and panning
// =============================================================================

/// Tremolo
pub const TREMOLO: u8 = 0x07;
/// Set panning (0-255)
pub const SET_PANNING: u8 = 0x08;
/// Volume slide (XM semantics)
pub const VOLUME_SLIDE: u8 = 0x0A;
/// Set volume (0-255)
pub const SET_VOLUME: u8 = 0x0C;
/// Set global volume (0-255)
pub const SET_GLOBAL_VOLUME: u8 = 0x10;
/// Global volume slide
pub const GLOBAL_VOLUME_SLIDE: u8 = 0x11;

// =============================================================================
// Sample and flow control
// =============================================================================

/// Sample offset (operand × 256)
pub const SAMPLE_OFFSET: u8 = 0x09;
/// Jump to order
pub const POSITION_JUMP: u8 = 0x0B;
/// Break to row in next pattern
pub const PATTERN_BREAK: u8 = 0x0D;
/// Set speed (ticks per row) or tempo (BPM) depending on operand
pub const SET_SPEED: u8 = 0x0F;
/// Key off
pub const KEY_OFF: u8 = 0x14;
/// Multi retrigger (volume change << 4 | interval)
pub const MULTI_RETRIG: u8 = 0x1B;

// =============================================================================
// Extended commands (Exy split into 0x30 + x, operand y)
// =============================================================================

/// Base code for the split-out extended commands
pub const EXTENDED_BASE: u8 = 0x30;
/// Fine portamento up
pub const FINE_PORTA_UP: u8 = 0x31;
/// Fine portamento down
pub const FINE_PORTA_DOWN: u8 = 0x32;
/// Glissando control
pub const GLISSANDO: u8 = 0x33;
/// Vibrato waveform
pub const VIBRATO_WAVEFORM: u8 = 0x34;
/// Set finetune
pub const SET_FINETUNE: u8 = 0x35;
/// Pattern loop
pub const PATTERN_LOOP: u8 = 0x36;
/// Tremolo waveform
pub const TREMOLO_WAVEFORM: u8 = 0x37;
/// Coarse panning; decoders renumber it to [`SET_PANNING`]
pub const COARSE_PANNING: u8 = 0x38;
/// Retrigger note
pub const RETRIGGER: u8 = 0x39;
/// Fine volume slide up
pub const FINE_VOLUME_UP: u8 = 0x3A;
/// Fine volume slide down
pub const FINE_VOLUME_DOWN: u8 = 0x3B;
/// Note cut after x ticks
pub const NOTE_CUT: u8 = 0x3C;
/// Note delay
pub const NOTE_DELAY: u8 = 0x3D;
/// Pattern delay (rows)
pub const PATTERN_DELAY: u8 = 0x3E;

// =============================================================================
// S3M-style commands
// =============================================================================

/// Portamento up, `Ex`/`Fx` operands select extra-fine/fine slides
pub const S3M_PORTA_UP: u8 = 0x47;
/// Portamento down, `Ex`/`Fx` operands select extra-fine/fine slides
pub const S3M_PORTA_DOWN: u8 = 0x48;
/// Volume slide, `xF`/`Fx` operands select fine slides
pub const S3M_VOLUME_SLIDE: u8 = 0x49;
/// Fine vibrato
pub const FINE_VIBRATO: u8 = 0x4A;

/// Scale a 0-64 volume to the unified 0-255 range
///
/// `floor(v * 255 / 64)` truncated to a byte, so inputs above 64 wrap.
pub const fn vol64_to_255(volume: u8) -> u8 {
    ((volume as u32 * 255 / 64) & 0xFF) as u8
}

/// Short display name for a unified effect code
pub fn effect_name(code: u8) -> Option<&'static str> {
    let name = match code {
        PORTA_UP => "porta up",
        PORTA_DOWN => "porta down",
        TONE_PORTA => "tone porta",
        VIBRATO => "vibrato",
        TONE_PORTA_VOL_SLIDE => "tone porta + vol slide",
        VIBRATO_VOL_SLIDE => "vibrato + vol slide",
        TREMOLO => "tremolo",
        SET_PANNING => "set panning",
        SAMPLE_OFFSET => "sample offset",
        VOLUME_SLIDE => "volume slide",
        POSITION_JUMP => "position jump",
        SET_VOLUME => "set volume",
        PATTERN_BREAK => "pattern break",
        SET_SPEED => "set speed",
        SET_GLOBAL_VOLUME => "set global volume",
        GLOBAL_VOLUME_SLIDE => "global volume slide",
        KEY_OFF => "key off",
        MULTI_RETRIG => "multi retrig",
        ARPEGGIO => "arpeggio",
        EXTENDED_BASE => "extended 0",
        FINE_PORTA_UP => "fine porta up",
        FINE_PORTA_DOWN => "fine porta down",
        GLISSANDO => "glissando",
        VIBRATO_WAVEFORM => "vibrato waveform",
        SET_FINETUNE => "set finetune",
        PATTERN_LOOP => "pattern loop",
        TREMOLO_WAVEFORM => "tremolo waveform",
        COARSE_PANNING => "coarse panning",
        RETRIGGER => "retrigger",
        FINE_VOLUME_UP => "fine volume up",
        FINE_VOLUME_DOWN => "fine volume down",
        NOTE_CUT => "note cut",
        NOTE_DELAY => "note delay",
        PATTERN_DELAY => "pattern delay",
        0x3F => "extended F",
        S3M_PORTA_UP => "s3m porta up",
        S3M_PORTA_DOWN => "s3m porta down",
        S3M_VOLUME_SLIDE => "s3m volume slide",
        FINE_VIBRATO => "fine vibrato",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vol64_to_255_endpoints() {
        assert_eq!(vol64_to_255(0), 0);
        assert_eq!(vol64_to_255(64), 255);
    }

    #[test]
    fn test_vol64_to_255_floors() {
        assert_eq!(vol64_to_255(1), 3); // 255 / 64 = 3.98
        assert_eq!(vol64_to_255(32), 127);
        assert_eq!(vol64_to_255(63), 251);
    }

    #[test]
    fn test_vol64_to_255_wraps_above_64() {
        assert_eq!(vol64_to_255(0x41), 2);
        assert_eq!(vol64_to_255(0x50), 62);
        assert_eq!(vol64_to_255(0x80), 254);
        assert_eq!(vol64_to_255(0xFF), 248);
    }

    #[test]
    fn test_effect_names() {
        assert_eq!(effect_name(SET_VOLUME), Some("set volume"));
        assert_eq!(effect_name(NONE), None);
        assert_eq!(effect_name(0xEE), None);
    }
}
