//! Plain-text rendering of decoded modules

use std::fmt::Write;

use nether_tracker::effects::effect_name;
use nether_tracker::{
    LoopType, NOTE_CUT, NOTE_LAST, NOTE_OFF, TrackerCell, TrackerModule, TrackerPattern,
};
use serde::Serialize;

const NOTE_NAMES: [&str; 12] = [
    "C-", "C#", "D-", "D#", "E-", "F-", "F#", "G-", "G#", "A-", "A#", "B-",
];

/// Render a note value as `C-4`, `===` (off) or `^^^` (cut)
pub fn note_label(note: u8) -> String {
    match note {
        0 => "---".to_string(),
        1..=NOTE_LAST => {
            let index = note - 1;
            format!("{}{}", NOTE_NAMES[(index % 12) as usize], index / 12)
        }
        NOTE_OFF => "===".to_string(),
        NOTE_CUT => "^^^".to_string(),
        _ => "???".to_string(),
    }
}

fn slot_label(slot: Option<(u8, u8)>) -> String {
    match slot {
        Some((0, 0)) | None => "....".to_string(),
        Some((code, operand)) => format!("{:02X}{:02X}", code, operand),
    }
}

/// One cell as `note ins vol-slot fx-slot`
pub fn cell_label(cell: &TrackerCell<'_>) -> String {
    let instrument = match cell.instrument() {
        0 => "..".to_string(),
        i => format!("{:02}", i),
    };
    format!(
        "{} {} {} {}",
        note_label(cell.note()),
        instrument,
        slot_label(cell.effect(0)),
        slot_label(cell.effect(1))
    )
}

/// Multi-line dump of one pattern
pub fn render_pattern(index: usize, pattern: &TrackerPattern) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Pattern {} ({} rows, {} channels)",
        index, pattern.num_rows, pattern.num_channels
    );

    for row in 0..pattern.num_rows {
        let cells: Vec<String> = pattern.row(row).map(|cell| cell_label(&cell)).collect();
        let _ = writeln!(out, "{:02} | {}", row, cells.join(" | "));
    }
    out
}

/// Effect codes used anywhere in the module, with their names
pub fn used_effects(module: &TrackerModule) -> Vec<(u8, &'static str)> {
    let mut seen = [false; 256];
    for pattern in &module.patterns {
        for row in 0..pattern.num_rows {
            for cell in pattern.row(row) {
                for slot in 0..pattern.num_effect_slots as usize {
                    if let Some((code, _)) = cell.effect(slot) {
                        seen[code as usize] = true;
                    }
                }
            }
        }
    }

    (1..=255u8)
        .filter(|&code| seen[code as usize])
        .map(|code| (code, effect_name(code).unwrap_or("unknown")))
        .collect()
}

fn loop_label(loop_type: LoopType) -> &'static str {
    match loop_type {
        LoopType::None => "none",
        LoopType::Forward => "forward",
        LoopType::PingPong => "ping-pong",
    }
}

/// Human-readable module overview
pub fn render_info(module: &TrackerModule) -> String {
    let header = &module.header;
    let mut out = String::new();

    let _ = writeln!(out, "Song:        {}", header.name);
    let _ = writeln!(out, "Tracker:     {}", header.tracker);
    let _ = writeln!(out, "Channels:    {}", header.num_channels);
    let _ = writeln!(out, "Orders:      {:?}", header.orders);
    let _ = writeln!(out, "Patterns:    {}", module.patterns.len());
    let _ = writeln!(
        out,
        "Tempo/Speed: {}/{}  Main volume: {}",
        header.tempo, header.speed, header.main_volume
    );

    let _ = writeln!(out, "\nInstruments ({}):", module.instruments.len());
    for (index, instrument) in module.instruments.iter().enumerate() {
        let sample = instrument
            .sample_for_note(0)
            .map_or_else(|| "-".to_string(), |s| s.to_string());
        let _ = writeln!(out, "  {:02} {:<28} sample {}", index + 1, instrument.name, sample);
    }

    let _ = writeln!(out, "\nSamples ({}):", module.samples.len());
    for (index, sample) in module.samples.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:02} {:<12} {:>7} frames {:>2}-bit loop {} ({}-{}) vol {} tune {:+}/{:+}",
            index,
            sample.filename,
            sample.length,
            if sample.sixteen_bit { 16 } else { 8 },
            loop_label(sample.loop_type),
            sample.loop_start,
            sample.loop_end(),
            sample.volume,
            sample.relative_note,
            sample.finetune
        );
    }

    let effects = used_effects(module);
    if !effects.is_empty() {
        let _ = writeln!(out, "\nEffects used:");
        for (code, name) in effects {
            let _ = writeln!(out, "  {:02X} {}", code, name);
        }
    }

    out
}

// =============================================================================
// JSON summary
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ModuleSummary {
    pub name: String,
    pub tracker: String,
    pub channels: u16,
    pub tempo: u8,
    pub speed: u16,
    pub main_volume: u8,
    pub orders: Vec<u8>,
    pub panning: Vec<u8>,
    pub instruments: Vec<InstrumentSummary>,
    pub samples: Vec<SampleSummary>,
    pub patterns: Vec<PatternSummary>,
}

#[derive(Debug, Serialize)]
pub struct InstrumentSummary {
    pub name: String,
    pub sample: Option<u16>,
}

#[derive(Debug, Serialize)]
pub struct SampleSummary {
    pub name: String,
    pub filename: String,
    pub length: u32,
    pub loop_start: u32,
    pub loop_length: u32,
    pub loop_end: u32,
    pub loop_type: &'static str,
    pub sixteen_bit: bool,
    pub volume: u8,
    pub finetune: i8,
    pub relative_note: i8,
    pub loaded_frames: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PatternSummary {
    pub rows: u16,
    pub channels: u16,
    pub used_cells: usize,
}

impl ModuleSummary {
    pub fn from_module(module: &TrackerModule) -> Self {
        let header = &module.header;
        Self {
            name: header.name.clone(),
            tracker: header.tracker.clone(),
            channels: header.num_channels,
            tempo: header.tempo,
            speed: header.speed,
            main_volume: header.main_volume,
            orders: header.orders.clone(),
            panning: header.panning.clone(),
            instruments: module
                .instruments
                .iter()
                .map(|instrument| InstrumentSummary {
                    name: instrument.name.clone(),
                    sample: instrument.sample_for_note(0),
                })
                .collect(),
            samples: module
                .samples
                .iter()
                .map(|sample| SampleSummary {
                    name: sample.name.clone(),
                    filename: sample.filename.clone(),
                    length: sample.length,
                    loop_start: sample.loop_start,
                    loop_length: sample.loop_length,
                    loop_end: sample.loop_end(),
                    loop_type: loop_label(sample.loop_type),
                    sixteen_bit: sample.sixteen_bit,
                    volume: sample.volume,
                    finetune: sample.finetune,
                    relative_note: sample.relative_note,
                    loaded_frames: sample.data.as_ref().map(|data| data.len()),
                })
                .collect(),
            patterns: module
                .patterns
                .iter()
                .map(|pattern| PatternSummary {
                    rows: pattern.num_rows,
                    channels: pattern.num_channels,
                    used_cells: (0..pattern.num_rows)
                        .flat_map(|row| pattern.row(row))
                        .filter(|cell| !cell.is_empty())
                        .count(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nether_tracker::{ModuleCapacity, TrackerInstrument, TrackerSample};

    fn module_with_pattern() -> TrackerModule {
        let mut module = TrackerModule::with_capacity(ModuleCapacity::default());
        module.header.name = "demo".to_string();
        module.header.num_channels = 2;

        let mut pattern = TrackerPattern::try_new(4, 2, 2).unwrap();
        pattern
            .cell_mut(1, 0)
            .unwrap()
            .copy_from_slice(&[49, 1, 0x0C, 255, 0x0F, 6]);
        module.patterns.push(pattern);

        let mut instrument = TrackerInstrument {
            name: "lead".to_string(),
            ..Default::default()
        };
        instrument.map_all_notes(0);
        module.instruments.push(instrument);
        module.samples.push(TrackerSample {
            filename: "LEAD.SMP".to_string(),
            length: 10,
            loop_type: LoopType::Forward,
            loop_start: 2,
            loop_length: 6,
            ..Default::default()
        });
        module
    }

    #[test]
    fn test_note_labels() {
        assert_eq!(note_label(0), "---");
        assert_eq!(note_label(1), "C-0");
        assert_eq!(note_label(49), "C-4");
        assert_eq!(note_label(50), "C#4");
        assert_eq!(note_label(NOTE_OFF), "===");
        assert_eq!(note_label(NOTE_CUT), "^^^");
        assert_eq!(note_label(200), "???");
    }

    #[test]
    fn test_render_pattern_rows() {
        let module = module_with_pattern();
        let text = render_pattern(0, &module.patterns[0]);
        assert!(text.starts_with("Pattern 0 (4 rows, 2 channels)"));
        assert!(text.contains("01 | C-4 01 0CFF 0F06 | --- .. .... ...."));
    }

    #[test]
    fn test_used_effects_skips_none() {
        let module = module_with_pattern();
        let codes: Vec<u8> = used_effects(&module).iter().map(|(c, _)| *c).collect();
        assert_eq!(codes, vec![0x0C, 0x0F]);
    }

    #[test]
    fn test_summary_counts_cells() {
        let summary = ModuleSummary::from_module(&module_with_pattern());
        assert_eq!(summary.name, "demo");
        assert_eq!(summary.patterns[0].used_cells, 1);
        assert_eq!(summary.instruments[0].sample, Some(0));
        assert_eq!(summary.samples[0].loaded_frames, None);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["samples"][0]["filename"], "LEAD.SMP");
        assert_eq!(json["samples"][0]["loop_type"], "forward");
        assert_eq!(json["samples"][0]["loop_end"], 8);
    }

    #[test]
    fn test_render_info_lists_samples() {
        let text = render_info(&module_with_pattern());
        assert!(text.contains("Song:        demo"));
        assert!(text.contains("LEAD.SMP"));
        assert!(text.contains("loop forward (2-8)"));
        assert!(text.contains("Effects used:"));
    }
}
