//! PTM file parser

use nether_tracker::{
    ByteStream, IoStream, ModuleCapacity, ModuleFlags, PcmSampleLoader, SampleCodec, SampleCodecs,
    SampleLoader, TrackerModule, TrackerPattern,
};

use crate::builder::build_pattern;
use crate::error::PtmError;
use crate::{MAX_CHANNELS, MAX_ORDERS, MAX_PATTERNS, TRACKER_NAME};

mod header;
mod helpers;
mod instrument;
pub(crate) mod pattern;
mod pointers;
#[cfg(test)]
mod tests;

use header::{PtmHeader, read_header};
use instrument::read_instruments;
use pattern::{RawGrid, derive_channel_count, unpack_tokens};
use pointers::{PatternChunk, PatternPointers};

/// Payload codecs of PolyTracker samples
pub const PTM_SAMPLE_CODECS: SampleCodecs = SampleCodecs {
    eight_bit: SampleCodec::Delta,
    sixteen_bit: SampleCodec::PtmDelta,
};

/// PolyTracker module decoder
///
/// Holds no per-decode state; one decoder can fill any number of modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct PtmDecoder;

impl PtmDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Format tag if `buffer` starts like a PTM file
    pub fn identify(&self, buffer: &[u8]) -> Option<&'static str> {
        crate::identify_module(buffer)
    }

    /// Decode a module from `stream` into `module`
    ///
    /// The stream must be positioned at the first header byte; every offset in
    /// the file is resolved against the stream's base offset. `module` is reset
    /// first and is left empty if decoding fails.
    pub fn decode(
        &self,
        stream: &mut dyn ByteStream,
        module: &mut TrackerModule,
        loader: &mut dyn SampleLoader,
    ) -> Result<(), PtmError> {
        module.clean_up();

        let result = decode_into(stream, module, loader);
        if let Err(err) = &result {
            tracing::debug!("PTM decode aborted: {}", err);
            module.clean_up();
        }
        result
    }
}

/// Parse an in-memory PTM file into a TrackerModule
///
/// Uses the default [`ModuleCapacity`] and decodes sample payloads with the
/// [`PcmSampleLoader`].
///
/// # Arguments
/// * `data` - Raw PTM file bytes
///
/// # Returns
/// * `Ok(TrackerModule)` - Decoded module
/// * `Err(PtmError)` - Decode error
pub fn parse_ptm(data: &[u8]) -> Result<TrackerModule, PtmError> {
    crate::probe(data)?;

    let mut module = TrackerModule::with_capacity(ModuleCapacity::default());
    let mut stream = IoStream::from_slice(data);
    PtmDecoder::new().decode(&mut stream, &mut module, &mut PcmSampleLoader)?;
    Ok(module)
}

fn decode_into(
    stream: &mut dyn ByteStream,
    module: &mut TrackerModule,
    loader: &mut dyn SampleLoader,
) -> Result<(), PtmError> {
    if !module.has_containers() {
        return Err(PtmError::OutOfMemory);
    }

    let header = read_header(stream)?;
    check_capacity(&header, module.capacity())?;
    apply_header(&header, module);

    // Order list (256 bytes, only the declared prefix is kept)
    let mut orders = [0u8; MAX_ORDERS];
    stream.read_block(&mut orders)?;
    module
        .header
        .orders
        .extend_from_slice(&orders[..header.num_orders as usize]);

    let mut pointers = PatternPointers::read(stream, header.num_patterns as usize)?;
    tracing::debug!(
        "PTM '{}' v{:04X} (flags 0x{:08X}): {} orders, {} instruments, {} patterns, {} channels",
        header.name,
        header.version,
        header.flags,
        header.num_orders,
        header.num_instruments,
        header.num_patterns,
        header.num_channels
    );

    read_instruments(stream, header.num_instruments as usize, &mut pointers, module)?;
    if !pointers.is_patched() {
        tracing::debug!("No sample offset found, last pattern has no end boundary");
    }
    module.header.num_samples = module.samples.len() as u16;

    for index in 0..header.num_patterns as usize {
        let pattern = read_pattern(stream, &pointers, index, module.header.num_channels)?;
        module.patterns.push(pattern);
    }

    load_samples(stream, module, loader)?;

    module.set_default_panning();
    loader.post_process(module);

    tracing::debug!(
        "Decoded PTM '{}' ({} samples, {} patterns)",
        module.header.name,
        module.samples.len(),
        module.patterns.len()
    );
    Ok(())
}

/// Reject declared counts the module can't hold
fn check_capacity(header: &PtmHeader, capacity: ModuleCapacity) -> Result<(), PtmError> {
    let limits = [
        ("orders", header.num_orders, capacity.orders.min(MAX_ORDERS)),
        ("instruments", header.num_instruments, capacity.instruments),
        ("patterns", header.num_patterns, capacity.patterns.min(MAX_PATTERNS)),
    ];

    for (what, requested, limit) in limits {
        if requested as usize > limit {
            return Err(PtmError::CapacityExceeded {
                what,
                requested: requested as usize,
                capacity: limit,
            });
        }
    }

    Ok(())
}

fn apply_header(header: &PtmHeader, module: &mut TrackerModule) {
    let out = &mut module.header;
    out.name = header.name.clone();
    out.tracker = TRACKER_NAME.to_string();
    out.signature = header.signature;
    out.marker = header.marker;
    out.num_orders = header.num_orders;
    out.num_instruments = header.num_instruments;
    // One sample per instrument until registration says otherwise
    out.num_samples = header.num_instruments;
    out.num_patterns = header.num_patterns;
    out.flags = ModuleFlags::ST3_NEW_INSTRUMENT;
    out.channel_settings = header.channel_settings.to_vec();

    out.num_channels = if header.num_channels as usize > MAX_CHANNELS {
        tracing::warn!(
            "Header declares {} channels, clamping to {}",
            header.num_channels,
            MAX_CHANNELS
        );
        MAX_CHANNELS as u16
    } else {
        header.num_channels
    };
}

/// Unpack and translate pattern `index`
fn read_pattern(
    stream: &mut dyn ByteStream,
    pointers: &PatternPointers,
    index: usize,
    header_channels: u16,
) -> Result<TrackerPattern, PtmError> {
    let mut grid = RawGrid::try_new()?;

    let num_channels = match pointers.chunk(index) {
        PatternChunk::Absent => {
            tracing::trace!("Pattern {} is empty", index);
            1
        }
        PatternChunk::Stored { offset, length } => {
            stream.seek_with_base_offset(offset)?;

            let mut chunk = Vec::new();
            chunk.try_reserve_exact(length)?;
            chunk.resize(length, 0);
            stream.read_block(&mut chunk)?;

            let max_channel = unpack_tokens(&chunk, &mut grid);
            let num_channels = derive_channel_count(max_channel, header_channels);
            if let Some(max) = max_channel.filter(|&max| max as u16 >= header_channels) {
                tracing::warn!(
                    "Pattern {} addresses channel {} beyond the {} declared",
                    index,
                    max,
                    header_channels
                );
            }

            tracing::trace!(
                "Pattern {}: {} bytes at 0x{:X}, {} channels",
                index,
                length,
                offset,
                num_channels
            );
            num_channels
        }
    };

    build_pattern(&grid, num_channels)
}

/// Hand every registered payload to the loader
fn load_samples(
    stream: &mut dyn ByteStream,
    module: &mut TrackerModule,
    loader: &mut dyn SampleLoader,
) -> Result<(), PtmError> {
    for (index, sample) in module.samples.iter_mut().enumerate() {
        if sample.file_offset == 0 {
            tracing::trace!("Sample {} has no payload offset", index);
            continue;
        }

        stream.seek_with_base_offset(sample.file_offset as u64)?;
        loader
            .load_sample(stream, index, sample, PTM_SAMPLE_CODECS)
            .map_err(|source| PtmError::SampleTransferFailure {
                sample: index,
                source,
            })?;
    }

    Ok(())
}
