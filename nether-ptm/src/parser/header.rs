//! Header parsing

use nether_tracker::ByteStream;

use crate::error::PtmError;
use crate::{MAX_CHANNELS, PTM_VERSION, SONG_NAME_LENGTH};

use super::helpers::read_text;

/// Fixed header fields in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PtmHeader {
    pub name: String,
    pub marker: u8,
    pub version: u16,
    pub num_orders: u16,
    pub num_instruments: u16,
    pub num_patterns: u16,
    pub num_channels: u16,
    pub flags: u32,
    pub signature: [u8; 4],
    pub channel_settings: [u8; MAX_CHANNELS],
}

/// Read the 96 fixed header bytes
///
/// The version word is checked as soon as it is read; on mismatch nothing
/// after it is touched.
pub(crate) fn read_header(stream: &mut dyn ByteStream) -> Result<PtmHeader, PtmError> {
    // Song name (28 bytes, null-terminated)
    let name = read_text::<SONG_NAME_LENGTH>(stream)?;

    // 0x1A marker (1 byte)
    let marker = stream.read_u8()?;

    // Version (2 bytes)
    let version = stream.read_u16()?;
    if version != PTM_VERSION {
        return Err(PtmError::MalformedHeader { version });
    }

    // Reserved (1 byte)
    stream.skip(1)?;

    let num_orders = stream.read_u16()?;
    let num_instruments = stream.read_u16()?;
    let num_patterns = stream.read_u16()?;
    let num_channels = stream.read_u16()?;

    // Flags (2 bytes) + reserved (2 bytes)
    let flags = stream.read_u32()?;

    // "PTMF" (4 bytes)
    let mut signature = [0u8; 4];
    stream.read_block(&mut signature)?;

    // Reserved (16 bytes)
    stream.skip(16)?;

    // Channel settings (32 bytes)
    let mut channel_settings = [0u8; MAX_CHANNELS];
    stream.read_block(&mut channel_settings)?;

    Ok(PtmHeader {
        name,
        marker,
        version,
        num_orders,
        num_instruments,
        num_patterns,
        num_channels,
        flags,
        signature,
        channel_settings,
    })
}
