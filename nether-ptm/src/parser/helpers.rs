//! Text field helpers

use nether_tracker::{ByteStream, StreamError};

/// Read a fixed-size, NUL-padded text field
pub(crate) fn read_text<const N: usize>(
    stream: &mut dyn ByteStream,
) -> Result<String, StreamError> {
    let mut bytes = [0u8; N];
    stream.read_block(&mut bytes)?;
    Ok(decode_text(&bytes))
}

/// Decode a NUL-padded text field, dropping trailing blanks
///
/// DOS trackers pad with either NULs or spaces; bytes outside ASCII are
/// replaced rather than rejected.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim_end().to_string()
}
