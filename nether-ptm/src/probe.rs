//! Format identification

use crate::error::PtmError;
use crate::{FORMAT_TAG, PROBE_LENGTH, PTM_MAGIC, PTM_MAGIC_OFFSET};

/// Check a buffer prefix for the PTM signature
///
/// Returns the format tag on a match. Buffers shorter than
/// [`PROBE_LENGTH`] never match.
pub fn identify_module(buffer: &[u8]) -> Option<&'static str> {
    let magic = buffer.get(PTM_MAGIC_OFFSET..PROBE_LENGTH)?;
    (magic == PTM_MAGIC).then_some(FORMAT_TAG)
}

/// Like [`identify_module`], reporting a mismatch as [`PtmError::UnrecognizedFormat`]
pub fn probe(buffer: &[u8]) -> Result<&'static str, PtmError> {
    identify_module(buffer).ok_or(PtmError::UnrecognizedFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix_with_magic(magic: &[u8; 4]) -> Vec<u8> {
        let mut data = vec![0u8; PROBE_LENGTH];
        data[PTM_MAGIC_OFFSET..PROBE_LENGTH].copy_from_slice(magic);
        data
    }

    #[test]
    fn test_identify_match() {
        assert_eq!(identify_module(&prefix_with_magic(b"PTMF")), Some("PTM"));
    }

    #[test]
    fn test_identify_mismatch() {
        assert_eq!(identify_module(&prefix_with_magic(b"SCRM")), None);
        assert_eq!(identify_module(&prefix_with_magic(b"ptmf")), None);
    }

    #[test]
    fn test_identify_short_buffer() {
        let data = prefix_with_magic(b"PTMF");
        assert_eq!(identify_module(&data[..PROBE_LENGTH - 1]), None);
        assert_eq!(identify_module(&[]), None);
    }

    #[test]
    fn test_probe_reports_unrecognized() {
        let result = probe(&[0u8; 10]);
        assert!(matches!(result, Err(PtmError::UnrecognizedFormat)));
    }
}
