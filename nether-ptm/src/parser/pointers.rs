//! Pattern parapointer table
//!
//! The header stores one parapointer (16-byte paragraph index) per pattern
//! but no end pointer for the last one, so the byte size of the last pattern
//! cannot be derived from the table alone. PolyTracker writes sample payloads
//! right after the pattern data, so the first nonzero sample offset seen
//! while walking the instrument records closes the table.

use nether_tracker::ByteStream;

use crate::MAX_PATTERNS;
use crate::error::PtmError;

/// Bytes per parapointer unit
const PARAGRAPH: u64 = 16;

/// Where a pattern's packed data lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternChunk {
    /// Zero parapointer: the pattern is empty and nothing is read
    Absent,
    /// Packed bytes at `offset`, `length` bytes long
    Stored { offset: u64, length: usize },
}

/// Pattern parapointers plus the end boundary slot
#[derive(Debug, Clone)]
pub(crate) struct PatternPointers {
    table: [u16; MAX_PATTERNS + 1],
    boundary: usize,
    patched: bool,
}

impl PatternPointers {
    /// Read the stored parapointers for a module with `num_patterns` patterns
    pub(crate) fn read(stream: &mut dyn ByteStream, num_patterns: usize) -> Result<Self, PtmError> {
        let mut table = [0u16; MAX_PATTERNS + 1];
        stream.read_words(&mut table[..MAX_PATTERNS])?;

        Ok(Self {
            table,
            boundary: num_patterns.min(MAX_PATTERNS),
            patched: false,
        })
    }

    /// Feed a raw sample offset from an instrument record, in file order
    ///
    /// The first nonzero offset becomes the end boundary; later calls are
    /// ignored. Returns `true` when this call patched the table.
    pub(crate) fn observe_sample_offset(&mut self, offset: u32) -> bool {
        if offset == 0 || self.patched {
            return false;
        }

        // Stored as a parapointer word, upper bits are lost like in the file
        self.table[self.boundary] = (offset >> 4) as u16;
        self.patched = true;
        tracing::debug!(
            "Pattern end boundary taken from sample offset 0x{:08X} (parapointer {})",
            offset,
            self.table[self.boundary]
        );
        true
    }

    /// Whether the end boundary has been supplied
    pub(crate) fn is_patched(&self) -> bool {
        self.patched
    }

    /// Parapointer of pattern `index` (the boundary slot included)
    #[cfg(test)]
    pub(crate) fn get(&self, index: usize) -> Option<u16> {
        self.table.get(index).copied()
    }

    /// Resolve the byte range of pattern `index`
    ///
    /// The length is the distance to the next table entry. A next entry at or
    /// below the start yields an empty chunk.
    pub(crate) fn chunk(&self, index: usize) -> PatternChunk {
        let start = self.table[index];
        if start == 0 {
            return PatternChunk::Absent;
        }

        let end = self.table[index + 1];
        let length = if end > start {
            (end - start) as usize * PARAGRAPH as usize
        } else {
            tracing::warn!(
                "Pattern {} has no usable end boundary ({} -> {}), treating as empty",
                index,
                start,
                end
            );
            0
        };

        PatternChunk::Stored {
            offset: start as u64 * PARAGRAPH,
            length,
        }
    }
}
