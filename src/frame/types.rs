use std::fmt::Debug;
use std::ops::Range;

/// Per-recipient byte counts and their positions inside a concatenated buffer.
///
/// `offsets[0]` is always 0 and `offsets[i]` is the sum of `lengths[..i]`, so the
/// table slices a buffer of `total()` bytes into adjacent, non-overlapping pieces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameTable {
    lengths: Vec<usize>,
    offsets: Vec<usize>,
}

impl FrameTable {
    /// Builds the table from one byte count per recipient.
    pub fn from_lengths(lengths: Vec<usize>) -> Self {
        let mut offsets = Vec::with_capacity(lengths.len());
        let mut offset = 0;
        for &length in &lengths {
            offsets.push(offset);
            offset += length;
        }
        Self { lengths, offsets }
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of recipients described by the table.
    pub fn recipients(&self) -> usize {
        self.lengths.len()
    }

    /// Total number of bytes covered by the table.
    pub fn total(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Byte range owned by `rank`, or `None` if the rank is out of range.
    pub fn range(&self, rank: usize) -> Option<Range<usize>> {
        let offset = *self.offsets.get(rank)?;
        Some(offset..offset + self.lengths[rank])
    }

    /// The slice of `buffer` owned by `rank`.
    ///
    /// Returns `None` if the rank is out of range or the buffer is too short.
    pub fn slice<'a>(&self, buffer: &'a [u8], rank: usize) -> Option<&'a [u8]> {
        buffer.get(self.range(rank)?)
    }
}

/// A concatenated buffer together with the table that splits it per recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub buffer: Vec<u8>,
    pub table: FrameTable,
}
