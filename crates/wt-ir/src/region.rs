//! Attack/loop/decay region descriptors.

use core::fmt;
use core::ops::Range;

use crate::Encoding;

/// Region boundaries are padded to a whole number of these blocks.
pub const BLOCK_SAMPLES: usize = 128;

/// Zero samples needed to bring `n` up to a multiple of [`BLOCK_SAMPLES`].
pub fn pad_count(n: usize) -> usize {
    (BLOCK_SAMPLES - n % BLOCK_SAMPLES) % BLOCK_SAMPLES
}

/// The three segments of a sample, in export order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Attack,
    Loop,
    Decay,
}

impl RegionKind {
    pub const ALL: [RegionKind; 3] = [RegionKind::Attack, RegionKind::Loop, RegionKind::Decay];

    /// Lowercase label used for section markers in generated source.
    pub fn label(self) -> &'static str {
        match self {
            RegionKind::Attack => "attack",
            RegionKind::Loop => "loop",
            RegionKind::Decay => "decay",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One region of a sample, relative to the sample's first byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleRegion {
    pub kind: RegionKind,
    /// Half-open byte range into the sample's PCM bytes
    pub byte_range: Range<usize>,
    /// Number of 16-bit samples in `byte_range`
    pub sample_count: usize,
    /// Zero samples appended to reach block alignment
    pub pad_count: usize,
}

impl SampleRegion {
    /// Build a region from its byte range.
    ///
    /// Returns `None` for an inverted or odd-length range, which cannot
    /// hold a whole number of 16-bit samples.
    pub fn from_byte_range(kind: RegionKind, byte_range: Range<usize>) -> Option<Self> {
        let len = byte_range.end.checked_sub(byte_range.start)?;
        if len % 2 != 0 {
            return None;
        }
        let sample_count = len / 2;
        Some(Self {
            kind,
            byte_range,
            sample_count,
            pad_count: pad_count(sample_count),
        })
    }

    /// Sample count after padding; always a multiple of [`BLOCK_SAMPLES`].
    pub fn padded_count(&self) -> usize {
        self.sample_count + self.pad_count
    }

    /// Words reserved for this region in the output array, header included.
    pub fn word_count(&self, encoding: Encoding) -> usize {
        (self.padded_count() * encoding.bytes_per_sample() + 3) / 4 + 1
    }
}
