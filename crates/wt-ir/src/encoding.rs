//! Output encodings and the per-region header word.

/// Sample encoding of a packed region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// 16-bit PCM, two bytes per sample (low byte first)
    #[default]
    Pcm,
    /// 8-bit µ-law, one byte per sample
    Ulaw,
}

impl Encoding {
    /// Tag stored in the top byte of a region's header word.
    pub const fn format_tag(self) -> u8 {
        match self {
            Encoding::Pcm => 0x81,
            Encoding::Ulaw => 0x01,
        }
    }

    pub const fn bytes_per_sample(self) -> usize {
        match self {
            Encoding::Pcm => 2,
            Encoding::Ulaw => 1,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x81 => Some(Encoding::Pcm),
            0x01 => Some(Encoding::Ulaw),
            _ => None,
        }
    }
}

/// Region header: `sample_count | (format_tag << 24)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderWord(u32);

impl HeaderWord {
    /// Largest sample count the 24-bit length field can hold.
    pub const MAX_SAMPLES: usize = 0x00FF_FFFF;

    /// Build a header word, or `None` if `sample_count` overflows the length field.
    pub fn new(sample_count: usize, encoding: Encoding) -> Option<Self> {
        if sample_count > Self::MAX_SAMPLES {
            return None;
        }
        Some(Self(sample_count as u32 | (encoding.format_tag() as u32) << 24))
    }

    /// Split a header word the way the firmware does when it starts a region.
    pub fn parse(word: u32) -> Option<(usize, Encoding)> {
        let encoding = Encoding::from_tag((word >> 24) as u8)?;
        Some(((word & 0x00FF_FFFF) as usize, encoding))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}
