//! Sample metadata types.

use arrayvec::ArrayString;
use core::fmt;

/// Maximum length of a sample name in an SF2 `shdr` record.
pub const SAMPLE_NAME_LEN: usize = 20;

/// SF2 `sfSampleType` bit field.
///
/// Kept as the raw value since the generated declaration file carries it
/// verbatim as `SAMPLE_TYPE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SampleType(pub u16);

impl SampleType {
    pub const MONO: Self = Self(0x0001);
    pub const RIGHT: Self = Self(0x0002);
    pub const LEFT: Self = Self(0x0004);
    pub const LINKED: Self = Self(0x0008);
    pub const ROM_FLAG: u16 = 0x8000;

    /// Raw `sfSampleType` value.
    pub fn raw(self) -> u16 {
        self.0
    }

    /// True for a mono sample, ROM or not.
    pub fn is_mono(self) -> bool {
        self.0 & !Self::ROM_FLAG == Self::MONO.0
    }

    /// ROM samples live in the synth's ROM, not in the bank's sample pool.
    pub fn is_rom(self) -> bool {
        self.0 & Self::ROM_FLAG != 0
    }

    fn channel_label(self) -> &'static str {
        match self.0 & !Self::ROM_FLAG {
            0x0001 => "mono",
            0x0002 => "right",
            0x0004 => "left",
            0x0008 => "linked",
            _ => "unknown",
        }
    }
}

/// Metadata for one sample of a bank.
///
/// All offsets are absolute byte offsets into the bank's 16-bit PCM pool
/// (two bytes per sample point), with `start <= start_loop <= end_loop <= end`
/// for a well-formed sample.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleInfo {
    /// Sample name (at most 20 bytes)
    pub name: ArrayString<SAMPLE_NAME_LEN>,
    /// First byte of the sample
    pub start: usize,
    /// One past the last byte of the sample
    pub end: usize,
    /// First byte of the sustain loop
    pub start_loop: usize,
    /// One past the last byte of the sustain loop
    pub end_loop: usize,
    /// Recording sample rate in Hz
    pub sample_rate: u32,
    /// MIDI key of the recorded pitch
    pub original_pitch: u8,
    /// Pitch correction in cents
    pub pitch_correction: i8,
    /// Index of the linked stereo partner
    pub sample_link: u16,
    /// Channel layout and ROM flag
    pub sample_type: SampleType,
}

impl SampleInfo {
    /// Create sample metadata with the given name; the name is truncated
    /// to 20 bytes on a character boundary.
    pub fn new(name: &str) -> Self {
        let mut sample = Self::default();
        for ch in name.chars() {
            if sample.name.try_push(ch).is_err() {
                break;
            }
        }
        sample.sample_type = SampleType::MONO;
        sample
    }

    /// Sample length in bytes.
    pub fn duration(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Loop length in bytes.
    pub fn loop_duration(&self) -> usize {
        self.end_loop.saturating_sub(self.start_loop)
    }

    /// Number of 16-bit frames in the sample.
    pub fn frames(&self) -> usize {
        self.duration() / 2
    }

    pub fn is_mono(&self) -> bool {
        self.sample_type.is_mono()
    }
}

impl fmt::Display for SampleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} frames @ {} Hz, key {} ({:+} cents), loop {}..{}, {}",
            self.name,
            self.frames(),
            self.sample_rate,
            self.original_pitch,
            self.pitch_correction,
            self.start_loop.saturating_sub(self.start) / 2,
            self.end_loop.saturating_sub(self.start) / 2,
            self.sample_type.channel_label(),
        )?;
        if self.sample_type.is_rom() {
            f.write_str(" (ROM)")?;
        }
        Ok(())
    }
}
