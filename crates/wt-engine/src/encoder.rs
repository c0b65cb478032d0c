//! Word-packing encoder.

use wt_ir::{Encoding, HeaderWord, SampleInfo, SampleRegion};

use crate::packer::{PackedOutput, PackedWordStream};
use crate::{segment, ulaw, MalformedSample, TranscodeError, ValidationError};

/// Encode one region into `stream`.
///
/// `pcm` holds the sample's little-endian 16-bit PCM starting at the
/// sample's first byte; `region.byte_range` indexes into it.
pub fn encode_region(
    stream: &mut PackedWordStream,
    region: &SampleRegion,
    pcm: &[u8],
    encoding: Encoding,
) -> Result<(), TranscodeError> {
    let bytes = pcm.get(region.byte_range.clone()).ok_or(MalformedSample::TruncatedData {
        required: region.byte_range.end,
        available: pcm.len(),
    })?;
    let header = HeaderWord::new(region.sample_count, encoding).ok_or(
        ValidationError::RegionTooLong {
            kind: region.kind,
            sample_count: region.sample_count,
        },
    )?;

    stream.begin_section(region.kind);
    stream.push_header(header);

    for frame in bytes.chunks_exact(2) {
        let sample = i16::from_le_bytes([frame[0], frame[1]]);
        match encoding {
            Encoding::Pcm => {
                stream.push_byte(sample as u8);
                stream.push_byte((sample >> 8) as u8);
            }
            Encoding::Ulaw => stream.push_byte(ulaw::encode(sample)),
        }
    }

    // Padding goes in as single zero bytes whatever the encoding; the
    // firmware only reads `sample_count` samples from each region.
    for _ in 0..region.pad_count {
        stream.push_byte(0);
    }
    Ok(())
}

/// A sample encoded into one packed word array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedSample {
    pub encoding: Encoding,
    /// Attack, loop and decay, in array order
    pub regions: [SampleRegion; 3],
    pub output: PackedOutput,
}

impl EncodedSample {
    /// Words reserved per region, header included.
    pub fn word_counts(&self) -> [usize; 3] {
        [
            self.regions[0].word_count(self.encoding),
            self.regions[1].word_count(self.encoding),
            self.regions[2].word_count(self.encoding),
        ]
    }

    /// Declared length of the output array.
    pub fn declared_len(&self) -> usize {
        self.word_counts().iter().sum()
    }
}

/// Segment a sample and encode attack, loop and decay through one shared
/// packer.
///
/// Does not apply [`crate::validate`]; callers decide whether its rules
/// are fatal.
pub fn encode_sample(
    sample: &SampleInfo,
    pcm: &[u8],
    encoding: Encoding,
) -> Result<EncodedSample, TranscodeError> {
    let regions = segment(sample)?;

    let required = sample.duration();
    if pcm.len() < required {
        return Err(MalformedSample::TruncatedData {
            required,
            available: pcm.len(),
        }
        .into());
    }

    let mut stream = PackedWordStream::new();
    for region in &regions {
        encode_region(&mut stream, region, pcm, encoding)?;
    }

    Ok(EncodedSample {
        encoding,
        regions,
        output: stream.finish(),
    })
}
