//! Region segmenter: validates loop metadata and splits a sample into
//! attack, loop and decay byte ranges.

use wt_ir::{HeaderWord, RegionKind, SampleInfo, SampleRegion};

use crate::{MalformedSample, TranscodeError, ValidationError};

/// Check the loop/length rules that decide whether a sample is exportable.
///
/// These are the rules a forced export may skip; [`segment`] still applies
/// the structural checks it needs.
pub fn validate(sample: &SampleInfo) -> Result<(), ValidationError> {
    let duration = sample.duration();
    let loop_duration = sample.loop_duration();
    if loop_duration >= duration {
        return Err(ValidationError::LoopTooLong { loop_duration, duration });
    }

    let end_loop = sample.end_loop.saturating_sub(sample.start);
    if end_loop > duration {
        return Err(ValidationError::LoopEndPastEnd { end_loop, duration });
    }

    if sample.sample_type.is_rom() {
        return Err(ValidationError::RomSample);
    }
    Ok(())
}

/// Split a sample into its three regions, in export order.
///
/// Byte ranges are relative to the sample's first byte.
pub fn segment(sample: &SampleInfo) -> Result<[SampleRegion; 3], TranscodeError> {
    let in_order = sample.start <= sample.start_loop
        && sample.start_loop <= sample.end_loop
        && sample.end_loop <= sample.end;
    if !in_order {
        return Err(ValidationError::LoopOutOfOrder {
            start: sample.start,
            start_loop: sample.start_loop,
            end_loop: sample.end_loop,
            end: sample.end,
        }
        .into());
    }

    let start_loop = sample.start_loop - sample.start;
    let end_loop = sample.end_loop - sample.start;
    let end = sample.end - sample.start;

    let attack = region(RegionKind::Attack, 0, start_loop)?;
    let sustain = region(RegionKind::Loop, start_loop, end_loop)?;
    let decay = region(RegionKind::Decay, end_loop, end)?;
    Ok([attack, sustain, decay])
}

fn region(kind: RegionKind, start: usize, end: usize) -> Result<SampleRegion, TranscodeError> {
    let region = SampleRegion::from_byte_range(kind, start..end)
        .ok_or(MalformedSample::OddByteRange { kind, len: end - start })?;
    if region.sample_count > HeaderWord::MAX_SAMPLES {
        return Err(ValidationError::RegionTooLong {
            kind,
            sample_count: region.sample_count,
        }
        .into());
    }
    Ok(region)
}
