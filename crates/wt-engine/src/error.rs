//! Transcoding errors.

use wt_ir::RegionKind;

/// A loop/length rule the sample metadata breaks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("loop length ({loop_duration} bytes) >= sample length ({duration} bytes)")]
    LoopTooLong { loop_duration: usize, duration: usize },

    #[error("end loop index ({end_loop}) is larger than sample end index ({duration})")]
    LoopEndPastEnd { end_loop: usize, duration: usize },

    #[error(
        "loop points out of order: start {start}, loop {start_loop}..{end_loop}, end {end}"
    )]
    LoopOutOfOrder {
        start: usize,
        start_loop: usize,
        end_loop: usize,
        end: usize,
    },

    #[error("{kind} region has {sample_count} samples, more than a header word can describe")]
    RegionTooLong { kind: RegionKind, sample_count: usize },

    #[error("ROM sample has no data in the bank")]
    RomSample,
}

impl ValidationError {
    /// Rules that a forced export may skip.
    ///
    /// Structural errors stay fatal since segmentation cannot proceed past them.
    pub fn is_overridable(&self) -> bool {
        matches!(
            self,
            ValidationError::LoopTooLong { .. }
                | ValidationError::LoopEndPastEnd { .. }
                | ValidationError::RomSample
        )
    }
}

/// Sample data that cannot be split into whole 16-bit samples.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedSample {
    #[error("{kind} region spans an odd number of bytes ({len})")]
    OddByteRange { kind: RegionKind, len: usize },

    #[error("sample data holds {available} bytes, {required} needed")]
    TruncatedData { required: usize, available: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TranscodeError {
    #[error("invalid sample: {0}")]
    Validation(#[from] ValidationError),
    #[error("malformed sample: {0}")]
    Malformed(#[from] MalformedSample),
}
