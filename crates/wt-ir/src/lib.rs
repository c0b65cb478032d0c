//! Core IR types for the SF2 wavetable exporter.
//!
//! This crate defines the sample metadata handed over by the bank reader,
//! the attack/loop/decay region descriptors, and the output encodings
//! understood by the firmware decoder.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod encoding;
mod region;
mod sample;

pub use encoding::{Encoding, HeaderWord};
pub use region::{pad_count, RegionKind, SampleRegion, BLOCK_SAMPLES};
pub use sample::{SampleInfo, SampleType, SAMPLE_NAME_LEN};
