//! Transcoding engine for the SF2 wavetable exporter.
//!
//! Splits a sample into attack/loop/decay regions, encodes each region's
//! 16-bit PCM as PCM or µ-law, and packs the bytes into 32-bit words
//! with one header word per region.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod encoder;
mod error;
mod packer;
mod segment;
pub mod ulaw;

pub use encoder::{encode_region, encode_sample, EncodedSample};
pub use error::{MalformedSample, TranscodeError, ValidationError};
pub use packer::{PackedOutput, PackedWordStream, StreamItem, WORDS_PER_LINE};
pub use segment::{segment, validate};
