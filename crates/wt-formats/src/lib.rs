//! Format support for the SF2 wavetable exporter.
//!
//! Reads SF2 banks into sample metadata plus the raw PCM pool, and writes
//! an encoded sample out as a C++ source/header pair.

mod sf2_format;
mod source_format;

pub use sf2_format::{load_sf2, SoundFont};
pub use source_format::{
    array_identifier, body_to_bytes, c_string_literal, declarations_to_bytes, write_body,
    write_declarations, BODY_FILE_NAME, DECL_FILE_NAME,
};

/// Error type for format parsing.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Not a RIFF `sfbk` file
    #[error("not an SF2 file (missing RIFF/sfbk header)")]
    InvalidHeader,
    /// Chunk runs past the end of the file
    #[error("unexpected end of file")]
    UnexpectedEof,
    /// Required chunk absent
    #[error("missing {0} chunk")]
    MissingChunk(&'static str),
    /// Chunk present but unusable
    #[error("malformed {0} chunk")]
    InvalidChunk(&'static str),
    #[error("no sample at index {0}")]
    NoSuchSample(usize),
    #[error("sample {index} spans bytes {start}..{end}, outside the {pool}-byte sample pool")]
    SampleOutOfRange {
        index: usize,
        start: usize,
        end: usize,
        pool: usize,
    },
    /// `shdr` record failed to decode
    #[error("malformed sample header: {0}")]
    Record(#[from] binrw::Error),
}
