//! Headless controller for the SF2 wavetable exporter.
//!
//! Provides one API for loading a bank, listing its samples and exporting
//! a sample, shared by the CLI and the integration tests.

mod artifact;

use std::path::PathBuf;

use wt_formats::{array_identifier, body_to_bytes, declarations_to_bytes, SoundFont};

// Re-export common types so callers don't need wt-ir/wt-engine directly.
pub use artifact::ExportArtifact;
pub use wt_engine::{MalformedSample, TranscodeError, ValidationError};
pub use wt_formats::{FormatError, BODY_FILE_NAME, DECL_FILE_NAME};
pub use wt_ir::{Encoding, RegionKind, SampleInfo};

/// Error type for a single export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("sample {index} ({name}): {source}")]
    Transcode {
        index: usize,
        name: String,
        #[source]
        source: TranscodeError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// The broken rule, if the sample failed validation.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            ExportError::Transcode { source: TranscodeError::Validation(e), .. } => Some(e),
            _ => None,
        }
    }
}

/// Per-export settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExportOptions {
    pub encoding: Encoding,
    /// Export even if the loop rules reject the sample.
    pub force: bool,
}

/// Headless exporter: owns a loaded bank and exports one sample at a time.
pub struct Controller {
    bank: SoundFont,
}

impl Controller {
    pub fn new() -> Self {
        Self {
            bank: SoundFont::default(),
        }
    }

    // --- Bank management ---

    pub fn load_sf2(&mut self, data: &[u8]) -> Result<(), FormatError> {
        self.bank = wt_formats::load_sf2(data)?;
        log::debug!(
            "loaded bank {:?}: {} samples, {} PCM bytes",
            self.bank.name,
            self.bank.samples().len(),
            self.bank.pcm_pool().len()
        );
        Ok(())
    }

    pub fn bank_name(&self) -> &str {
        &self.bank.name
    }

    pub fn samples(&self) -> &[SampleInfo] {
        self.bank.samples()
    }

    // --- Export ---

    /// Validate, segment and encode one sample, and render both source files
    /// in memory. Nothing is written until [`ExportArtifact::write_to`].
    pub fn export(
        &self,
        index: usize,
        options: &ExportOptions,
    ) -> Result<ExportArtifact, ExportError> {
        let sample = self.bank.sample(index).ok_or(FormatError::NoSuchSample(index))?;
        let fail = |source: TranscodeError| ExportError::Transcode {
            index,
            name: sample.name.to_string(),
            source,
        };

        if let Err(e) = wt_engine::validate(sample) {
            if !(options.force && e.is_overridable()) {
                return Err(fail(e.into()));
            }
            log::warn!("sample {} ({}): {}; exporting anyway", index, sample.name, e);
        }

        let pcm = self.bank.sample_bytes(index)?;
        let encoded = wt_engine::encode_sample(sample, pcm, options.encoding).map_err(fail)?;

        for (region, words) in encoded.regions.iter().zip(encoded.word_counts()) {
            log::debug!(
                "{}: {} samples + {} pad, {} words",
                region.kind,
                region.sample_count,
                region.pad_count,
                words
            );
        }

        let identifier = array_identifier(&sample.name);
        log::info!(
            "encoded {} as {}_sample[{}] ({:?})",
            sample.name,
            identifier,
            encoded.declared_len(),
            options.encoding
        );

        let body = body_to_bytes(&identifier, &encoded);
        let declarations = declarations_to_bytes(&identifier, sample, &encoded);
        Ok(ExportArtifact::new(identifier, sample.clone(), encoded, body, declarations))
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
