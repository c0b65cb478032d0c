//! Rendered export and its atomic write to disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use wt_engine::EncodedSample;
use wt_ir::SampleInfo;

use crate::{ExportError, BODY_FILE_NAME, DECL_FILE_NAME};

/// The generated source pair for one sample, held in memory.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    /// Array name prefix derived from the sample name
    pub identifier: String,
    pub sample: SampleInfo,
    pub encoded: EncodedSample,
    body: Vec<u8>,
    declarations: Vec<u8>,
}

impl ExportArtifact {
    pub(crate) fn new(
        identifier: String,
        sample: SampleInfo,
        encoded: EncodedSample,
        body: Vec<u8>,
        declarations: Vec<u8>,
    ) -> Self {
        Self { identifier, sample, encoded, body, declarations }
    }

    /// Contents of the `.cpp` file.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Contents of the `.h` file.
    pub fn declarations(&self) -> &[u8] {
        &self.declarations
    }

    /// Array contents in order, header words included.
    pub fn words(&self) -> Vec<u32> {
        self.encoded.output.words().collect()
    }

    /// Write both files into `dir`.
    ///
    /// Each file is staged as a temporary file in `dir` first; the pair is
    /// only renamed into place once both were written in full. If the body
    /// cannot be renamed, the header renamed just before it is removed.
    pub fn write_to(&self, dir: &Path) -> Result<[PathBuf; 2], ExportError> {
        let body_path = dir.join(BODY_FILE_NAME);
        let decl_path = dir.join(DECL_FILE_NAME);

        let body = stage(dir, &self.body)?;
        let decl = stage(dir, &self.declarations)?;

        decl.persist(&decl_path).map_err(|e| ExportError::Io {
            path: decl_path.clone(),
            source: e.error,
        })?;
        if let Err(e) = body.persist(&body_path) {
            // a header without its body must not outlive the failed export
            if let Err(cleanup) = fs::remove_file(&decl_path) {
                log::warn!("could not remove {}: {}", decl_path.display(), cleanup);
            }
            return Err(ExportError::Io {
                path: body_path,
                source: e.error,
            });
        }

        log::info!("wrote {} and {}", body_path.display(), decl_path.display());
        Ok([body_path, decl_path])
    }
}

fn stage(dir: &Path, contents: &[u8]) -> Result<NamedTempFile, ExportError> {
    let io_err = |source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
    file.write_all(contents).map_err(io_err)?;
    file.as_file().sync_all().map_err(io_err)?;
    Ok(file)
}
