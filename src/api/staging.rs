// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Temporary on-disk staging for uploaded files

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// An uploaded file written to a uniquely named temp file.
/// The file is removed on drop, including on error paths.
pub struct StagedUpload {
    file: NamedTempFile,
    pub content_type: String,
    pub file_name: String,
}

impl StagedUpload {
    /// Write `data` into `dir` (system temp dir when `None`)
    pub fn create(
        dir: Option<&Path>,
        data: &[u8],
        content_type: &str,
        file_name: &str,
    ) -> std::io::Result<Self> {
        let suffix = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        let mut builder = tempfile::Builder::new();
        builder.prefix("upload-").suffix(&suffix);
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        file.write_all(data)?;
        file.flush()?;
        debug!("Staged {} ({} bytes) at {:?}", file_name, data.len(), file.path());

        Ok(Self {
            file,
            content_type: content_type.to_string(),
            file_name: file_name.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Remove the file now; failures are logged and ignored
    pub fn cleanup(self) {
        let path: PathBuf = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            warn!("Failed to remove staged upload {:?}: {}", path, e);
        }
    }
}
