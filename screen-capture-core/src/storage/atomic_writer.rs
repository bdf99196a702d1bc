use std::fs;
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};
use tempfile::Builder;

use crate::models::error::RecorderError;
use crate::traits::file_sink::FileSink;

/// Writes a whole file through a sibling temp file and a rename.
///
/// The destination either keeps its previous contents or holds the complete
/// new blob; a partially written file is never visible under `path`.
/// New files get the umask-filtered default mode, replaced files keep theirs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomicFileSink;

impl AtomicFileSink {
    pub fn new() -> Self {
        Self
    }
}

impl FileSink for AtomicFileSink {
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), RecorderError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(dir)
            .map_err(|e| RecorderError::StorageError(format!("failed to create directory: {}", e)))?;

        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Applied through open(2), so the process umask still filters it.
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut tmp = builder
            .tempfile_in(dir)
            .map_err(|e| RecorderError::StorageError(format!("failed to create temp file: {}", e)))?;

        if let Ok(existing) = fs::metadata(path) {
            if existing.is_file() {
                tmp.as_file().set_permissions(existing.permissions()).map_err(|e| {
                    RecorderError::StorageError(format!("failed to copy permissions: {}", e))
                })?;
            }
        }
        tmp.write_all(data)
            .map_err(|e| RecorderError::StorageError(format!("write failed: {}", e)))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| RecorderError::StorageError(format!("sync failed: {}", e)))?;

        tmp.persist(path).map_err(|e| {
            RecorderError::StorageError(format!("failed to move into {}: {}", path.display(), e.error))
        })?;

        log::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}

/// SHA-256 hex digest of a buffer.
pub fn sha256_hex(data: &[u8]) -> String {
    hex_encode(&Sha256::digest(data))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
