//! Filesystem-backed file saver.

use super::FileSaver;
use async_trait::async_trait;
use std::path::PathBuf;

/// [`FileSaver`] writing downloaded payloads into a fixed directory.
///
/// The filename is reduced to its final path component before joining, so a
/// server-supplied name cannot escape the target directory.
pub struct DiskSaver {
    dir: PathBuf,
}

impl DiskSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl FileSaver for DiskSaver {
    async fn save(&self, bytes: &[u8], filename: &str) -> std::io::Result<()> {
        let name = std::path::Path::new(filename)
            .file_name()
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty filename")
            })?;
        let target = self.dir.join(name);
        tokio::fs::write(&target, bytes).await?;
        tracing::debug!(target: "outpost::download", path = %target.display(), bytes = bytes.len(), "file saved");
        Ok(())
    }
}
