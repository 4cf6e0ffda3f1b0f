//! FileSender - appends raw payload bytes to a local file

use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::ForwardError;

/// Sender that appends payloads to a destination file.
///
/// The file is opened in append mode for every payload; single-writer
/// atomic-append semantics come from the underlying file system. The
/// parent directory must exist (ensured at startup by config loading).
pub struct FileSender {
    path: PathBuf,
}

impl FileSender {
    /// Create a sender for the given destination path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Destination path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append the payload bytes verbatim.
    pub async fn send(&self, payload: &[u8]) -> Result<(), ForwardError> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .await?;
        file.write_all(payload).await?;
        file.flush().await?;

        debug!(path = %self.path.display(), bytes = payload.len(), "appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_append_is_byte_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.log");
        let sender = FileSender::new(path.clone());

        sender.send(b"line1\n").await.unwrap();
        sender.send(b"line2\n").await.unwrap();

        let content = std::fs::read(&path).unwrap();
        assert_eq!(content, b"line1\nline2\n");
    }

    #[tokio::test]
    async fn test_missing_parent_is_error() {
        let dir = tempdir().unwrap();
        let sender = FileSender::new(dir.path().join("no_such_dir/out.log"));
        assert!(sender.send(b"x").await.is_err());
    }
}
