//! Manifest writer for recognizer batches.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Failure writing the manifest.
#[derive(Debug, Error)]
#[error("Failed to write manifest {path}: {source}")]
pub struct ManifestError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Writes the ordered list of image paths the recognizer decodes.
///
/// Line `i` of the manifest is the image whose transcription the recognizer
/// prints on output line `i`.
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    path: PathBuf,
}

impl ManifestWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the manifest with `paths`, one per line, and syncs it to disk.
    ///
    /// A path containing a line break is refused before anything is written.
    pub async fn write<P: AsRef<Path>>(&self, paths: &[P]) -> Result<(), ManifestError> {
        let mut contents = String::new();
        for path in paths {
            let line = path.as_ref().to_string_lossy();
            if line.contains(['\n', '\r']) {
                return Err(ManifestError {
                    path: self.path.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("image path {:?} spans more than one line", line),
                    ),
                });
            }
            contents.push_str(&line);
            contents.push('\n');
        }

        self.write_contents(contents.as_bytes())
            .await
            .map_err(|source| ManifestError {
                path: self.path.clone(),
                source,
            })
    }

    async fn write_contents(&self, contents: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(&self.path).await?;
        file.write_all(contents).await?;
        file.flush().await?;
        file.sync_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_one_path_per_line_in_order() {
        let dir = TempDir::new().unwrap();
        let writer = ManifestWriter::new(dir.path().join("imgs2decode.txt"));

        writer
            .write(&[Path::new("data/b-0-a.png"), Path::new("data/b-1-b.png")])
            .await
            .unwrap();

        let contents = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "data/b-0-a.png\ndata/b-1-b.png\n");
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_manifest() {
        let dir = TempDir::new().unwrap();
        let writer = ManifestWriter::new(dir.path().join("imgs2decode.txt"));

        writer
            .write(&[PathBuf::from("one.png"), PathBuf::from("two.png")])
            .await
            .unwrap();
        writer.write(&[PathBuf::from("three.png")]).await.unwrap();

        let contents = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "three.png\n");
    }

    #[tokio::test]
    async fn test_write_refuses_multiline_path() {
        let dir = TempDir::new().unwrap();
        let writer = ManifestWriter::new(dir.path().join("imgs2decode.txt"));
        writer.write(&[PathBuf::from("old.png")]).await.unwrap();

        let err = writer
            .write(&[PathBuf::from("a.png"), PathBuf::from("b\nc.png")])
            .await
            .unwrap_err();

        assert_eq!(err.source.kind(), std::io::ErrorKind::InvalidInput);
        let contents = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "old.png\n");
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let writer = ManifestWriter::new(dir.path().join("missing").join("imgs.txt"));

        let err = writer.write(&[PathBuf::from("a.png")]).await.unwrap_err();
        assert_eq!(err.path, dir.path().join("missing").join("imgs.txt"));
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }
}
