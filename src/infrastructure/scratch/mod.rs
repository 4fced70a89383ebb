use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local file accumulating the audio of one pipeline run
///
/// Each run gets its own uniquely named file, so concurrent runs never share
/// scratch state. Call [`ScratchFile::cleanup`] once the run is over.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    file: Option<File>,
    bytes_written: u64,
}

impl ScratchFile {
    /// Create an empty scratch file in `dir`
    pub async fn create(dir: &Path) -> std::io::Result<Self> {
        let path = dir.join(format!("tts-{}.mp3", Uuid::new_v4()));
        let file = File::create(&path).await?;

        tracing::debug!(path = %path.display(), "Scratch file created");

        Ok(Self {
            path,
            file: Some(file),
            bytes_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Append bytes at the end of the file
    pub async fn append(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let file = self.file.as_mut().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "scratch file already finished")
        })?;
        file.write_all(bytes).await?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Flush and close the write handle so the file can be read back in full
    pub async fn finish(&mut self) -> std::io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }
        Ok(())
    }

    /// Remove the file. Best effort: failures are logged, never returned.
    pub async fn cleanup(mut self) {
        // Close the handle first; some platforms refuse to unlink open files
        drop(self.file.take());

        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Temporary file deleted");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to delete temporary file"
                );
            }
        }
    }
}
