use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech service request failed: {0}")]
    Request(String),
    #[error("speech service response contained no audio stream")]
    MissingAudioStream,
}

/// Repository for speech synthesis.
/// Abstracts the underlying TTS provider (AWS Polly in production, in-memory fakes in tests)
///
/// Implementations synthesize exactly the text they are given. Splitting text
/// to respect provider limits happens before this call.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize one chunk of text and return the encoded audio (MP3)
    ///
    /// # Errors
    /// `Request` if the provider call fails, `MissingAudioStream` if the
    /// provider answered without usable audio
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError>;
}
