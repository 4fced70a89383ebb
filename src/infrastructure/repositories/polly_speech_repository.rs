use super::speech_repository::{SpeechError, SpeechRepository};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly implementation of the speech repository
///
/// Always requests MP3 output with the standard engine and one fixed voice.
pub struct PollySpeechRepository {
    polly_client: Arc<PollyClient>,
    voice_id: String,
}

impl PollySpeechRepository {
    pub fn new(polly_client: Arc<PollyClient>, voice_id: String) -> Self {
        Self {
            polly_client,
            voice_id,
        }
    }
}

#[async_trait]
impl SpeechRepository for PollySpeechRepository {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let voice_id = VoiceId::from(self.voice_id.as_str());
        let engine = Engine::Standard;

        tracing::debug!(
            voice = %self.voice_id,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(engine)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    voice = %self.voice_id,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                SpeechError::Request(format!("AWS Polly error: {}", e))
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            SpeechError::MissingAudioStream
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();

        // Polly never answers non-empty text with zero bytes of audio
        if audio_bytes.is_empty() && !text.is_empty() {
            tracing::error!(
                content_type = ?result.content_type,
                "No audio stream found in Polly response"
            );
            return Err(SpeechError::MissingAudioStream);
        }

        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }
}
