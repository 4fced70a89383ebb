use super::chunker::{split_text, DEFAULT_MAX_CHUNK_LENGTH};
use super::error::PipelineError;
use super::event::S3EventRecord;
use super::key::derive_audio_key;
use crate::infrastructure::repositories::{ObjectRepository, SpeechError, SpeechRepository};
use crate::infrastructure::scratch::ScratchFile;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub source_bucket: String,
    pub destination_bucket: String,
    pub max_chunk_length: usize,
    /// Synthesis calls allowed in flight at once; 1 means strictly sequential
    pub synthesis_concurrency: usize,
    pub scratch_dir: PathBuf,
}

impl PipelineSettings {
    pub fn new(source_bucket: String, destination_bucket: String) -> Self {
        Self {
            source_bucket,
            destination_bucket,
            max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
            synthesis_concurrency: 1,
            scratch_dir: std::env::temp_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub source_key: String,
    pub destination_key: String,
    pub chunk_count: usize,
    pub audio_size_bytes: u64,
}

/// Text-to-speech pipeline: fetch text, synthesize it chunk by chunk,
/// upload the concatenated audio.
pub struct TtsPipeline {
    object_repo: Arc<dyn ObjectRepository>,
    speech_repo: Arc<dyn SpeechRepository>,
    settings: PipelineSettings,
}

impl TtsPipeline {
    pub fn new(
        object_repo: Arc<dyn ObjectRepository>,
        speech_repo: Arc<dyn SpeechRepository>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            object_repo,
            speech_repo,
            settings,
        }
    }
}

#[async_trait]
pub trait TtsPipelineApi: Send + Sync {
    /// Convert `source_bucket/source_key` into an MP3 object in `destination_bucket`
    ///
    /// This operation:
    /// - Fetches the source text (UTF-8)
    /// - Synthesizes it in fixed-size chunks, in order
    /// - Uploads the concatenated audio under the `.mp3` key
    /// - Removes local scratch storage whatever the outcome
    ///
    /// Either the destination object is written with the complete audio, or
    /// an error is returned and nothing is uploaded.
    async fn run(
        &self,
        source_bucket: &str,
        destination_bucket: &str,
        source_key: &str,
    ) -> Result<ConversionResult, PipelineError>;

    /// Process one notification record against the configured buckets
    ///
    /// Records from any bucket other than the configured source bucket are
    /// rejected without touching the object store.
    async fn handle_record(
        &self,
        record: &S3EventRecord,
    ) -> Result<ConversionResult, PipelineError>;
}

#[async_trait]
impl TtsPipelineApi for TtsPipeline {
    async fn run(
        &self,
        source_bucket: &str,
        destination_bucket: &str,
        source_key: &str,
    ) -> Result<ConversionResult, PipelineError> {
        let destination_key = derive_audio_key(source_key);

        // 1. Fetch
        let text = self.fetch_text(source_bucket, source_key).await?;

        // 2. Chunk
        let chunks = split_text(&text, self.settings.max_chunk_length);
        tracing::info!(
            chunk_count = chunks.len(),
            text_length = text.chars().count(),
            max_chunk_length = self.settings.max_chunk_length,
            "Text split into chunks"
        );

        // 3-5. Synthesize, assemble and upload through a scratch file
        let mut scratch = ScratchFile::create(&self.settings.scratch_dir)
            .await
            .map_err(|e| PipelineError::Scratch(format!("failed to create scratch file: {}", e)))?;

        let outcome = self
            .synthesize_and_upload(&chunks, &mut scratch, destination_bucket, &destination_key)
            .await;

        // 6. Cleanup, regardless of outcome
        scratch.cleanup().await;

        let audio_size_bytes = outcome?;

        tracing::info!(
            source_key = source_key,
            destination_bucket = destination_bucket,
            destination_key = %destination_key,
            audio_size_bytes = audio_size_bytes,
            "Text-to-Speech conversion completed successfully"
        );

        Ok(ConversionResult {
            source_key: source_key.to_string(),
            destination_key,
            chunk_count: chunks.len(),
            audio_size_bytes,
        })
    }

    async fn handle_record(
        &self,
        record: &S3EventRecord,
    ) -> Result<ConversionResult, PipelineError> {
        let event_bucket = record.bucket_name();
        let source_key = record.object_key();

        let result = if event_bucket != self.settings.source_bucket {
            Err(PipelineError::UnexpectedBucket {
                expected: self.settings.source_bucket.clone(),
                actual: event_bucket.to_string(),
            })
        } else {
            self.run(
                &self.settings.source_bucket,
                &self.settings.destination_bucket,
                &source_key,
            )
            .await
        };

        if let Err(e) = &result {
            tracing::error!(
                error = %e,
                stage = e.stage(),
                bucket = event_bucket,
                key = %source_key,
                "Error processing file"
            );
        }

        result
    }
}

impl TtsPipeline {
    async fn fetch_text(&self, bucket: &str, key: &str) -> Result<String, PipelineError> {
        let start_time = Instant::now();
        tracing::info!(bucket = bucket, key = key, "Retrieving text file");

        let bytes = self
            .object_repo
            .get_object(bucket, key)
            .await
            .map_err(|e| PipelineError::Fetch(e.to_string()))?;

        let text = String::from_utf8(bytes).map_err(|e| {
            PipelineError::Fetch(format!("object {} is not valid UTF-8: {}", key, e))
        })?;

        tracing::info!(
            text_size_bytes = text.len(),
            elapsed_secs = format!("{:.2}", start_time.elapsed().as_secs_f64()),
            "Retrieved text file"
        );

        Ok(text)
    }

    /// Returns the number of audio bytes uploaded
    async fn synthesize_and_upload(
        &self,
        chunks: &[&str],
        scratch: &mut ScratchFile,
        destination_bucket: &str,
        destination_key: &str,
    ) -> Result<u64, PipelineError> {
        let start_time = Instant::now();
        self.synthesize_chunks(chunks, scratch).await?;
        scratch
            .finish()
            .await
            .map_err(|e| PipelineError::Scratch(e.to_string()))?;
        tracing::info!(
            chunk_count = chunks.len(),
            audio_size_bytes = scratch.bytes_written(),
            elapsed_secs = format!("{:.2}", start_time.elapsed().as_secs_f64()),
            "Speech synthesis completed"
        );

        let start_time = Instant::now();
        tracing::info!(
            bucket = destination_bucket,
            key = destination_key,
            "Uploading audio file"
        );
        self.object_repo
            .put_object(destination_bucket, destination_key, scratch.path())
            .await
            .map_err(|e| PipelineError::Upload(e.to_string()))?;
        tracing::info!(
            elapsed_secs = format!("{:.2}", start_time.elapsed().as_secs_f64()),
            "Audio file uploaded successfully"
        );

        Ok(scratch.bytes_written())
    }

    /// Synthesize every chunk and append the audio to `scratch` in chunk order
    ///
    /// Up to `synthesis_concurrency` requests run at once. `buffered` yields
    /// results in input order, so completion order never affects the output.
    /// The first failure drops the stream, cancelling the remaining requests.
    async fn synthesize_chunks(
        &self,
        chunks: &[&str],
        scratch: &mut ScratchFile,
    ) -> Result<(), PipelineError> {
        let concurrency = self.settings.synthesis_concurrency.max(1);

        // Futures are lazy: nothing is sent until `buffered` polls them
        let requests: Vec<_> = chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| {
                let chunk: &str = chunk;
                self.speech_repo
                    .synthesize(chunk)
                    .map(move |result| (index, result))
            })
            .collect();

        let mut segments = stream::iter(requests).buffered(concurrency);

        while let Some((index, result)) = segments.next().await {
            tracing::info!(
                chunk_index = index,
                chunk_length = chunks[index].chars().count(),
                "Chunk synthesis returned"
            );

            let audio = result.map_err(|e| match e {
                SpeechError::MissingAudioStream => PipelineError::Synthesis(format!(
                    "no audio stream returned for chunk {}",
                    index
                )),
                SpeechError::Request(msg) => {
                    PipelineError::Synthesis(format!("chunk {}: {}", index, msg))
                }
            })?;

            scratch
                .append(&audio)
                .await
                .map_err(|e| PipelineError::Scratch(e.to_string()))?;

            tracing::debug!(
                chunk_index = index,
                total_audio_size = scratch.bytes_written(),
                "Chunk synthesized and appended"
            );
        }

        Ok(())
    }
}
