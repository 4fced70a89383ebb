use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tts_pipeline::infrastructure::repositories::{
    ObjectRepository, ObjectStoreError, SpeechError, SpeechRepository,
};

/// Text that makes the fake speech service answer without audio
pub const SILENT_MARKER: &str = "<silence>";

#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl InMemoryObjectStore {
    pub fn insert(&self, bucket: &str, key: &str, content: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .insert((bucket.to_string(), key.to_string()), content.into());
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl ObjectRepository for InMemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        self.get(bucket, key).ok_or_else(|| ObjectStoreError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    async fn put_object(&self, bucket: &str, key: &str, path: &Path) -> Result<(), ObjectStoreError> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| ObjectStoreError::Request(e.to_string()))?;
        self.insert(bucket, key, content);
        Ok(())
    }
}

/// Echoes each chunk back as `[chunk]` audio and records every request
#[derive(Default)]
pub struct FakeSpeechService {
    requests: Mutex<Vec<String>>,
    slow_start: Option<Duration>,
}

impl FakeSpeechService {
    /// Earlier requests answer later: request `n` sleeps `step * (8 - n)`
    pub fn with_slow_start(step: Duration) -> Self {
        Self {
            requests: Mutex::default(),
            slow_start: Some(step),
        }
    }

    pub fn request_lengths(&self) -> Vec<usize> {
        self.requests
            .lock()
            .iter()
            .map(|t| t.chars().count())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl SpeechRepository for FakeSpeechService {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let position = {
            let mut requests = self.requests.lock();
            requests.push(text.to_string());
            requests.len() - 1
        };
        if let Some(step) = self.slow_start {
            let remaining = 8u32.saturating_sub(position as u32);
            tokio::time::sleep(step * remaining).await;
        }
        if text.contains(SILENT_MARKER) {
            return Err(SpeechError::MissingAudioStream);
        }
        Ok(format!("[{}]", text).into_bytes())
    }
}
