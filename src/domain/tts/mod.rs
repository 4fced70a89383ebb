pub mod chunker;
pub mod error;
pub mod event;
pub mod key;
pub mod service;

pub use chunker::{split_text, DEFAULT_MAX_CHUNK_LENGTH};
pub use error::PipelineError;
pub use event::{S3Event, S3EventRecord};
pub use key::derive_audio_key;
pub use service::{ConversionResult, PipelineSettings, TtsPipeline, TtsPipelineApi};
