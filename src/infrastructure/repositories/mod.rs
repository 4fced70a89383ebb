pub mod object_repository;
pub mod polly_speech_repository;
pub mod s3_object_repository;
pub mod speech_repository;

pub use object_repository::{ObjectRepository, ObjectStoreError};
pub use polly_speech_repository::PollySpeechRepository;
pub use s3_object_repository::S3ObjectRepository;
pub use speech_repository::{SpeechError, SpeechRepository};
