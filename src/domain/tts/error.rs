#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetch error: {0}")]
    Fetch(String),
    #[error("synthesis error: {0}")]
    Synthesis(String),
    #[error("upload error: {0}")]
    Upload(String),
    #[error("scratch storage error: {0}")]
    Scratch(String),
    #[error("event bucket '{actual}' does not match configured source bucket '{expected}'")]
    UnexpectedBucket { expected: String, actual: String },
}

impl PipelineError {
    /// Pipeline stage the error belongs to, for log fields
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) | PipelineError::UnexpectedBucket { .. } => "fetch",
            PipelineError::Synthesis(_) => "synthesize",
            PipelineError::Scratch(_) => "assemble",
            PipelineError::Upload(_) => "upload",
        }
    }
}

