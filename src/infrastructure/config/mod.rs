use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::domain::tts::{PipelineSettings, DEFAULT_MAX_CHUNK_LENGTH};

const DEFAULT_VOICE_ID: &str = "Joanna";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub aws_region: String,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Pipeline
    pub source_bucket: String,
    pub destination_bucket: String,
    pub voice_id: String,
    pub max_chunk_length: usize,
    pub synthesis_concurrency: usize,
    pub scratch_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow!("missing required environment variable {}", name))
        };
        let or_default = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let max_chunk_length: usize = or_default("MAX_CHUNK_LENGTH", &DEFAULT_MAX_CHUNK_LENGTH.to_string())
            .parse()
            .context("MAX_CHUNK_LENGTH must be a positive integer")?;
        if max_chunk_length == 0 {
            return Err(anyhow!("MAX_CHUNK_LENGTH must be a positive integer"));
        }

        let synthesis_concurrency: usize = or_default("SYNTHESIS_CONCURRENCY", "1")
            .parse()
            .context("SYNTHESIS_CONCURRENCY must be a positive integer")?;
        if synthesis_concurrency == 0 {
            return Err(anyhow!("SYNTHESIS_CONCURRENCY must be a positive integer"));
        }

        let config = Config {
            host: or_default("HOST", "0.0.0.0"),
            port: or_default("PORT", "8080")
                .parse()
                .context("PORT must be a valid port number")?,
            aws_region: or_default("AWS_REGION", "eu-west-1"),
            environment: match or_default("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match or_default("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            source_bucket: required("SOURCE_BUCKET")?,
            destination_bucket: required("DESTINATION_BUCKET")?,
            voice_id: or_default("VOICE_ID", DEFAULT_VOICE_ID),
            max_chunk_length,
            synthesis_concurrency,
            scratch_dir: lookup("SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            source_bucket: self.source_bucket.clone(),
            destination_bucket: self.destination_bucket.clone(),
            max_chunk_length: self.max_chunk_length,
            synthesis_concurrency: self.synthesis_concurrency,
            scratch_dir: self.scratch_dir.clone(),
        }
    }
}
