use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_pipeline::controllers::events::EventsController;
use tts_pipeline::domain::tts::TtsPipeline;
use tts_pipeline::infrastructure::config::{Config, LogFormat};
use tts_pipeline::infrastructure::http::start_http_server;
use tts_pipeline::infrastructure::repositories::{PollySpeechRepository, S3ObjectRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        source_bucket = %config.source_bucket,
        destination_bucket = %config.destination_bucket,
        voice = %config.voice_id,
        max_chunk_length = config.max_chunk_length,
        synthesis_concurrency = config.synthesis_concurrency,
        "Starting TTS pipeline on {}:{}",
        config.host,
        config.port
    );

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;

    tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

    let s3_client = Arc::new(aws_sdk_s3::Client::new(&aws_config));
    let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));

    // === DEPENDENCY INJECTION SETUP ===
    let object_repo = Arc::new(S3ObjectRepository::new(s3_client));
    let speech_repo = Arc::new(PollySpeechRepository::new(
        polly_client,
        config.voice_id.clone(),
    ));

    let pipeline = Arc::new(TtsPipeline::new(
        object_repo,
        speech_repo,
        config.pipeline_settings(),
    ));
    let events_controller = Arc::new(EventsController::new(pipeline));

    start_http_server(Arc::new(config), events_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "tts_pipeline=debug,tower_http=debug"
    } else {
        "tts_pipeline=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
