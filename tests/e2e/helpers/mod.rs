use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use tts_pipeline::controllers::events::EventsController;
use tts_pipeline::domain::tts::{PipelineSettings, TtsPipeline};
use tts_pipeline::infrastructure::http::create_router;
use tts_pipeline::infrastructure::repositories::{
    ObjectRepository, PollySpeechRepository, S3ObjectRepository, SpeechRepository,
};

pub mod fakes;

use api_client::TestClient;
use fakes::{FakeSpeechService, InMemoryObjectStore};

pub const SOURCE_BUCKET: &str = "tts-source";
pub const DESTINATION_BUCKET: &str = "tts-destination";

pub struct TestContext {
    pub client: TestClient,
    pub objects: Arc<InMemoryObjectStore>,
    pub speech: Arc<FakeSpeechService>,
    scratch_dir: TempDir,
}

impl TestContext {
    /// Start a server backed by in-memory doubles
    pub async fn new(max_chunk_length: usize, synthesis_concurrency: usize) -> Self {
        Self::with_speech(
            max_chunk_length,
            synthesis_concurrency,
            FakeSpeechService::default(),
        )
        .await
    }

    pub async fn with_speech(
        max_chunk_length: usize,
        synthesis_concurrency: usize,
        speech: FakeSpeechService,
    ) -> Self {
        let objects = Arc::new(InMemoryObjectStore::default());
        let speech = Arc::new(speech);
        let scratch_dir = tempfile::tempdir().expect("Failed to create scratch dir");

        let client = start_server(
            objects.clone(),
            speech.clone(),
            settings(scratch_dir.path().to_path_buf(), max_chunk_length, synthesis_concurrency),
        )
        .await;

        Self {
            client,
            objects,
            speech,
            scratch_dir,
        }
    }

    pub fn seed_text(&self, key: &str, text: &str) {
        self.objects.insert(SOURCE_BUCKET, key, text.as_bytes().to_vec());
    }

    pub fn uploaded_audio(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.get(DESTINATION_BUCKET, key)
    }

    pub fn scratch_files(&self) -> usize {
        std::fs::read_dir(self.scratch_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async { TestContext::new(3000, 1).await }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Scratch directory is removed via Drop on TempDir
        }
    }
}

/// Start a server wired to the real AWS repositories, pointing at an
/// endpoint nobody listens on
pub async fn start_server_with_unreachable_aws(scratch_dir: PathBuf) -> TestClient {
    let object_repo = Arc::new(S3ObjectRepository::new(Arc::new(
        aws_mocks::create_unreachable_s3_client(),
    )));
    let speech_repo = Arc::new(PollySpeechRepository::new(
        Arc::new(aws_mocks::create_unreachable_polly_client()),
        "Joanna".to_string(),
    ));

    start_server(object_repo, speech_repo, settings(scratch_dir, 3000, 1)).await
}

fn settings(
    scratch_dir: PathBuf,
    max_chunk_length: usize,
    synthesis_concurrency: usize,
) -> PipelineSettings {
    PipelineSettings {
        max_chunk_length,
        synthesis_concurrency,
        scratch_dir,
        ..PipelineSettings::new(SOURCE_BUCKET.to_string(), DESTINATION_BUCKET.to_string())
    }
}

async fn start_server(
    object_repo: Arc<dyn ObjectRepository>,
    speech_repo: Arc<dyn SpeechRepository>,
    settings: PipelineSettings,
) -> TestClient {
    let pipeline = Arc::new(TtsPipeline::new(object_repo, speech_repo, settings));
    let app = create_router(Arc::new(EventsController::new(pipeline)));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestClient::new(&format!("http://{}", addr))
}

/// S3 notification for objects in the given bucket
pub fn s3_event(bucket: &str, keys: &[&str]) -> serde_json::Value {
    let records: Vec<serde_json::Value> = keys
        .iter()
        .map(|key| {
            serde_json::json!({
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": bucket, "arn": format!("arn:aws:s3:::{}", bucket) },
                    "object": { "key": key, "size": 0 }
                }
            })
        })
        .collect();

    serde_json::json!({ "Records": records })
}
