use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::tts::{S3Event, TtsPipelineApi},
    error::{AppError, AppResult},
};

pub const SUCCESS_MESSAGE: &str = "Text-to-Speech conversion completed successfully!";
pub const FAILURE_MESSAGE: &str = "An error occurred during the Text-to-Speech conversion.";

/// Return contract of one invocation: a status code and a short message
#[derive(Debug, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status_code: status.as_u16(),
            body: message.to_string(),
        }
    }
}

pub struct EventsController {
    pipeline: Arc<dyn TtsPipelineApi>,
}

impl EventsController {
    pub fn new(pipeline: Arc<dyn TtsPipelineApi>) -> Self {
        Self { pipeline }
    }

    /// POST /events - Convert every object referenced by an S3 notification
    ///
    /// Records are processed one after another; a failing record does not
    /// stop the following ones. The invocation succeeds only if all did.
    pub async fn handle_event(
        State(controller): State<Arc<EventsController>>,
        Json(event): Json<S3Event>,
    ) -> AppResult<(StatusCode, Json<InvocationResponse>)> {
        if event.records.is_empty() {
            return Err(AppError::BadRequest(
                "event contains no records".to_string(),
            ));
        }

        let record_count = event.records.len();
        let mut failures = 0usize;

        for record in &event.records {
            if controller.pipeline.handle_record(record).await.is_err() {
                failures += 1;
            }
        }

        let status = if failures == 0 {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        tracing::info!(
            record_count = record_count,
            failures = failures,
            status = status.as_u16(),
            "Event processed"
        );

        let message = if failures == 0 {
            SUCCESS_MESSAGE
        } else {
            FAILURE_MESSAGE
        };

        Ok((status, Json(InvocationResponse::new(status, message))))
    }
}
