use serde::{Deserialize, Serialize};

/// S3 object-created notification, as delivered by S3, MinIO webhooks or
/// an EventBridge relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3EventRecord {
    #[serde(rename = "eventName", skip_serializing_if = "Option::is_none", default)]
    pub event_name: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Object {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub size: Option<i64>,
}

impl S3EventRecord {
    pub fn bucket_name(&self) -> &str {
        &self.s3.bucket.name
    }

    /// Object key with the notification's form encoding removed
    ///
    /// S3 encodes spaces as `+` and everything else as percent escapes.
    /// Keys that don't decode to UTF-8 are returned as received.
    pub fn object_key(&self) -> String {
        let raw = self.s3.object.key.replace('+', " ");
        match urlencoding::decode(&raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => self.s3.object.key.clone(),
        }
    }
}
