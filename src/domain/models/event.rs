use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event fired after a presigned URL was generated
pub const EVENT_SIGNED_URL: &str = "s3_signed_url";

/// An event published on the host event bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: String,
    pub data: serde_json::Value,
    pub time_fired: DateTime<Utc>,
}

impl Event {
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            time_fired: Utc::now(),
        }
    }
}

/// Payload of [`EVENT_SIGNED_URL`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedUrlEvent {
    pub url: String,
    pub message: String,
    pub bucket: String,
    pub key: String,
}

impl From<SignedUrlEvent> for Event {
    fn from(payload: SignedUrlEvent) -> Self {
        let data = serde_json::json!({
            "url": payload.url,
            "message": payload.message,
            "bucket": payload.bucket,
            "key": payload.key,
        });
        Event::new(EVENT_SIGNED_URL, data)
    }
}
