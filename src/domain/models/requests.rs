use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::{
    errors::{ActionError, ActionResult, ValidationError},
    value_objects::{BucketName, EntryId, ObjectKey, ObjectTags, StorageClass},
};

/// Longest expiry S3 accepts for a SigV4 presigned URL (seven days)
pub const MAX_PRESIGN_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Expiry used when a signed_url call does not give one
pub const DEFAULT_PRESIGN_SECONDS: u64 = 3600;

/// Call data of the `put` action, as received from the service registry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PutObjectParams {
    pub bucket: String,
    /// Defaults to the file name of `file_path`
    #[serde(default)]
    pub key: Option<String>,
    pub file_path: String,
    #[serde(default)]
    pub storage_class: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub entry_id: Option<EntryId>,
}

/// Call data of the `copy` action
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CopyObjectParams {
    #[serde(default)]
    pub bucket_source: Option<String>,
    #[serde(default)]
    pub bucket_destination: Option<String>,
    /// Used for whichever of source/destination bucket is missing
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub key_source: Option<String>,
    #[serde(default)]
    pub key_destination: Option<String>,
    #[serde(default)]
    pub entry_id: Option<EntryId>,
}

/// Call data of the `delete` action
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteObjectParams {
    pub bucket: String,
    pub key: String,
    #[serde(default)]
    pub entry_id: Option<EntryId>,
}

/// Call data of the `signed_url` action
#[derive(Debug, Clone, Deserialize)]
pub struct PresignParams {
    pub bucket: String,
    pub key: String,
    #[serde(default = "default_duration")]
    pub duration: u64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub entry_id: Option<EntryId>,
}

fn default_duration() -> u64 {
    DEFAULT_PRESIGN_SECONDS
}

/// A validated upload of a local file
#[derive(Debug, Clone, PartialEq)]
pub struct PutObjectRequest {
    pub bucket: BucketName,
    pub key: ObjectKey,
    pub file_path: PathBuf,
    pub storage_class: StorageClass,
    pub content_type: Option<String>,
    pub tags: ObjectTags,
}

/// A validated object copy, possibly across buckets
#[derive(Debug, Clone, PartialEq)]
pub struct CopyObjectRequest {
    pub source_bucket: BucketName,
    pub source_key: ObjectKey,
    pub destination_bucket: BucketName,
    pub destination_key: ObjectKey,
}

impl CopyObjectRequest {
    pub fn is_same_bucket(&self) -> bool {
        self.source_bucket == self.destination_bucket
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteObjectRequest {
    pub bucket: BucketName,
    pub key: ObjectKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresignRequest {
    pub bucket: BucketName,
    pub key: ObjectKey,
    pub expires_in_seconds: u64,
}

impl CopyObjectParams {
    /// Apply the shared `bucket` fallback and validate all four coordinates
    pub fn resolve(&self) -> ActionResult<CopyObjectRequest> {
        let source_bucket = self
            .bucket_source
            .as_ref()
            .or(self.bucket.as_ref())
            .ok_or(ActionError::MissingParameter("bucket_source"))?;
        let destination_bucket = self
            .bucket_destination
            .as_ref()
            .or(self.bucket.as_ref())
            .ok_or(ActionError::MissingParameter("bucket_destination"))?;
        let source_key = self
            .key_source
            .as_ref()
            .ok_or(ActionError::MissingParameter("key_source"))?;
        let destination_key = self
            .key_destination
            .as_ref()
            .ok_or(ActionError::MissingParameter("key_destination"))?;

        Ok(CopyObjectRequest {
            source_bucket: BucketName::new(source_bucket.as_str())
                .map_err(|e| ActionError::invalid("bucket_source", e))?,
            source_key: ObjectKey::new(source_key.as_str())
                .map_err(|e| ActionError::invalid("key_source", e))?,
            destination_bucket: BucketName::new(destination_bucket.as_str())
                .map_err(|e| ActionError::invalid("bucket_destination", e))?,
            destination_key: ObjectKey::new(destination_key.as_str())
                .map_err(|e| ActionError::invalid("key_destination", e))?,
        })
    }
}

impl DeleteObjectParams {
    pub fn resolve(&self) -> ActionResult<DeleteObjectRequest> {
        Ok(DeleteObjectRequest {
            bucket: BucketName::new(self.bucket.as_str())
                .map_err(|e| ActionError::invalid("bucket", e))?,
            key: ObjectKey::new(self.key.as_str()).map_err(|e| ActionError::invalid("key", e))?,
        })
    }
}

impl PresignParams {
    pub fn resolve(&self) -> ActionResult<PresignRequest> {
        if self.duration == 0 || self.duration > MAX_PRESIGN_SECONDS {
            return Err(ActionError::invalid(
                "duration",
                ValidationError::InvalidExpiry {
                    seconds: self.duration,
                    max: MAX_PRESIGN_SECONDS,
                },
            ));
        }

        Ok(PresignRequest {
            bucket: BucketName::new(self.bucket.as_str())
                .map_err(|e| ActionError::invalid("bucket", e))?,
            key: ObjectKey::new(self.key.as_str()).map_err(|e| ActionError::invalid("key", e))?,
            expires_in_seconds: self.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy_params() -> CopyObjectParams {
        CopyObjectParams {
            bucket_source: Some("b1".to_string()),
            bucket_destination: Some("b2".to_string()),
            key_source: Some("a.jpg".to_string()),
            key_destination: Some("b.jpg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_copy_resolves_explicit_buckets() {
        let request = copy_params().resolve().unwrap();
        assert_eq!(request.source_bucket.as_str(), "b1");
        assert_eq!(request.destination_bucket.as_str(), "b2");
        assert!(!request.is_same_bucket());
    }

    #[test]
    fn test_copy_falls_back_to_shared_bucket() {
        let params = CopyObjectParams {
            bucket: Some("shared".to_string()),
            key_source: Some("a.jpg".to_string()),
            key_destination: Some("b.jpg".to_string()),
            ..Default::default()
        };
        let request = params.resolve().unwrap();
        assert_eq!(request.source_bucket.as_str(), "shared");
        assert_eq!(request.destination_bucket.as_str(), "shared");
        assert!(request.is_same_bucket());

        // An explicit side wins over the shared bucket
        let params = CopyObjectParams {
            bucket_destination: Some("archive".to_string()),
            ..params
        };
        let request = params.resolve().unwrap();
        assert_eq!(request.source_bucket.as_str(), "shared");
        assert_eq!(request.destination_bucket.as_str(), "archive");
    }

    #[test]
    fn test_copy_rejects_each_missing_field() {
        let cases = [
            (
                CopyObjectParams { bucket_source: None, ..copy_params() },
                "bucket_source",
            ),
            (
                CopyObjectParams { bucket_destination: None, ..copy_params() },
                "bucket_destination",
            ),
            (
                CopyObjectParams { key_source: None, ..copy_params() },
                "key_source",
            ),
            (
                CopyObjectParams { key_destination: None, ..copy_params() },
                "key_destination",
            ),
        ];

        for (params, field) in cases {
            match params.resolve() {
                Err(ActionError::MissingParameter(missing)) => assert_eq!(missing, field),
                other => panic!("expected missing {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_presign_duration_bounds() {
        let params = PresignParams {
            bucket: "b1".to_string(),
            key: "k".to_string(),
            duration: 0,
            message: String::new(),
            entry_id: None,
        };
        assert!(params.resolve().is_err());

        let params = PresignParams { duration: MAX_PRESIGN_SECONDS + 1, ..params };
        assert!(params.resolve().is_err());

        let params = PresignParams { duration: 60, ..params };
        assert_eq!(params.resolve().unwrap().expires_in_seconds, 60);
    }

    #[test]
    fn test_presign_params_defaults() {
        let params: PresignParams =
            serde_json::from_value(serde_json::json!({"bucket": "b1", "key": "k"})).unwrap();
        assert_eq!(params.duration, DEFAULT_PRESIGN_SECONDS);
        assert_eq!(params.message, "");
    }
}
