//! S3 storage client built on the object_store crate
//!
//! One `AmazonS3` store is built per bucket on first use, all sharing the
//! connection's credentials, region and endpoint.

pub mod s3_client;

pub use s3_client::{S3ClientFactory, S3ObjectStorageClient};

use object_store::aws::{AmazonS3, AmazonS3Builder};

use crate::domain::{
    errors::{StorageError, StorageResult},
    models::ConnectionConfig,
    value_objects::BucketName,
};

/// Create an S3 store for one bucket of a connection.
///
/// Requests are always signed with SigV4.
pub fn create_s3_store(config: &ConnectionConfig, bucket: &BucketName) -> StorageResult<AmazonS3> {
    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(bucket.as_str())
        .with_region(config.region.as_str())
        .with_access_key_id(&config.access_key_id)
        .with_secret_access_key(&config.secret_access_key);

    if let Some(endpoint) = &config.endpoint_url {
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(endpoint.starts_with("http://"));
    }

    builder.build().map_err(|e| StorageError::ClientConfiguration {
        message: e.to_string(),
    })
}
