use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::ValidationError,
    value_objects::{EntryId, Region},
};

/// Integration domain under which entries and actions are registered
pub const DOMAIN: &str = "s3";

const SECRET_MASK: &str = "SHH_ITS_A_SECRET";

/// Credentials and location of one storage account
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(rename = "region_name", default)]
    pub region: Region,
    #[serde(rename = "aws_access_key_id")]
    pub access_key_id: String,
    #[serde(rename = "aws_secret_access_key")]
    pub secret_access_key: String,
    #[serde(rename = "endpoint_url", default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl ConnectionConfig {
    pub fn new(
        region: Region,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        endpoint_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let config = Self {
            region,
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            endpoint_url: endpoint_url.filter(|url| !url.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.access_key_id.trim().is_empty() {
            return Err(ValidationError::MissingField("aws_access_key_id"));
        }
        if self.secret_access_key.is_empty() {
            return Err(ValidationError::MissingField("aws_secret_access_key"));
        }
        if let Some(endpoint) = &self.endpoint_url {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidEndpoint(endpoint.clone()));
            }
        }
        Ok(())
    }

    /// Copy with the secret replaced, for logs and API listings
    pub fn redacted(&self) -> Self {
        Self {
            secret_access_key: SECRET_MASK.to_string(),
            ..self.clone()
        }
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &SECRET_MASK)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

/// How a config entry came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    User,
    Import,
}

/// A persisted, configured connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: EntryId,
    pub domain: String,
    pub title: String,
    pub unique_id: String,
    pub source: EntrySource,
    pub data: ConnectionConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConfigEntry {
    /// Create an entry whose title and unique id are the access key id
    pub fn new(data: ConnectionConfig, source: EntrySource) -> Self {
        let now = Utc::now();
        Self {
            entry_id: EntryId::generate(),
            domain: DOMAIN.to_string(),
            title: data.access_key_id.clone(),
            unique_id: data.access_key_id.clone(),
            source,
            data,
            created_at: now,
            updated_at: now,
        }
    }
}
