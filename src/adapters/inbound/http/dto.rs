use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    domain::{
        errors::ValidationError,
        models::{ConfigEntry, ConnectionConfig, EntrySource},
    },
    ports::{
        host::{ServiceCallError, ServiceName},
        services::ConfigFlowError,
    },
};

/// DTO for a config entry; the secret never leaves the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEntryDto {
    pub entry_id: String,
    pub domain: String,
    pub title: String,
    pub source: EntrySource,
    pub data: ConnectionConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ConfigEntry> for ConfigEntryDto {
    fn from(entry: ConfigEntry) -> Self {
        ConfigEntryDto {
            entry_id: entry.entry_id.to_string(),
            domain: entry.domain,
            title: entry.title,
            source: entry.source,
            data: entry.data.redacted(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// DTO for a registered service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDto {
    pub domain: String,
    pub service: String,
}

impl From<ServiceName> for ServiceDto {
    fn from(name: ServiceName) -> Self {
        ServiceDto {
            domain: name.domain,
            service: name.service,
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
    pub timestamp: DateTime<Utc>,
}

/// Standard success response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponseDto {
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponseDto {
    pub fn from_service_call_error(error: ServiceCallError) -> Self {
        let mut details = HashMap::new();

        match &error {
            ServiceCallError::ServiceNotFound(name) => {
                details.insert(
                    "domain".to_string(),
                    serde_json::Value::String(name.domain.clone()),
                );
                details.insert(
                    "service".to_string(),
                    serde_json::Value::String(name.service.clone()),
                );
            }
        }

        ErrorResponseDto {
            error: "ServiceNotFound".to_string(),
            message: error.to_string(),
            details: Some(details),
            timestamp: Utc::now(),
        }
    }

    pub fn from_config_flow_error(error: &ConfigFlowError) -> Self {
        let (kind, details) = match error {
            ConfigFlowError::UnknownEntry(entry_id) => {
                let mut details = HashMap::new();
                details.insert(
                    "entry_id".to_string(),
                    serde_json::Value::String(entry_id.to_string()),
                );
                ("UnknownEntry", Some(details))
            }
            ConfigFlowError::Repository(_) => ("RepositoryError", None),
            ConfigFlowError::Setup(_) => ("SetupFailed", None),
        };

        ErrorResponseDto {
            error: kind.to_string(),
            message: error.to_string(),
            details,
            timestamp: Utc::now(),
        }
    }

    pub fn from_validation_error(field: &str, error: ValidationError) -> Self {
        Self::bad_request(&format!("Invalid {}: {}", field, error))
    }

    pub fn bad_request(message: &str) -> Self {
        ErrorResponseDto {
            error: "BadRequest".to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }
}

impl SuccessResponseDto {
    pub fn new(message: &str) -> Self {
        SuccessResponseDto {
            message: message.to_string(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_data(message: &str, data: serde_json::Value) -> Self {
        SuccessResponseDto {
            message: message.to_string(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Region;

    #[test]
    fn test_entry_dto_redacts_secret() {
        let config =
            ConnectionConfig::new(Region::default(), "AKIAEXAMPLE", "very-secret", None).unwrap();
        let dto = ConfigEntryDto::from(ConfigEntry::new(config, EntrySource::User));

        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("very-secret"));
        assert!(json.contains("AKIAEXAMPLE"));
    }
}
