use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::S3Integration;
use crate::{
    domain::{
        models::{
            config_flow::{
                create_schema, update_schema, FIELD_ACCESS_KEY_ID, FIELD_ENDPOINT_URL, FIELD_REGION,
                FIELD_SECRET_ACCESS_KEY,
            },
            ConfigEntry, ConnectionConfig, EntrySource, FlowResult, OptionsInput, UserInput,
            DOMAIN,
        },
        value_objects::{EntryId, Region},
    },
    ports::{
        repositories::{ConfigEntryRepository, RepositoryError},
        services::{ConfigFlowError, ConfigFlowResult, ConfigFlowService},
    },
};

const STEP_USER: &str = "user";
const STEP_INIT: &str = "init";

type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Config flow backed by a config entry repository
pub struct ConfigFlowServiceImpl {
    repository: Arc<dyn ConfigEntryRepository>,
    integration: Arc<S3Integration>,
}

impl ConfigFlowServiceImpl {
    pub fn new(repository: Arc<dyn ConfigEntryRepository>, integration: Arc<S3Integration>) -> Self {
        Self {
            repository,
            integration,
        }
    }

    /// Enable every persisted entry; returns how many came up
    pub async fn setup_persisted_entries(&self) -> ConfigFlowResult<usize> {
        let entries = self.repository.list(DOMAIN).await?;
        let mut loaded = 0;
        for entry in &entries {
            match self.integration.setup_entry(entry).await {
                Ok(()) => loaded += 1,
                Err(err) => {
                    error!(entry_id = %entry.entry_id, "Failed to set up {}: {}", entry.title, err)
                }
            }
        }
        Ok(loaded)
    }

    async fn create_entry(
        &self,
        input: UserInput,
        source: EntrySource,
    ) -> ConfigFlowResult<FlowResult> {
        let access_key_id = input.aws_access_key_id.clone().unwrap_or_default();
        let config = match validate_connection(
            input.region_name.as_deref(),
            Some(access_key_id.as_str()),
            input.aws_secret_access_key.as_deref(),
            input.endpoint_url,
        ) {
            Ok(config) => config,
            Err(errors) => {
                return Ok(FlowResult::Form {
                    step_id: STEP_USER,
                    data_schema: create_schema(),
                    errors,
                })
            }
        };

        if self
            .repository
            .find_by_unique_id(DOMAIN, &config.access_key_id)
            .await?
            .is_some()
        {
            warn!("S3 connection for {} is already configured", config.access_key_id);
            return Ok(FlowResult::Abort {
                reason: "already_configured",
            });
        }

        let entry = ConfigEntry::new(config, source);
        match self.repository.add(entry.clone()).await {
            Ok(()) => {}
            Err(RepositoryError::DuplicateUniqueId(_)) => {
                return Ok(FlowResult::Abort {
                    reason: "already_configured",
                })
            }
            Err(err) => return Err(err.into()),
        }

        if let Err(err) = self.integration.setup_entry(&entry).await {
            self.repository.remove(&entry.entry_id).await?;
            return Err(err.into());
        }

        info!(entry_id = %entry.entry_id, "Created S3 config entry {}", entry.title);
        Ok(FlowResult::CreateEntry {
            title: entry.title.clone(),
            entry,
        })
    }

    async fn existing_entry(&self, entry_id: &EntryId) -> ConfigFlowResult<ConfigEntry> {
        self.repository
            .get(entry_id)
            .await?
            .ok_or(ConfigFlowError::UnknownEntry(*entry_id))
    }
}

#[async_trait]
impl ConfigFlowService for ConfigFlowServiceImpl {
    fn user_form(&self) -> FlowResult {
        FlowResult::form(STEP_USER, create_schema())
    }

    async fn step_user(&self, input: UserInput) -> ConfigFlowResult<FlowResult> {
        self.create_entry(input, EntrySource::User).await
    }

    async fn step_import(&self, input: UserInput) -> ConfigFlowResult<FlowResult> {
        self.create_entry(input, EntrySource::Import).await
    }

    async fn options_form(&self, entry_id: &EntryId) -> ConfigFlowResult<FlowResult> {
        let entry = self.existing_entry(entry_id).await?;
        let data_schema = update_schema()
            .into_iter()
            .map(|field| {
                let suggested = match field.name {
                    FIELD_REGION => Some(entry.data.region.to_string()),
                    FIELD_ENDPOINT_URL => entry.data.endpoint_url.clone(),
                    _ => None,
                };
                field.with_suggested_value(suggested)
            })
            .collect();
        Ok(FlowResult::form(STEP_INIT, data_schema))
    }

    async fn step_options(
        &self,
        entry_id: &EntryId,
        input: OptionsInput,
    ) -> ConfigFlowResult<FlowResult> {
        let mut entry = self.existing_entry(entry_id).await?;

        let data = match validate_connection(
            input.region_name.as_deref(),
            Some(entry.data.access_key_id.as_str()),
            input.aws_secret_access_key.as_deref(),
            input.endpoint_url,
        ) {
            Ok(data) => data,
            Err(errors) => {
                return Ok(FlowResult::Form {
                    step_id: STEP_INIT,
                    data_schema: update_schema(),
                    errors,
                })
            }
        };

        entry.data = data;
        entry.updated_at = Utc::now();
        self.repository.update(entry.clone()).await?;
        self.integration.reload_entry(&entry).await?;

        info!(entry_id = %entry.entry_id, "Updated S3 config entry {}", entry.title);
        Ok(FlowResult::UpdateEntry { entry })
    }

    async fn remove_entry(&self, entry_id: &EntryId) -> ConfigFlowResult<ConfigEntry> {
        self.integration.unload_entry(entry_id).await;
        let entry = self.repository.remove(entry_id).await.map_err(|err| match err {
            RepositoryError::NotFound(id) => ConfigFlowError::UnknownEntry(id),
            other => other.into(),
        })?;
        info!(%entry_id, "Removed S3 config entry {}", entry.title);
        Ok(entry)
    }

    async fn entries(&self) -> ConfigFlowResult<Vec<ConfigEntry>> {
        Ok(self.repository.list(DOMAIN).await?)
    }
}

/// Check submitted form values, collecting one error code per bad field
fn validate_connection(
    region: Option<&str>,
    access_key_id: Option<&str>,
    secret_access_key: Option<&str>,
    endpoint_url: Option<String>,
) -> Result<ConnectionConfig, FieldErrors> {
    let mut errors = FieldErrors::new();

    let region = match region {
        None => Some(Region::default()),
        Some(region) => Region::new(region).ok(),
    };
    if region.is_none() {
        errors.insert(FIELD_REGION, "invalid_region");
    }

    let access_key_id = access_key_id.map(str::trim).unwrap_or_default();
    if access_key_id.is_empty() {
        errors.insert(FIELD_ACCESS_KEY_ID, "required");
    }

    let secret_access_key = secret_access_key.unwrap_or_default();
    if secret_access_key.is_empty() {
        errors.insert(FIELD_SECRET_ACCESS_KEY, "required");
    }

    let endpoint_url = endpoint_url.filter(|url| !url.trim().is_empty());
    if let Some(url) = &endpoint_url {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.insert(FIELD_ENDPOINT_URL, "invalid_url");
        }
    }

    match region {
        Some(region) if errors.is_empty() => {
            ConnectionConfig::new(region, access_key_id, secret_access_key, endpoint_url).map_err(
                |_| {
                    let mut errors = FieldErrors::new();
                    errors.insert("base", "invalid_connection");
                    errors
                },
            )
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_connection_defaults_region() {
        let config = validate_connection(None, Some("AKIA"), Some("secret"), None).unwrap();
        assert_eq!(config.region, Region::default());
    }

    #[test]
    fn test_validate_connection_collects_every_error() {
        let errors = validate_connection(
            Some("moon-1"),
            Some(""),
            None,
            Some("ftp://example".to_string()),
        )
        .unwrap_err();

        assert_eq!(errors.get(FIELD_REGION), Some(&"invalid_region"));
        assert_eq!(errors.get(FIELD_ACCESS_KEY_ID), Some(&"required"));
        assert_eq!(errors.get(FIELD_SECRET_ACCESS_KEY), Some(&"required"));
        assert_eq!(errors.get(FIELD_ENDPOINT_URL), Some(&"invalid_url"));
    }

    #[test]
    fn test_validate_connection_trims_access_key() {
        let config =
            validate_connection(Some("eu-west-1"), Some("  AKIA  "), Some("s"), None).unwrap();
        assert_eq!(config.access_key_id, "AKIA");
    }
}
