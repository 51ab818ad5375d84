use async_trait::async_trait;
use thiserror::Error;

use crate::{
    domain::{
        errors::StorageError,
        models::{ConfigEntry, FlowResult, OptionsInput, UserInput},
        value_objects::EntryId,
    },
    ports::repositories::RepositoryError,
};

#[derive(Debug, Error)]
pub enum ConfigFlowError {
    #[error("Config entry {0} not found")]
    UnknownEntry(EntryId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Failed to set up config entry: {0}")]
    Setup(#[from] StorageError),
}

pub type ConfigFlowResult<T> = Result<T, ConfigFlowError>;

/// Interactive creation and maintenance of config entries
#[async_trait]
pub trait ConfigFlowService: Send + Sync + 'static {
    /// The empty create form
    fn user_form(&self) -> FlowResult;

    /// Submit the create form
    async fn step_user(&self, input: UserInput) -> ConfigFlowResult<FlowResult>;

    /// Create an entry from startup configuration
    async fn step_import(&self, input: UserInput) -> ConfigFlowResult<FlowResult>;

    /// The options form with current values suggested
    async fn options_form(&self, entry_id: &EntryId) -> ConfigFlowResult<FlowResult>;

    /// Submit the options form; the entry is reloaded with the new data
    async fn step_options(
        &self,
        entry_id: &EntryId,
        input: OptionsInput,
    ) -> ConfigFlowResult<FlowResult>;

    /// Disable and delete an entry
    async fn remove_entry(&self, entry_id: &EntryId) -> ConfigFlowResult<ConfigEntry>;

    async fn entries(&self) -> ConfigFlowResult<Vec<ConfigEntry>>;
}
