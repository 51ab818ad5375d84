mod config_entry_repository;

pub use config_entry_repository::{ConfigEntryRepository, RepositoryError, RepositoryResult};
