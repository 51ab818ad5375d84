mod in_memory_config_entry_repository;
mod json_file_config_entry_repository;

pub use in_memory_config_entry_repository::InMemoryConfigEntryRepository;
pub use json_file_config_entry_repository::JsonFileConfigEntryRepository;
