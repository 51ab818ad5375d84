mod allowlist_path_policy;
mod broadcast_event_bus;
mod in_memory_service_registry;

pub use allowlist_path_policy::AllowListPathPolicy;
pub use broadcast_event_bus::BroadcastEventBus;
pub use in_memory_service_registry::InMemoryServiceRegistry;
