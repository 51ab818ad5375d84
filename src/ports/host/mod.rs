mod event_bus;
mod path_policy;
mod service_registry;

pub use event_bus::EventBus;
pub use path_policy::PathPolicy;
pub use service_registry::{
    ServiceCall, ServiceCallError, ServiceHandler, ServiceName, ServiceRegistry,
};
