mod action_service_impl;
mod config_flow_impl;
mod connection_registry;
mod integration;

pub use action_service_impl::ObjectActionServiceImpl;
pub use config_flow_impl::ConfigFlowServiceImpl;
pub use connection_registry::ConnectionRegistry;
pub use integration::{Action, ActionHandler, S3Integration};
