mod action_service;
mod config_flow_service;

pub use action_service::ObjectActionService;
pub use config_flow_service::{ConfigFlowError, ConfigFlowResult, ConfigFlowService};
