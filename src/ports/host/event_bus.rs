use crate::domain::models::Event;

/// Publish side of the host event bus
pub trait EventBus: Send + Sync + 'static {
    fn publish(&self, event: Event);
}
