use tokio::sync::broadcast;
use tracing::debug;

use crate::{domain::models::Event, ports::host::EventBus};

const DEFAULT_CAPACITY: usize = 256;

/// Event bus fanning events out to every current subscriber
#[derive(Debug, Clone)]
pub struct BroadcastEventBus {
    sender: broadcast::Sender<Event>,
}

impl BroadcastEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for BroadcastEventBus {
    fn publish(&self, event: Event) {
        let event_type = event.event_type.clone();
        // Err only means nobody is listening
        match self.sender.send(event) {
            Ok(receivers) => debug!(%event_type, receivers, "Event published"),
            Err(_) => debug!(%event_type, "Event published without subscribers"),
        }
    }
}
