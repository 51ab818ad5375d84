use axum::{
    extract::State,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
};
use futures::{stream, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::adapters::inbound::http::router::AppState;

/// Stream bus events as server-sent events named after the event type
pub async fn event_stream(
    State(app_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, axum::Error>>> {
    let receiver = app_state.event_bus.subscribe();

    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let sse = SseEvent::default()
                        .event(event.event_type.clone())
                        .json_data(&event);
                    return Some((sse, receiver));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event stream subscriber lagging, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
