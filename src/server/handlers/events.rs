use std::convert::Infallible;

use axum::extract::Extension;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;

use crate::api::DynAPI;
use crate::entities::Event;

/// Lifecycle events as server-sent events, named after the event type.
pub async fn stream(
    Extension(api): Extension<DynAPI>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let events = stream::unfold(api.subscribe(), |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => return Some((Ok::<_, Infallible>(to_sse(&event)), rx)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

fn to_sse(event: &Event) -> SseEvent {
    let data = match event {
        Event::NavigationLaunched { app } => serde_json::json!({ "app": app }),
        Event::NavigationClosed { reason } => serde_json::json!({ "reason": reason }),
    };

    SseEvent::default().event(event.name()).data(data.to_string())
}
