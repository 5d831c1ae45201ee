use tokio::sync::broadcast;

use crate::models::events::ServerEvent;

/// Messages buffered per subscriber before a slow client starts skipping.
const CHANNEL_CAPACITY: usize = 100;

/// Publish side of the live-update channel. Handlers only see this trait, so
/// the transport behind it can change without touching them.
pub trait EventPublisher: Send + Sync {
    /// Sends `event` to every connected client and returns how many were reached.
    fn publish(&self, event: &ServerEvent) -> usize;
}

/// Fan-out over a tokio broadcast channel. Each WebSocket session holds one
/// receiver; events are serialized once and shared as JSON text.
#[derive(Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<String>,
}

impl Broadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for Broadcaster {
    fn publish(&self, event: &ServerEvent) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to encode {} event: {}", event.name(), e);
                return 0;
            }
        };
        // No receivers is not an error: nobody is watching right now.
        let reached = self.tx.send(payload).unwrap_or(0);
        tracing::debug!("Broadcast {} to {} client(s)", event.name(), reached);
        reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deleted(name: &str) -> ServerEvent {
        ServerEvent::PhotoDeleted {
            filename: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_every_subscriber_receives_event_once() {
        let hub = Broadcaster::new();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        assert_eq!(hub.publish(&deleted("cat_1.png")), 2);

        for rx in [&mut a, &mut b] {
            let msg = rx.recv().await.unwrap();
            let event: ServerEvent = serde_json::from_str(&msg).unwrap();
            assert_eq!(event, deleted("cat_1.png"));
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_publish_without_clients_is_harmless() {
        let hub = Broadcaster::new();
        assert_eq!(hub.client_count(), 0);
        assert_eq!(hub.publish(&deleted("x.png")), 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let hub = Broadcaster::new();
        let _early = hub.subscribe();
        hub.publish(&deleted("before.png"));

        let mut late = hub.subscribe();
        hub.publish(&deleted("after.png"));

        let event: ServerEvent = serde_json::from_str(&late.recv().await.unwrap()).unwrap();
        assert_eq!(event, deleted("after.png"));
        assert!(late.try_recv().is_err());
    }
}
