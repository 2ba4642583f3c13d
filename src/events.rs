//! In-process pub/sub hub standing in for the managed platform's realtime
//! channels. Topic-keyed broadcast channels feed the SSE endpoint; payloads
//! mean "re-fetch", not incremental merge.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

/// Topic naming. Broad table topics for coarse invalidation, user-scoped
/// topics for a client's own rows.
pub mod topics {
    use uuid::Uuid;

    pub const SERVICE_REQUESTS: &str = "service_requests";

    pub fn requests_for_user(user_id: Uuid) -> String {
        format!("service_requests:user:{}", user_id)
    }

    pub fn notifications_for_user(user_id: Uuid) -> String {
        format!("notifications:user:{}", user_id)
    }
}

#[derive(Clone)]
pub struct EventHub {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<serde_json::Value>>>>,
    capacity: usize,
}

impl EventHub {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Publish a JSON value to a topic. No-op if nobody is subscribed.
    pub async fn publish(&self, topic: &str, value: serde_json::Value) {
        let channels = self.channels.read().await;
        if let Some(tx) = channels.get(topic) {
            let _ = tx.send(value);
        }
    }

    /// Row-change event for a table topic and its user-scoped sibling.
    pub async fn publish_change(&self, table: &str, row_id: Uuid, user_id: Option<Uuid>) {
        let payload = serde_json::json!({
            "type": "change",
            "table": table,
            "id": row_id,
        });
        self.publish(table, payload.clone()).await;
        if let Some(user_id) = user_id {
            self.publish(&format!("{}:user:{}", table, user_id), payload)
                .await;
        }
    }

    /// Subscribe to a topic, creating the channel on first use.
    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<serde_json::Value> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        tx.subscribe()
    }

    /// Drop channels with zero subscribers.
    pub async fn cleanup(&self) {
        let mut channels = self.channels.write().await;
        channels.retain(|_, tx| tx.receiver_count() > 0);
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_subscribe_roundtrip() {
        let hub = EventHub::new();
        let mut rx = hub.subscribe(topics::SERVICE_REQUESTS).await;

        let value = serde_json::json!({"type": "change", "table": "service_requests"});
        hub.publish(topics::SERVICE_REQUESTS, value.clone()).await;

        assert_eq!(rx.recv().await.unwrap(), value);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        let hub = EventHub::new();
        hub.publish("nobody:listening", serde_json::json!({})).await;
    }

    #[tokio::test]
    async fn test_change_event_reaches_both_topics() {
        let hub = EventHub::new();
        let user_id = Uuid::new_v4();
        let row_id = Uuid::new_v4();

        let mut broad = hub.subscribe(topics::SERVICE_REQUESTS).await;
        let mut scoped = hub.subscribe(&topics::requests_for_user(user_id)).await;

        hub.publish_change("service_requests", row_id, Some(user_id))
            .await;

        let broad_event = broad.recv().await.unwrap();
        let scoped_event = scoped.recv().await.unwrap();
        assert_eq!(broad_event, scoped_event);
        assert_eq!(broad_event["id"], serde_json::json!(row_id));
    }

    #[tokio::test]
    async fn test_fanout_carries_per_recipient_ids() {
        let hub = EventHub::new();
        let recipients = [Uuid::new_v4(), Uuid::new_v4()];
        let rows = [Uuid::new_v4(), Uuid::new_v4()];

        let mut rx_a = hub
            .subscribe(&topics::notifications_for_user(recipients[0]))
            .await;
        let mut rx_b = hub
            .subscribe(&topics::notifications_for_user(recipients[1]))
            .await;

        for (row_id, recipient) in rows.iter().zip(recipients.iter()) {
            hub.publish(
                &topics::notifications_for_user(*recipient),
                serde_json::json!({"type": "change", "table": "notifications", "id": row_id}),
            )
            .await;
        }

        assert_eq!(
            rx_a.recv().await.unwrap()["id"],
            serde_json::json!(rows[0])
        );
        assert_eq!(
            rx_b.recv().await.unwrap()["id"],
            serde_json::json!(rows[1])
        );
    }

    #[tokio::test]
    async fn test_cleanup_removes_idle_channels() {
        let hub = EventHub::new();
        let rx = hub.subscribe("ephemeral").await;
        drop(rx);
        hub.cleanup().await;
        assert!(hub.channels.read().await.is_empty());
    }
}
