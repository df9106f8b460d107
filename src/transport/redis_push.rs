use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};

use crate::live::error::PushError;
use crate::models::{PushChannel, PushMessage};
use crate::transport::PushSource;

/// Push source reading the per-match redis pub/sub channels the command endpoint publishes to.
#[derive(Debug, Clone)]
pub struct RedisPushSource {
    client: Arc<redis::Client>,
}

impl RedisPushSource {
    pub fn new(client: Arc<redis::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PushSource for RedisPushSource {
    async fn subscribe(
        &self,
        match_id: i64,
        channel: PushChannel,
    ) -> Result<BoxStream<'static, PushMessage>, PushError> {
        let channel_name = channel.name(match_id);
        let conn = self.client.get_async_connection().await?;
        let mut pubsub = conn.into_pubsub();
        pubsub.subscribe(&channel_name).await?;
        tracing::info!("Subscribed to push channel {}", channel_name);

        let stream = pubsub.into_on_message().filter_map(move |msg| {
            let decoded = match msg.get_payload::<String>() {
                Ok(payload) => decode_push(&channel_name, &payload),
                Err(e) => {
                    tracing::error!("Unreadable payload on {}: {}", channel_name, e);
                    None
                }
            };
            futures::future::ready(decoded)
        });

        Ok(stream.boxed())
    }
}

/// Parse one pub/sub payload. Malformed payloads are logged and skipped.
fn decode_push(channel_name: &str, payload: &str) -> Option<PushMessage> {
    match serde_json::from_str::<PushMessage>(payload) {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::warn!("Dropping malformed push on {}: {}", channel_name, e);
            None
        }
    }
}
