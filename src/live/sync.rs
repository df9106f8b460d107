use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::live::event_log::EventUpdate;
use crate::live::store::LiveStore;
use crate::models::{PushChannel, PushMessage};
use crate::transport::PushSource;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Route one inbound push message into the store.
///
/// Safe under duplicate and out-of-order delivery. Messages for another match are dropped.
/// Returns whether the store changed.
pub fn apply_push(store: &LiveStore, message: PushMessage) -> bool {
    if let Some(match_id) = message.match_id() {
        if match_id != store.match_id() {
            tracing::warn!(
                "Dropping push for match {} on session for match {}",
                match_id,
                store.match_id()
            );
            return false;
        }
    }

    match message {
        PushMessage::MatchRowUpdated(patch) => {
            let merged = store.match_state().merge(&patch);
            if !merged {
                tracing::debug!("Match row push arrived before a snapshot; ignored");
            }
            merged
        }
        PushMessage::EventInserted(event) => {
            let event_id = event.id;
            let inserted = store.update_events(|log| log.apply_insert(event));
            if !inserted {
                tracing::debug!(
                    "Event {} already present or deleted, insert ignored",
                    event_id
                );
            }
            inserted
        }
        PushMessage::EventUpdated(event) => {
            store.update_events(|log| log.apply_update(event) != EventUpdate::Ignored)
        }
    }
}

/// Owns the two push subscriptions and the clock tick for one session.
///
/// Dropping or closing it aborts all three tasks before returning.
#[derive(Debug)]
pub struct RealtimeSyncClient {
    match_id: i64,
    subscriptions: Vec<JoinHandle<()>>,
    ticker: Option<JoinHandle<()>>,
}

impl RealtimeSyncClient {
    /// Open both channels and start the tick. A channel that fails to open leaves the
    /// session marked disconnected; the other channel and the tick still run.
    pub async fn open(
        push: Arc<dyn PushSource>,
        store: Arc<LiveStore>,
        tick_interval: Duration,
    ) -> Self {
        let match_id = store.match_id();
        let mut streams = Vec::with_capacity(PushChannel::ALL.len());
        let mut all_open = true;

        for channel in PushChannel::ALL {
            match push.subscribe(match_id, channel).await {
                Ok(stream) => streams.push((channel, stream)),
                Err(e) => {
                    tracing::error!(
                        "Failed to subscribe to {:?} for match {}: {}",
                        channel,
                        match_id,
                        e
                    );
                    all_open = false;
                }
            }
        }
        // Set before any listener runs so a stream that ends at once can clear it.
        store.set_connected(all_open);
        let subscriptions: Vec<JoinHandle<()>> = streams
            .into_iter()
            .map(|(channel, stream)| spawn_listener(stream, store.clone(), channel))
            .collect();

        let ticker = spawn_ticker(store, tick_interval);
        tracing::info!(
            "Realtime sync open for match {} ({} channels)",
            match_id,
            subscriptions.len()
        );

        Self {
            match_id,
            subscriptions,
            ticker: Some(ticker),
        }
    }

    pub fn match_id(&self) -> i64 {
        self.match_id
    }

    pub fn is_open(&self) -> bool {
        self.ticker.is_some()
    }

    /// Cancel the tick and close both subscriptions.
    pub fn close(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        for subscription in self.subscriptions.drain(..) {
            subscription.abort();
        }
        tracing::info!("Realtime sync closed for match {}", self.match_id);
    }
}

impl Drop for RealtimeSyncClient {
    fn drop(&mut self) {
        if self.is_open() {
            self.close();
        }
    }
}

fn spawn_listener(
    mut stream: futures::stream::BoxStream<'static, PushMessage>,
    store: Arc<LiveStore>,
    channel: PushChannel,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = stream.next().await {
            apply_push(&store, message);
        }
        tracing::warn!(
            "Push stream {:?} ended for match {}",
            channel,
            store.match_id()
        );
        store.set_connected(false);
    })
}

fn spawn_ticker(store: Arc<LiveStore>, period: Duration) -> JoinHandle<()> {
    // tokio::time::interval panics on a zero period
    let period = period.max(Duration::from_millis(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            store.tick(Utc::now());
        }
    })
}
