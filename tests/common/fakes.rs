use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::StatusCode;

use matchday_live::live::PushError;
use matchday_live::models::{
    Match, MatchEvent, MatchSnapshot, PostGoalRequest, PostMessageRequest, PushChannel,
    PushMessage, UpdateClockRequest,
};
use matchday_live::transport::{MatchCommandService, PushSource, TransportError};

/// Scripted in-memory command endpoint.
#[derive(Default)]
pub struct FakeCommandService {
    snapshots: Mutex<HashMap<i64, MatchSnapshot>>,
    history: Mutex<HashMap<i64, Vec<MatchEvent>>>,
    next_match: Mutex<Option<Match>>,
    next_event: Mutex<Option<MatchEvent>>,
    failing: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl FakeCommandService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(self, live_match: Match, events: Vec<MatchEvent>) -> Self {
        self.snapshots.lock().unwrap().insert(
            live_match.id,
            MatchSnapshot {
                live_match,
                events,
            },
        );
        self
    }

    /// Full event history for paging, any order.
    pub fn with_history(self, match_id: i64, events: Vec<MatchEvent>) -> Self {
        self.history.lock().unwrap().insert(match_id, events);
        self
    }

    pub fn respond_with_match(&self, live_match: Match) {
        *self.next_match.lock().unwrap() = Some(live_match);
    }

    pub fn respond_with_event(&self, event: MatchEvent) {
        *self.next_event.lock().unwrap() = Some(event);
    }

    /// Make every mutating command fail with a 403.
    pub fn reject_commands(&self, reject: bool) {
        self.failing.store(reject, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_rejected(&self) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected {
                status: StatusCode::FORBIDDEN,
                message: "You are not allowed to manage this match".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MatchCommandService for FakeCommandService {
    async fn fetch_initial(&self, match_id: i64) -> Result<MatchSnapshot, TransportError> {
        self.record(format!("fetch_initial {}", match_id));
        self.snapshots
            .lock()
            .unwrap()
            .get(&match_id)
            .cloned()
            .ok_or(TransportError::Rejected {
                status: StatusCode::NOT_FOUND,
                message: format!("Match {} not found", match_id),
            })
    }

    async fn update_clock(
        &self,
        match_id: i64,
        request: &UpdateClockRequest,
    ) -> Result<Match, TransportError> {
        self.record(format!("update_clock {} {}", match_id, request.action.as_str()));
        self.check_rejected()?;
        self.next_match
            .lock()
            .unwrap()
            .take()
            .ok_or(TransportError::MissingPayload)
    }

    async fn post_goal(
        &self,
        match_id: i64,
        request: &PostGoalRequest,
    ) -> Result<Match, TransportError> {
        self.record(format!("post_goal {} team {}", match_id, request.team_id));
        self.check_rejected()?;
        self.next_match
            .lock()
            .unwrap()
            .take()
            .ok_or(TransportError::MissingPayload)
    }

    async fn post_message(
        &self,
        match_id: i64,
        request: &PostMessageRequest,
    ) -> Result<MatchEvent, TransportError> {
        self.record(format!("post_message {} {}", match_id, request.message));
        self.check_rejected()?;
        self.next_event
            .lock()
            .unwrap()
            .take()
            .ok_or(TransportError::MissingPayload)
    }

    async fn delete_event(&self, match_id: i64, event_id: i64) -> Result<(), TransportError> {
        self.record(format!("delete_event {} {}", match_id, event_id));
        self.check_rejected()
    }

    async fn load_events_before(
        &self,
        match_id: i64,
        before_id: i64,
        limit: i64,
    ) -> Result<Vec<MatchEvent>, TransportError> {
        self.record(format!(
            "load_events_before {} {} {}",
            match_id, before_id, limit
        ));
        let mut page: Vec<MatchEvent> = self
            .history
            .lock()
            .unwrap()
            .get(&match_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|event| event.id < before_id && !event.is_deleted)
            .collect();
        page.sort_by(|a, b| b.id.cmp(&a.id));
        page.truncate(limit.max(0) as usize);
        Ok(page)
    }
}

/// In-memory push service. Each subscription is an unbounded channel the test feeds.
#[derive(Default)]
pub struct FakePushSource {
    senders: Mutex<HashMap<(i64, PushChannel), mpsc::UnboundedSender<PushMessage>>>,
    unavailable: Mutex<HashSet<PushChannel>>,
    ending: Mutex<HashSet<PushChannel>>,
}

impl FakePushSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_unavailable(&self, channel: PushChannel) {
        self.unavailable.lock().unwrap().insert(channel);
    }

    /// Subscriptions to `channel` succeed but the stream is already finished.
    pub fn end_on_subscribe(&self, channel: PushChannel) {
        self.ending.lock().unwrap().insert(channel);
    }

    /// Deliver `message` on an open subscription. Returns false if nobody listens.
    pub fn send(&self, match_id: i64, channel: PushChannel, message: PushMessage) -> bool {
        match self.senders.lock().unwrap().get(&(match_id, channel)) {
            Some(sender) => sender.unbounded_send(message).is_ok(),
            None => false,
        }
    }

    pub fn is_subscribed(&self, match_id: i64, channel: PushChannel) -> bool {
        self.senders
            .lock()
            .unwrap()
            .get(&(match_id, channel))
            .is_some_and(|sender| !sender.is_closed())
    }

    /// Close the service side of a subscription, ending the stream.
    pub fn hang_up(&self, match_id: i64, channel: PushChannel) {
        self.senders.lock().unwrap().remove(&(match_id, channel));
    }
}

#[async_trait]
impl PushSource for FakePushSource {
    async fn subscribe(
        &self,
        match_id: i64,
        channel: PushChannel,
    ) -> Result<BoxStream<'static, PushMessage>, PushError> {
        if self.unavailable.lock().unwrap().contains(&channel) {
            return Err(PushError::Unavailable(channel.name(match_id)));
        }
        let (sender, receiver) = mpsc::unbounded();
        if self.ending.lock().unwrap().contains(&channel) {
            return Ok(receiver.boxed());
        }
        self.senders
            .lock()
            .unwrap()
            .insert((match_id, channel), sender);
        Ok(receiver.boxed())
    }
}
