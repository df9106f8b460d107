use std::sync::Arc;

use chrono::Utc;
use redis::AsyncCommands;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::settings::LiveSettings;
use crate::db::match_queries::{MatchQueries, NewMatchEvent};
use crate::live::authority::can_manage;
use crate::live::clock::event_minute;
use crate::models::{
    Actor, EventType, Match, MatchEvent, MatchPatch, MatchSnapshot, PostGoalRequest,
    PostMessageRequest, PushChannel, PushMessage, UpdateClockRequest,
};
use crate::services::clock_transitions::{apply_clock_action, TransitionError};

#[derive(Debug, Error)]
pub enum LiveMatchError {
    #[error("Match {0} not found")]
    MatchNotFound(i64),

    #[error("Event {0} not found")]
    EventNotFound(i64),

    #[error("Not allowed to manage this match")]
    Forbidden,

    #[error("Match {0} is not in play")]
    NotInPlay(i64),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Transition(#[from] TransitionError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Server side of the match command endpoint.
///
/// Every mutation re-checks authority against the stored match, persists, then publishes
/// the changed row or event on the match's push channels.
#[derive(Debug, Clone)]
pub struct LiveMatchService {
    queries: MatchQueries,
    redis_client: Option<Arc<redis::Client>>,
    settings: LiveSettings,
}

impl LiveMatchService {
    pub fn new(
        pool: PgPool,
        redis_client: Option<Arc<redis::Client>>,
        settings: LiveSettings,
    ) -> Self {
        Self {
            queries: MatchQueries::new(pool),
            redis_client,
            settings,
        }
    }

    pub async fn snapshot(&self, match_id: i64) -> Result<MatchSnapshot, LiveMatchError> {
        let live_match = self.load(match_id).await?;
        let limit = i64::try_from(self.settings.live_window).unwrap_or(i64::MAX);
        let events = self.queries.recent_events(match_id, limit).await?;
        Ok(MatchSnapshot { live_match, events })
    }

    pub async fn events_before(
        &self,
        match_id: i64,
        before_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<MatchEvent>, LiveMatchError> {
        self.load(match_id).await?;
        let limit = self.settings.page_limit(limit);
        Ok(self.queries.events_before(match_id, before_id, limit).await?)
    }

    pub async fn update_clock(
        &self,
        actor: &Actor,
        match_id: i64,
        request: &UpdateClockRequest,
    ) -> Result<Match, LiveMatchError> {
        let current = self.load_managed(actor, match_id).await?;
        let next = apply_clock_action(
            &current,
            request.action,
            request.half_duration_minutes,
            Utc::now(),
        )?;
        let saved = self.queries.save_clock_state(&next).await?;

        info!(
            "Match {} clock: {} by actor {:?}",
            match_id,
            request.action.as_str(),
            actor.id
        );
        self.broadcast_row(&saved).await;
        Ok(saved)
    }

    pub async fn post_goal(
        &self,
        actor: &Actor,
        match_id: i64,
        request: &PostGoalRequest,
    ) -> Result<Match, LiveMatchError> {
        let current = self.load_managed(actor, match_id).await?;
        if !current.involves_team(request.team_id) {
            return Err(LiveMatchError::Validation(format!(
                "Team {} is not playing in match {}",
                request.team_id, match_id
            )));
        }
        let (match_minute, extra_time) =
            event_minute(&current, Utc::now()).ok_or(LiveMatchError::NotInPlay(match_id))?;

        let note = request
            .note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(str::to_string);
        let event = self
            .queries
            .insert_event(&NewMatchEvent {
                match_id,
                event_type: EventType::Goal,
                team_id: Some(request.team_id),
                player_id: request.player_id,
                match_minute: Some(match_minute),
                extra_time,
                message: note,
            })
            .await?;
        let updated = self.queries.recompute_score(match_id).await?;

        info!(
            "Goal for team {} in match {} ({}')",
            request.team_id, match_id, match_minute
        );
        self.broadcast_event(PushMessage::EventInserted(event)).await;
        self.broadcast_row(&updated).await;
        Ok(updated)
    }

    pub async fn post_message(
        &self,
        actor: &Actor,
        match_id: i64,
        request: &PostMessageRequest,
    ) -> Result<MatchEvent, LiveMatchError> {
        let current = self.load_managed(actor, match_id).await?;
        let message = request.message.trim();
        if message.is_empty() {
            return Err(LiveMatchError::Validation("Message must not be empty".into()));
        }

        let minute = event_minute(&current, Utc::now());
        let event = self
            .queries
            .insert_event(&NewMatchEvent {
                match_id,
                event_type: EventType::Message,
                team_id: None,
                player_id: None,
                match_minute: minute.map(|(m, _)| m),
                extra_time: minute.and_then(|(_, extra)| extra),
                message: Some(message.to_string()),
            })
            .await?;

        self.broadcast_event(PushMessage::EventInserted(event.clone())).await;
        Ok(event)
    }

    pub async fn delete_event(
        &self,
        actor: &Actor,
        match_id: i64,
        event_id: i64,
    ) -> Result<MatchEvent, LiveMatchError> {
        self.load_managed(actor, match_id).await?;
        let deleted = self
            .queries
            .soft_delete_event(match_id, event_id)
            .await?
            .ok_or(LiveMatchError::EventNotFound(event_id))?;

        info!("Event {} in match {} soft-deleted", event_id, match_id);
        self.broadcast_event(PushMessage::EventUpdated(deleted.clone())).await;

        if deleted.is_goal() {
            let updated = self.queries.recompute_score(match_id).await?;
            self.broadcast_row(&updated).await;
        }
        Ok(deleted)
    }

    async fn load(&self, match_id: i64) -> Result<Match, LiveMatchError> {
        self.queries
            .get_match(match_id)
            .await?
            .ok_or(LiveMatchError::MatchNotFound(match_id))
    }

    async fn load_managed(&self, actor: &Actor, match_id: i64) -> Result<Match, LiveMatchError> {
        let live_match = self.load(match_id).await?;
        if !can_manage(actor, Some(&live_match)) {
            warn!(
                "Actor {:?} ({:?}) denied on match {}",
                actor.id, actor.role, match_id
            );
            return Err(LiveMatchError::Forbidden);
        }
        Ok(live_match)
    }

    async fn broadcast_row(&self, live_match: &Match) {
        let message = PushMessage::MatchRowUpdated(MatchPatch::from(live_match));
        self.publish(PushChannel::MatchRow.name(live_match.id), &message)
            .await;
    }

    async fn broadcast_event(&self, message: PushMessage) {
        if let Some(match_id) = message.match_id() {
            self.publish(PushChannel::MatchEvents.name(match_id), &message)
                .await;
        }
    }

    /// Publish failures are logged; the command has already been persisted.
    async fn publish(&self, channel: String, message: &PushMessage) {
        let Some(redis_client) = &self.redis_client else {
            return;
        };

        let payload = match serde_json::to_string(message) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize push for {}: {}", channel, e);
                return;
            }
        };

        let mut conn = match redis_client.get_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Failed to connect to Redis for {}: {}", channel, e);
                return;
            }
        };

        let result: Result<i32, redis::RedisError> = conn.publish(&channel, payload).await;
        match result {
            Ok(receivers) => info!("📡 Published to {} ({} subscribers)", channel, receivers),
            Err(e) => error!("❌ Failed to publish to {}: {}", channel, e),
        }
    }
}
