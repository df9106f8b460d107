use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::settings::LiveSettings;
use crate::live::authority::can_manage;
use crate::live::clock::{format_clock, read_clock, Period};
use crate::live::error::{CommandError, CommandResult, FetchError};
use crate::live::event_log::LIVE_WINDOW;
use crate::live::store::{LiveStore, SessionStatus};
use crate::live::sync::{RealtimeSyncClient, TICK_INTERVAL};
use crate::models::{
    Actor, ClockAction, Match, MatchEvent, PostGoalRequest, PostMessageRequest,
    UpdateClockRequest,
};
use crate::transport::{MatchCommandService, PushSource};

pub const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub tick_interval: Duration,
    pub page_size: i64,
    pub live_window: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            page_size: DEFAULT_PAGE_SIZE,
            live_window: LIVE_WINDOW,
        }
    }
}

impl From<&LiveSettings> for SessionOptions {
    fn from(settings: &LiveSettings) -> Self {
        Self {
            tick_interval: Duration::from_millis(settings.tick_interval_ms.max(1)),
            page_size: settings.default_page_size,
            live_window: settings.live_window,
        }
    }
}

/// Everything the viewer renders, derived at read time.
#[derive(Debug, Clone, Serialize)]
pub struct LiveView {
    pub live_match: Option<Match>,
    pub events: Vec<MatchEvent>,
    pub loading: bool,
    pub error: Option<String>,
    pub connected: bool,
    pub elapsed_seconds: i64,
    pub clock: String,
    pub period: Period,
    pub can_manage: bool,
}

/// A viewer's session on one match: seeds state from the command endpoint, keeps it
/// current from push, and exposes the command surface.
pub struct LiveMatchSession {
    commands: Arc<dyn MatchCommandService>,
    push: Arc<dyn PushSource>,
    actor: Actor,
    options: SessionOptions,
    store: Arc<LiveStore>,
    sync: Option<RealtimeSyncClient>,
}

impl LiveMatchSession {
    pub fn new(
        commands: Arc<dyn MatchCommandService>,
        push: Arc<dyn PushSource>,
        actor: Actor,
        match_id: i64,
        options: SessionOptions,
    ) -> Self {
        let store = Arc::new(LiveStore::new(match_id, options.live_window));
        Self {
            commands,
            push,
            actor,
            options,
            store,
            sync: None,
        }
    }

    pub fn match_id(&self) -> i64 {
        self.store.match_id()
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn set_actor(&mut self, actor: Actor) {
        self.actor = actor;
    }

    /// Observable state for the current match id. Replaced on every match switch.
    pub fn store(&self) -> Arc<LiveStore> {
        self.store.clone()
    }

    pub fn is_syncing(&self) -> bool {
        self.sync.as_ref().is_some_and(RealtimeSyncClient::is_open)
    }

    /// Initial fetch, then subscriptions and tick. A failed fetch leaves the session in
    /// the error state with nothing subscribed.
    pub async fn activate(&mut self) -> Result<(), FetchError> {
        let store = self.store.clone();
        let match_id = store.match_id();
        tracing::info!("Activating live session for match {}", match_id);

        store.set_loading(true);
        store.set_error(None);
        let snapshot = match self.commands.fetch_initial(match_id).await {
            Ok(snapshot) => snapshot,
            Err(source) => {
                let error = FetchError { match_id, source };
                tracing::error!("{}", error);
                store.set_error(Some(error.to_string()));
                store.set_loading(false);
                return Err(error);
            }
        };

        store.match_state().replace(snapshot.live_match);
        store.update_events(|log| {
            log.seed(snapshot.events);
            true
        });
        store.set_loading(false);

        let sync =
            RealtimeSyncClient::open(self.push.clone(), store, self.options.tick_interval).await;
        self.sync = Some(sync);
        Ok(())
    }

    /// Cancel the tick and close both subscriptions.
    pub fn teardown(&mut self) {
        if let Some(mut sync) = self.sync.take() {
            sync.close();
        }
        self.store.set_connected(false);
    }

    /// Tear down, discard all state for the current match and start over on `match_id`.
    pub async fn switch_match(&mut self, match_id: i64) -> Result<(), FetchError> {
        tracing::info!(
            "Switching live session from match {} to {}",
            self.match_id(),
            match_id
        );
        self.teardown();
        self.store = Arc::new(LiveStore::new(match_id, self.options.live_window));
        self.activate().await
    }

    pub fn view(&self) -> LiveView {
        self.view_at(Utc::now())
    }

    pub fn view_at(&self, now: DateTime<Utc>) -> LiveView {
        let live_match = self.store.current_match();
        let SessionStatus {
            loading,
            error,
            connected,
        } = self.store.status();

        let (elapsed_seconds, period) = match &live_match {
            Some(m) => {
                let reading = read_clock(m, now);
                (reading.elapsed_seconds, reading.period)
            }
            None => (0, Period::NotStarted),
        };

        LiveView {
            can_manage: can_manage(&self.actor, live_match.as_ref()),
            events: self.store.events(),
            live_match,
            loading,
            error,
            connected,
            elapsed_seconds,
            clock: format_clock(elapsed_seconds),
            period,
        }
    }

    pub fn can_manage(&self) -> bool {
        can_manage(&self.actor, self.store.current_match().as_ref())
    }

    /// Drive the match clock. The snapshot is replaced only once the server answers.
    pub async fn update_clock(
        &self,
        action: ClockAction,
        half_duration_minutes: Option<i32>,
    ) -> CommandResult<Match> {
        let store = self.store.clone();
        let request = UpdateClockRequest {
            action,
            half_duration_minutes,
        };
        let updated = self
            .commands
            .update_clock(store.match_id(), &request)
            .await
            .map_err(|e| command_failed("update clock", e.into()))?;

        tracing::info!(
            "Clock action {} applied to match {}",
            action.as_str(),
            updated.id
        );
        store.match_state().replace(updated.clone());
        Ok(updated)
    }

    /// Record a goal. The returned row carries the new score and replaces the snapshot;
    /// the goal event itself reaches the log through push.
    pub async fn post_goal(
        &self,
        team_id: i64,
        player_id: Option<i64>,
        note: Option<String>,
    ) -> CommandResult<Match> {
        let store = self.store.clone();
        let request = PostGoalRequest {
            team_id,
            player_id,
            note,
        };
        let refreshed = self
            .commands
            .post_goal(store.match_id(), &request)
            .await
            .map_err(|e| command_failed("post goal", e.into()))?;

        store.match_state().replace(refreshed.clone());
        Ok(refreshed)
    }

    pub async fn post_message(&self, message: impl Into<String>) -> CommandResult<MatchEvent> {
        let store = self.store.clone();
        let request = PostMessageRequest {
            message: message.into(),
        };
        let event = self
            .commands
            .post_message(store.match_id(), &request)
            .await
            .map_err(|e| command_failed("post message", e.into()))?;

        store.update_events(|log| log.insert_confirmed(event.clone()));
        Ok(event)
    }

    /// Removes the event locally before the request is sent.
    ///
    /// The removal stays in place if the request fails, so the view can drift from the
    /// server's log until the next fetch.
    // TODO: restore the removed event when the delete request fails.
    pub async fn delete_event(&self, event_id: i64) -> CommandResult<()> {
        let store = self.store.clone();
        store.update_events(|log| log.remove(event_id).is_some());

        self.commands
            .delete_event(store.match_id(), event_id)
            .await
            .map_err(|e| command_failed("delete event", e.into()))
    }

    /// Fetch the page before the oldest loaded event and append it to the tail.
    /// Returns the number of rows appended.
    pub async fn load_more_events(&self) -> CommandResult<usize> {
        let before_id = self
            .store
            .with_events(|log| log.oldest_id())
            .ok_or_else(|| CommandError::new("No events loaded to page from"))?;
        self.load_events_before(before_id, self.options.page_size)
            .await
    }

    pub async fn load_events_before(&self, before_id: i64, limit: i64) -> CommandResult<usize> {
        let store = self.store.clone();
        let page = self
            .commands
            .load_events_before(store.match_id(), before_id, limit)
            .await
            .map_err(|e| command_failed("load events", e.into()))?;

        let mut appended = 0;
        store.update_events(|log| {
            appended = log.append_older(page);
            appended > 0
        });
        Ok(appended)
    }
}

impl Drop for LiveMatchSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn command_failed(command: &str, error: CommandError) -> CommandError {
    tracing::warn!("Command {} failed: {}", command, error);
    error
}
