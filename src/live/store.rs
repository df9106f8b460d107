use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::live::event_log::EventLog;
use crate::live::state::MatchStateHolder;
use crate::models::{Match, MatchEvent};

/// Loading / error / connectivity flags exposed to the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub connected: bool,
}

/// Everything one session owns for one match id. Dropped and rebuilt on match switch.
#[derive(Debug)]
pub struct LiveStore {
    match_id: i64,
    match_state: MatchStateHolder,
    events: watch::Sender<EventLog>,
    status: watch::Sender<SessionStatus>,
    tick: watch::Sender<DateTime<Utc>>,
}

impl LiveStore {
    pub fn new(match_id: i64, live_window: usize) -> Self {
        let (events, _) = watch::channel(EventLog::with_window(live_window));
        let (status, _) = watch::channel(SessionStatus::default());
        let (tick, _) = watch::channel(Utc::now());
        Self {
            match_id,
            match_state: MatchStateHolder::new(),
            events,
            status,
            tick,
        }
    }

    pub fn match_id(&self) -> i64 {
        self.match_id
    }

    pub fn match_state(&self) -> &MatchStateHolder {
        &self.match_state
    }

    pub fn current_match(&self) -> Option<Match> {
        self.match_state.current()
    }

    pub fn events(&self) -> Vec<MatchEvent> {
        self.events.borrow().to_vec()
    }

    /// Run `f` against the event log and notify observers only when it reports a change.
    pub fn update_events<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut EventLog) -> bool,
    {
        self.events.send_if_modified(f)
    }

    pub fn with_events<R>(&self, f: impl FnOnce(&EventLog) -> R) -> R {
        f(&self.events.borrow())
    }

    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    pub fn set_loading(&self, loading: bool) {
        self.status.send_modify(|status| status.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.status.send_modify(|status| status.error = error);
    }

    pub fn set_connected(&self, connected: bool) {
        self.status.send_if_modified(|status| {
            let changed = status.connected != connected;
            status.connected = connected;
            changed
        });
    }

    /// Publish a fresh wall-clock sample so observers re-read the clock.
    pub fn tick(&self, now: DateTime<Utc>) {
        self.tick.send_replace(now);
    }

    pub fn watch_match(&self) -> watch::Receiver<Option<Match>> {
        self.match_state.subscribe()
    }

    pub fn watch_events(&self) -> watch::Receiver<EventLog> {
        self.events.subscribe()
    }

    pub fn watch_status(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    pub fn watch_tick(&self) -> watch::Receiver<DateTime<Utc>> {
        self.tick.subscribe()
    }
}
