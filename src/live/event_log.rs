use std::collections::{HashSet, VecDeque};

use crate::models::MatchEvent;

/// Size of the live head window.
pub const LIVE_WINDOW: usize = 100;

/// Outcome of applying a push UPDATE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventUpdate {
    Replaced,
    Removed,
    /// The id is not in the active view.
    Ignored,
}

/// Active view of a match's events, most recent first, never holding an id twice.
///
/// The bound starts at the live window and grows by every page of history appended
/// through [`EventLog::append_older`], so head inserts only evict entries beyond what
/// the viewer asked to see.
#[derive(Debug, Clone)]
pub struct EventLog {
    entries: VecDeque<MatchEvent>,
    capacity: usize,
    window: usize,
    removed: HashSet<i64>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_window(LIVE_WINDOW)
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(window: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: window,
            window,
            removed: HashSet::new(),
        }
    }

    /// Replace the contents with the initial window from the fetch.
    pub fn seed(&mut self, events: Vec<MatchEvent>) {
        self.entries.clear();
        self.removed.clear();
        self.capacity = self.window;
        for event in events {
            if event.is_deleted {
                self.removed.insert(event.id);
                continue;
            }
            if self.position(event.id).is_none() {
                self.entries.push_back(event);
            }
        }
        self.entries.truncate(self.capacity);
    }

    /// Place a server-confirmed event at the head.
    ///
    /// If the push INSERT for the same id got here first the stored row is refreshed in
    /// place instead of being duplicated. An id already deleted through push stays deleted.
    pub fn insert_confirmed(&mut self, event: MatchEvent) -> bool {
        if event.is_deleted || self.removed.contains(&event.id) {
            return false;
        }
        match self.position(event.id) {
            Some(index) => self.entries[index] = event,
            None => self.push_head(event),
        }
        true
    }

    /// Push INSERT: prepend unless the id is already present or was deleted.
    pub fn apply_insert(&mut self, event: MatchEvent) -> bool {
        if event.is_deleted || self.removed.contains(&event.id) || self.contains(event.id) {
            return false;
        }
        self.push_head(event);
        true
    }

    /// Push UPDATE: drop soft-deleted rows from the view, otherwise replace in place.
    pub fn apply_update(&mut self, event: MatchEvent) -> EventUpdate {
        if event.is_deleted {
            self.removed.insert(event.id);
            return match self.remove(event.id) {
                Some(_) => EventUpdate::Removed,
                None => EventUpdate::Ignored,
            };
        }

        match self.position(event.id) {
            Some(index) => {
                self.entries[index] = event;
                EventUpdate::Replaced
            }
            None => EventUpdate::Ignored,
        }
    }

    /// Take an event out of the active view and remember it as deleted.
    pub fn remove(&mut self, event_id: i64) -> Option<MatchEvent> {
        self.removed.insert(event_id);
        let index = self.position(event_id)?;
        self.entries.remove(index)
    }

    /// Append a page of older history to the tail; returns how many rows were added.
    ///
    /// The head is never touched or reordered.
    pub fn append_older(&mut self, page: Vec<MatchEvent>) -> usize {
        let mut appended = 0;
        for event in page {
            if event.is_deleted || self.removed.contains(&event.id) || self.contains(event.id) {
                continue;
            }
            self.entries.push_back(event);
            appended += 1;
        }
        self.capacity += appended;
        appended
    }

    /// Cursor for the next history page.
    pub fn oldest_id(&self) -> Option<i64> {
        self.entries.back().map(|event| event.id)
    }

    pub fn contains(&self, event_id: i64) -> bool {
        self.position(event_id).is_some()
    }

    pub fn get(&self, event_id: i64) -> Option<&MatchEvent> {
        self.entries.iter().find(|event| event.id == event_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<MatchEvent> {
        self.entries.iter().cloned().collect()
    }

    fn position(&self, event_id: i64) -> Option<usize> {
        self.entries.iter().position(|event| event.id == event_id)
    }

    fn push_head(&mut self, event: MatchEvent) {
        self.entries.push_front(event);
        self.entries.truncate(self.capacity);
    }
}
