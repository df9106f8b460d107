use tokio::sync::watch;

use crate::models::{Match, MatchPatch};

/// The single current match snapshot, observable through a watch channel.
///
/// Command responses replace the whole snapshot; push row updates are field-merged.
#[derive(Debug)]
pub struct MatchStateHolder {
    tx: watch::Sender<Option<Match>>,
}

impl Default for MatchStateHolder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStateHolder {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn current(&self) -> Option<Match> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Match>> {
        self.tx.subscribe()
    }

    /// Server-authoritative replacement.
    pub fn replace(&self, live_match: Match) {
        self.tx.send_replace(Some(live_match));
    }

    /// Merge a partial row into the snapshot. Returns `false` when there is nothing to
    /// merge into yet, or when the patch names a different match.
    pub fn merge(&self, patch: &MatchPatch) -> bool {
        self.tx.send_if_modified(|current| match current {
            Some(live_match) if patch.id.map_or(true, |id| id == live_match.id) => {
                patch.apply_to(live_match);
                true
            }
            _ => false,
        })
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }
}
