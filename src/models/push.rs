use serde::{Deserialize, Serialize};

use crate::models::live_match::MatchPatch;
use crate::models::match_event::MatchEvent;

/// Row-level change notification delivered over a push channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "record", rename_all = "snake_case")]
pub enum PushMessage {
    MatchRowUpdated(MatchPatch),
    EventInserted(MatchEvent),
    EventUpdated(MatchEvent),
}

impl PushMessage {
    /// The match a message belongs to, when the payload carries it.
    pub fn match_id(&self) -> Option<i64> {
        match self {
            PushMessage::MatchRowUpdated(patch) => patch.id,
            PushMessage::EventInserted(event) | PushMessage::EventUpdated(event) => {
                Some(event.match_id)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushChannel {
    MatchRow,
    MatchEvents,
}

impl PushChannel {
    pub const ALL: [PushChannel; 2] = [PushChannel::MatchRow, PushChannel::MatchEvents];

    pub fn name(&self, match_id: i64) -> String {
        match self {
            PushChannel::MatchRow => format!("match:{}:row", match_id),
            PushChannel::MatchEvents => format!("match:{}:events", match_id),
        }
    }
}
