use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Goal,
    Substitution,
    Message,
}

/// Something that happened during a match. Identity is `id`; ids are assigned by the
/// server and grow monotonically, which is what history paging relies on.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MatchEvent {
    pub id: i64,
    pub match_id: i64,
    pub event_type: EventType,
    pub team_id: Option<i64>,
    /// Scorer for goals, incoming player for substitutions.
    pub player_id: Option<i64>,
    /// Outgoing player for substitutions.
    pub secondary_player_id: Option<i64>,
    pub match_minute: Option<i32>,
    /// Stoppage minutes beyond `match_minute`.
    pub extra_time: Option<i32>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl MatchEvent {
    pub fn is_goal(&self) -> bool {
        self.event_type == EventType::Goal
    }
}
