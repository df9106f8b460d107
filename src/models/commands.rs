use serde::{Deserialize, Serialize};

use crate::models::live_match::Match;
use crate::models::match_event::MatchEvent;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ClockAction {
    StartFirstHalf,
    StartHalftime,
    StartSecondHalf,
    EndMatch,
}

impl ClockAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockAction::StartFirstHalf => "start-first-half",
            ClockAction::StartHalftime => "start-halftime",
            ClockAction::StartSecondHalf => "start-second-half",
            ClockAction::EndMatch => "end-match",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateClockRequest {
    pub action: ClockAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostGoalRequest {
    pub team_id: i64,
    #[serde(default)]
    pub player_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventPageQuery {
    pub before_id: i64,
    pub limit: Option<i64>,
}

/// Fetch-initial payload: the match row plus the head of its event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    #[serde(rename = "match")]
    pub live_match: Match,
    pub events: Vec<MatchEvent>,
}

/// JSON envelope used by every command endpoint response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
