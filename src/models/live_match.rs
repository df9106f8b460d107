use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use sqlx::FromRow;

pub const DEFAULT_HALF_DURATION_MINUTES: i32 = 45;

fn default_half_duration() -> i32 {
    DEFAULT_HALF_DURATION_MINUTES
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    NotStarted,
    Live,
    Halftime,
    Completed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::NotStarted => "not_started",
            MatchStatus::Live => "live",
            MatchStatus::Halftime => "halftime",
            MatchStatus::Completed => "completed",
        }
    }
}

/// One contest and its temporal lifecycle.
///
/// The period is never stored; it is derived from the four timestamps and `status`
/// by [`crate::live::clock::read_clock`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Match {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    #[serde(default)]
    pub home_score: i32,
    #[serde(default)]
    pub away_score: i32,
    pub status: MatchStatus,
    pub kickoff_time: Option<DateTime<Utc>>,
    pub halftime_start: Option<DateTime<Utc>>,
    pub second_half_start: Option<DateTime<Utc>>,
    pub match_end_time: Option<DateTime<Utc>>,
    #[serde(default = "default_half_duration")]
    pub half_duration_minutes: i32,
}

impl Match {
    /// A fresh fixture as created by the scheduling workflow.
    pub fn scheduled(id: i64, home_team_id: i64, away_team_id: i64) -> Self {
        Self {
            id,
            home_team_id,
            away_team_id,
            home_score: 0,
            away_score: 0,
            status: MatchStatus::NotStarted,
            kickoff_time: None,
            halftime_start: None,
            second_half_start: None,
            match_end_time: None,
            half_duration_minutes: DEFAULT_HALF_DURATION_MINUTES,
        }
    }

    pub fn involves_team(&self, team_id: i64) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}

/// Partial match row as delivered by the match-row push channel.
///
/// Every field is optional. The nullable timestamps use a double option so that an
/// explicit `null` (clear the field) can be told apart from an absent key (leave it alone).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub kickoff_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub halftime_start: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub second_half_start: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub match_end_time: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_duration_minutes: Option<i32>,
}

impl MatchPatch {
    /// Merge the present fields into `target`, leaving every absent field untouched.
    pub fn apply_to(&self, target: &mut Match) {
        if let Some(home_team_id) = self.home_team_id {
            target.home_team_id = home_team_id;
        }
        if let Some(away_team_id) = self.away_team_id {
            target.away_team_id = away_team_id;
        }
        if let Some(home_score) = self.home_score {
            target.home_score = home_score;
        }
        if let Some(away_score) = self.away_score {
            target.away_score = away_score;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
        if let Some(kickoff_time) = self.kickoff_time {
            target.kickoff_time = kickoff_time;
        }
        if let Some(halftime_start) = self.halftime_start {
            target.halftime_start = halftime_start;
        }
        if let Some(second_half_start) = self.second_half_start {
            target.second_half_start = second_half_start;
        }
        if let Some(match_end_time) = self.match_end_time {
            target.match_end_time = match_end_time;
        }
        if let Some(half_duration_minutes) = self.half_duration_minutes {
            target.half_duration_minutes = half_duration_minutes;
        }
    }
}

impl From<&Match> for MatchPatch {
    fn from(m: &Match) -> Self {
        Self {
            id: Some(m.id),
            home_team_id: Some(m.home_team_id),
            away_team_id: Some(m.away_team_id),
            home_score: Some(m.home_score),
            away_score: Some(m.away_score),
            status: Some(m.status),
            kickoff_time: Some(m.kickoff_time),
            halftime_start: Some(m.halftime_start),
            second_half_start: Some(m.second_half_start),
            match_end_time: Some(m.match_end_time),
            half_duration_minutes: Some(m.half_duration_minutes),
        }
    }
}
