use chrono::{DateTime, Duration, TimeZone, Utc};

use matchday_live::models::{EventType, Match, MatchEvent, MatchStatus};

pub const HOME_TEAM: i64 = 10;
pub const AWAY_TEAM: i64 = 20;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 15, 0, 0).unwrap()
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    base_time() + Duration::seconds(seconds)
}

pub fn scheduled_match(id: i64) -> Match {
    Match::scheduled(id, HOME_TEAM, AWAY_TEAM)
}

/// A match that kicked off at `base_time()`.
pub fn first_half_match(id: i64) -> Match {
    Match {
        status: MatchStatus::Live,
        kickoff_time: Some(base_time()),
        ..scheduled_match(id)
    }
}

/// Kickoff at 0s, halftime at 2700s, second half from 3600s.
pub fn second_half_match(id: i64) -> Match {
    Match {
        status: MatchStatus::Live,
        kickoff_time: Some(base_time()),
        halftime_start: Some(at(2700)),
        second_half_start: Some(at(3600)),
        ..scheduled_match(id)
    }
}

pub fn event(id: i64, match_id: i64, event_type: EventType) -> MatchEvent {
    MatchEvent {
        id,
        match_id,
        event_type,
        team_id: None,
        player_id: None,
        secondary_player_id: None,
        match_minute: None,
        extra_time: None,
        message: None,
        created_at: at(id),
        is_deleted: false,
    }
}

pub fn message_event(id: i64, match_id: i64, text: &str) -> MatchEvent {
    MatchEvent {
        message: Some(text.to_string()),
        ..event(id, match_id, EventType::Message)
    }
}

pub fn goal_event(id: i64, match_id: i64, team_id: i64, minute: i32) -> MatchEvent {
    MatchEvent {
        team_id: Some(team_id),
        match_minute: Some(minute),
        ..event(id, match_id, EventType::Goal)
    }
}

/// Events with ids `from..=to`, most recent first.
pub fn messages_desc(match_id: i64, from: i64, to: i64) -> Vec<MatchEvent> {
    (from..=to)
        .rev()
        .map(|id| message_event(id, match_id, &format!("message {}", id)))
        .collect()
}

pub fn deleted(event: MatchEvent) -> MatchEvent {
    MatchEvent {
        is_deleted: true,
        ..event
    }
}
