use sqlx::PgPool;
use tracing::{debug, info};

use crate::models::{EventType, Match, MatchEvent};

const MATCH_COLUMNS: &str = "
    id, home_team_id, away_team_id, home_score, away_score, status,
    kickoff_time, halftime_start, second_half_start, match_end_time, half_duration_minutes
";

const EVENT_COLUMNS: &str = "
    id, match_id, event_type, team_id, player_id, secondary_player_id,
    match_minute, extra_time, message, created_at, is_deleted
";

/// Fields written for a new event row.
#[derive(Debug, Clone)]
pub struct NewMatchEvent {
    pub match_id: i64,
    pub event_type: EventType,
    pub team_id: Option<i64>,
    pub player_id: Option<i64>,
    pub match_minute: Option<i32>,
    pub extra_time: Option<i32>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MatchQueries {
    pool: PgPool,
}

impl MatchQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_match(&self, match_id: i64) -> Result<Option<Match>, sqlx::Error> {
        let query = format!("SELECT {} FROM matches WHERE id = $1", MATCH_COLUMNS);
        sqlx::query_as::<_, Match>(&query)
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Persist the lifecycle fields of `live_match` and return the stored row.
    pub async fn save_clock_state(&self, live_match: &Match) -> Result<Match, sqlx::Error> {
        let query = format!(
            "UPDATE matches
             SET status = $2,
                 kickoff_time = $3,
                 halftime_start = $4,
                 second_half_start = $5,
                 match_end_time = $6,
                 half_duration_minutes = $7,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            MATCH_COLUMNS
        );
        let saved = sqlx::query_as::<_, Match>(&query)
            .bind(live_match.id)
            .bind(live_match.status)
            .bind(live_match.kickoff_time)
            .bind(live_match.halftime_start)
            .bind(live_match.second_half_start)
            .bind(live_match.match_end_time)
            .bind(live_match.half_duration_minutes)
            .fetch_one(&self.pool)
            .await?;

        info!("Match {} clock saved: {}", saved.id, saved.status.as_str());
        Ok(saved)
    }

    pub async fn insert_event(&self, event: &NewMatchEvent) -> Result<MatchEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO match_events (
                match_id, event_type, team_id, player_id, match_minute, extra_time, message
             ) VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            EVENT_COLUMNS
        );
        let created = sqlx::query_as::<_, MatchEvent>(&query)
            .bind(event.match_id)
            .bind(event.event_type)
            .bind(event.team_id)
            .bind(event.player_id)
            .bind(event.match_minute)
            .bind(event.extra_time)
            .bind(&event.message)
            .fetch_one(&self.pool)
            .await?;

        debug!("Created event {} for match {}", created.id, created.match_id);
        Ok(created)
    }

    /// Soft delete. Returns the updated row, or `None` when the event does not belong to
    /// the match.
    pub async fn soft_delete_event(
        &self,
        match_id: i64,
        event_id: i64,
    ) -> Result<Option<MatchEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE match_events SET is_deleted = TRUE
             WHERE id = $1 AND match_id = $2
             RETURNING {}",
            EVENT_COLUMNS
        );
        sqlx::query_as::<_, MatchEvent>(&query)
            .bind(event_id)
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Most recent active events, newest first.
    pub async fn recent_events(
        &self,
        match_id: i64,
        limit: i64,
    ) -> Result<Vec<MatchEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM match_events
             WHERE match_id = $1 AND is_deleted = FALSE
             ORDER BY id DESC
             LIMIT $2",
            EVENT_COLUMNS
        );
        sqlx::query_as::<_, MatchEvent>(&query)
            .bind(match_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    /// Active events older than `before_id`, newest first.
    pub async fn events_before(
        &self,
        match_id: i64,
        before_id: i64,
        limit: i64,
    ) -> Result<Vec<MatchEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM match_events
             WHERE match_id = $1 AND id < $2 AND is_deleted = FALSE
             ORDER BY id DESC
             LIMIT $3",
            EVENT_COLUMNS
        );
        sqlx::query_as::<_, MatchEvent>(&query)
            .bind(match_id)
            .bind(before_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }

    /// Recount both scores from the active goal events and store them on the match row.
    pub async fn recompute_score(&self, match_id: i64) -> Result<Match, sqlx::Error> {
        let query = format!(
            "UPDATE matches m
             SET home_score = (
                    SELECT COUNT(*) FROM match_events e
                    WHERE e.match_id = m.id AND e.event_type = 'goal'
                      AND e.is_deleted = FALSE AND e.team_id = m.home_team_id
                 ),
                 away_score = (
                    SELECT COUNT(*) FROM match_events e
                    WHERE e.match_id = m.id AND e.event_type = 'goal'
                      AND e.is_deleted = FALSE AND e.team_id = m.away_team_id
                 ),
                 updated_at = NOW()
             WHERE m.id = $1
             RETURNING {}",
            MATCH_COLUMNS
        );
        let updated = sqlx::query_as::<_, Match>(&query)
            .bind(match_id)
            .fetch_one(&self.pool)
            .await?;

        info!(
            "Match {} score recomputed: {} - {}",
            match_id, updated.home_score, updated.away_score
        );
        Ok(updated)
    }
}
