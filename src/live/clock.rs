use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Match, MatchStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    NotStarted,
    FirstHalf,
    Halftime,
    SecondHalf,
    FullTime,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::NotStarted => "Not Started",
            Period::FirstHalf => "1st Half",
            Period::Halftime => "Halftime",
            Period::SecondHalf => "2nd Half",
            Period::FullTime => "Full Time",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockReading {
    pub elapsed_seconds: i64,
    pub period: Period,
}

fn half_seconds(m: &Match) -> i64 {
    i64::from(m.half_duration_minutes) * 60
}

fn seconds_since(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - start).num_seconds().max(0)
}

/// Derive elapsed time and period from the match timestamps and a wall-clock sample.
///
/// Checks run in a fixed order: no kickoff, then full time, second half, halftime and
/// finally first half. The first half is capped at its nominal length; the second half
/// is not, so overage reads as stoppage time.
pub fn read_clock(m: &Match, now: DateTime<Utc>) -> ClockReading {
    let half = half_seconds(m);

    let Some(kickoff) = m.kickoff_time else {
        return ClockReading {
            elapsed_seconds: 0,
            period: Period::NotStarted,
        };
    };

    if m.match_end_time.is_some() || m.status == MatchStatus::Completed {
        return ClockReading {
            elapsed_seconds: half * 2,
            period: Period::FullTime,
        };
    }

    if let Some(second_half_start) = m.second_half_start {
        return ClockReading {
            elapsed_seconds: half + seconds_since(second_half_start, now),
            period: Period::SecondHalf,
        };
    }

    if m.halftime_start.is_some() {
        return ClockReading {
            elapsed_seconds: half,
            period: Period::Halftime,
        };
    }

    ClockReading {
        elapsed_seconds: seconds_since(kickoff, now).min(half),
        period: Period::FirstHalf,
    }
}

/// `MM:SS`, minutes unbounded.
pub fn format_clock(elapsed_seconds: i64) -> String {
    let elapsed_seconds = elapsed_seconds.max(0);
    format!("{:02}:{:02}", elapsed_seconds / 60, elapsed_seconds % 60)
}

/// Minute stamp for an event recorded at `now`: `(match_minute, extra_time)`.
///
/// Unlike [`read_clock`] this looks at the raw first-half timestamps so that first-half
/// stoppage time is reported as `extra_time` instead of being swallowed by the cap.
/// Returns `None` when the ball is not in play.
pub fn event_minute(m: &Match, now: DateTime<Utc>) -> Option<(i32, Option<i32>)> {
    if m.match_end_time.is_some() || m.status != MatchStatus::Live {
        return None;
    }
    let half = m.half_duration_minutes;

    let (start, offset, nominal_end) = match (m.second_half_start, m.kickoff_time) {
        (Some(second_half_start), _) => (second_half_start, half, half * 2),
        (None, Some(kickoff)) if m.halftime_start.is_none() => (kickoff, 0, half),
        _ => return None,
    };

    let raw_minute = offset + (seconds_since(start, now) / 60) as i32 + 1;
    if raw_minute > nominal_end {
        Some((nominal_end, Some(raw_minute - nominal_end)))
    } else {
        Some((raw_minute, None))
    }
}
