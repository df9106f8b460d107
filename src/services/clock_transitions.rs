use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{ClockAction, Match, MatchStatus};

pub const MAX_HALF_DURATION_MINUTES: i32 = 90;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Cannot {action} while match is {status}")]
    IllegalTransition {
        action: &'static str,
        status: &'static str,
    },

    #[error("Half duration must be between 1 and {max} minutes, got {0}", max = MAX_HALF_DURATION_MINUTES)]
    InvalidHalfDuration(i32),
}

/// Apply a clock action to `current` at server time `now`, returning the new row.
///
/// A half-duration override is validated and stored before the transition itself.
pub fn apply_clock_action(
    current: &Match,
    action: ClockAction,
    half_duration_minutes: Option<i32>,
    now: DateTime<Utc>,
) -> Result<Match, TransitionError> {
    let mut next = current.clone();

    if let Some(minutes) = half_duration_minutes {
        if !(1..=MAX_HALF_DURATION_MINUTES).contains(&minutes) {
            return Err(TransitionError::InvalidHalfDuration(minutes));
        }
        next.half_duration_minutes = minutes;
    }

    let illegal = || TransitionError::IllegalTransition {
        action: action.as_str(),
        status: current.status.as_str(),
    };

    match action {
        ClockAction::StartFirstHalf => {
            if current.status != MatchStatus::NotStarted {
                return Err(illegal());
            }
            next.kickoff_time = Some(now);
            next.status = MatchStatus::Live;
        }
        ClockAction::StartHalftime => {
            if current.status != MatchStatus::Live || current.halftime_start.is_some() {
                return Err(illegal());
            }
            next.halftime_start = Some(now);
            next.status = MatchStatus::Halftime;
        }
        ClockAction::StartSecondHalf => {
            if current.status != MatchStatus::Halftime {
                return Err(illegal());
            }
            next.second_half_start = Some(now);
            next.status = MatchStatus::Live;
        }
        ClockAction::EndMatch => {
            if !matches!(current.status, MatchStatus::Live | MatchStatus::Halftime) {
                return Err(illegal());
            }
            next.match_end_time = Some(now);
            next.status = MatchStatus::Completed;
        }
    }

    Ok(next)
}
