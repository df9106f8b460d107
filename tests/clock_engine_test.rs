use matchday_live::live::clock::{event_minute, format_clock, read_clock, Period};
use matchday_live::models::{Match, MatchStatus};

mod common;
use common::fixtures::{at, base_time, first_half_match, scheduled_match, second_half_match};

#[test]
fn no_kickoff_reads_not_started() {
    let m = scheduled_match(1);
    let reading = read_clock(&m, at(10_000));

    assert_eq!(reading.elapsed_seconds, 0);
    assert_eq!(reading.period, Period::NotStarted);
    assert_eq!(reading.period.to_string(), "Not Started");
}

#[test]
fn no_kickoff_wins_over_completed_status() {
    let m = Match {
        status: MatchStatus::Completed,
        ..scheduled_match(1)
    };
    let reading = read_clock(&m, at(10_000));

    assert_eq!(reading.elapsed_seconds, 0);
    assert_eq!(reading.period, Period::NotStarted);
}

#[test]
fn first_half_is_capped_at_nominal_length() {
    let m = first_half_match(1);

    let reading = read_clock(&m, at(50 * 60));
    assert_eq!(reading.elapsed_seconds, 2700);
    assert_eq!(reading.period, Period::FirstHalf);
    assert_eq!(reading.period.label(), "1st Half");

    let reading = read_clock(&m, at(12 * 60 + 7));
    assert_eq!(reading.elapsed_seconds, 727);
    assert_eq!(format_clock(reading.elapsed_seconds), "12:07");
}

#[test]
fn halftime_freezes_the_clock() {
    let m = Match {
        status: MatchStatus::Halftime,
        halftime_start: Some(at(2750)),
        ..first_half_match(1)
    };
    let reading = read_clock(&m, at(2750 + 20 * 60));

    assert_eq!(reading.elapsed_seconds, 2700);
    assert_eq!(reading.period, Period::Halftime);
}

#[test]
fn second_half_counts_from_its_own_start() {
    let m = second_half_match(1);
    let reading = read_clock(&m, at(3600 + 10 * 60));

    assert_eq!(reading.elapsed_seconds, 3300);
    assert_eq!(reading.period, Period::SecondHalf);
    assert_eq!(reading.period.to_string(), "2nd Half");
}

#[test]
fn second_half_is_not_capped() {
    let m = second_half_match(1);
    let reading = read_clock(&m, at(3600 + 50 * 60));

    assert_eq!(reading.elapsed_seconds, 5700);
    assert_eq!(format_clock(reading.elapsed_seconds), "95:00");
}

#[test]
fn full_time_ignores_other_timestamps() {
    let ended = Match {
        status: MatchStatus::Completed,
        match_end_time: Some(at(6000)),
        ..second_half_match(1)
    };
    let status_only = Match {
        status: MatchStatus::Completed,
        ..first_half_match(2)
    };
    let end_time_only = Match {
        match_end_time: Some(at(100)),
        ..first_half_match(3)
    };

    for m in [ended, status_only, end_time_only] {
        let reading = read_clock(&m, at(99_999));
        assert_eq!(reading.elapsed_seconds, 2 * 45 * 60);
        assert_eq!(reading.period, Period::FullTime);
    }
}

#[test]
fn half_duration_override_changes_every_bound() {
    let m = Match {
        half_duration_minutes: 30,
        ..first_half_match(1)
    };
    assert_eq!(read_clock(&m, at(40 * 60)).elapsed_seconds, 1800);

    let ended = Match {
        status: MatchStatus::Completed,
        ..m
    };
    assert_eq!(read_clock(&ended, at(0)).elapsed_seconds, 3600);
}

#[test]
fn clock_before_kickoff_time_reads_zero() {
    let m = first_half_match(1);
    let reading = read_clock(&m, base_time() - chrono::Duration::seconds(30));

    assert_eq!(reading.elapsed_seconds, 0);
    assert_eq!(reading.period, Period::FirstHalf);
}

#[test]
fn event_minute_counts_from_one() {
    let m = first_half_match(1);

    assert_eq!(event_minute(&m, at(0)), Some((1, None)));
    assert_eq!(event_minute(&m, at(12 * 60 + 30)), Some((13, None)));
    assert_eq!(event_minute(&m, at(44 * 60 + 59)), Some((45, None)));
}

#[test]
fn event_minute_reports_first_half_stoppage_as_extra_time() {
    let m = first_half_match(1);

    assert_eq!(event_minute(&m, at(45 * 60)), Some((45, Some(1))));
    assert_eq!(event_minute(&m, at(47 * 60 + 10)), Some((45, Some(3))));
}

#[test]
fn event_minute_in_second_half() {
    let m = second_half_match(1);

    assert_eq!(event_minute(&m, at(3600)), Some((46, None)));
    assert_eq!(event_minute(&m, at(3600 + 44 * 60)), Some((90, None)));
    assert_eq!(event_minute(&m, at(3600 + 48 * 60)), Some((90, Some(4))));
}

#[test]
fn no_event_minute_while_the_ball_is_out_of_play() {
    let halftime = Match {
        status: MatchStatus::Halftime,
        halftime_start: Some(at(2700)),
        ..first_half_match(1)
    };
    let ended = Match {
        status: MatchStatus::Completed,
        match_end_time: Some(at(6000)),
        ..second_half_match(2)
    };

    assert_eq!(event_minute(&scheduled_match(3), at(0)), None);
    assert_eq!(event_minute(&halftime, at(3000)), None);
    assert_eq!(event_minute(&ended, at(6100)), None);
}
