//! Pure slot selection: windows, free slot lookup and end time math.
//! All arithmetic happens on UTC instants.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::microsoft::models::{
    DateTimeTimeZone, FreeBusySchedule, FreeBusyStatus, MeetingTimeSuggestion, ScheduleItem,
};

/// Graph's availability view interval must be within this range
pub const MIN_INTERVAL_MINUTES: u32 = 5;
pub const MAX_INTERVAL_MINUTES: u32 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Window searched when the caller gives no preference: from half an
/// hour from now until six hours from now.
pub fn default_window(now: DateTime<Utc>) -> TimeWindow {
    TimeWindow::new(now + Duration::minutes(30), now + Duration::hours(6))
}

/// Window handed to `findMeetingTimes`: the next three days
pub fn candidate_window(now: DateTime<Utc>) -> TimeWindow {
    TimeWindow::new(now, now + Duration::days(3))
}

/// Items marked free, in the order Graph returned them
pub fn free_slots(schedule: &FreeBusySchedule) -> impl Iterator<Item = &ScheduleItem> {
    schedule
        .schedule_items
        .iter()
        .filter(|item| item.status == FreeBusyStatus::Free)
}

pub fn first_free_slot(schedule: &FreeBusySchedule) -> Option<&ScheduleItem> {
    free_slots(schedule).next()
}

pub fn meeting_end(start: DateTime<Utc>, duration_minutes: u32) -> DateTime<Utc> {
    start + Duration::minutes(i64::from(duration_minutes))
}

/// Only the provider's top ranked suggestion is ever used
pub fn best_suggestion(suggestions: Vec<MeetingTimeSuggestion>) -> Option<MeetingTimeSuggestion> {
    suggestions.into_iter().next()
}

pub fn availability_interval(duration_minutes: u32) -> u32 {
    duration_minutes.clamp(MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES)
}

/// Parse a Graph `dateTime`. Values carrying an offset are converted to
/// UTC. Graph's own offset-less form (`2024-01-01T10:00:00.0000000`) is
/// read as UTC, which holds for schedules requested in UTC.
pub fn parse_graph_datetime(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
        }
    }
}

/// Express a caller supplied time for Graph. Times with an explicit
/// offset are sent in UTC, wall-clock times are sent in `time_zone`.
pub fn graph_time(value: &str, time_zone: &str) -> DateTimeTimeZone {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => DateTimeTimeZone::utc(dt.with_timezone(&Utc)),
        Err(_) => DateTimeTimeZone::new(value, time_zone),
    }
}

/// Local part of an email address, used as a display name
pub fn display_name(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
