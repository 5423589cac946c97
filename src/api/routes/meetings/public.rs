//! Public types for the meeting scheduling API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scheduling::{TimeWindow, default_window, parse_graph_datetime};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferredWindow {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub subject: String,
    /// Minutes
    pub duration: u32,
    #[serde(default)]
    pub preferred_window: Option<PreferredWindow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutlookRequest {
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
    pub attendees: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScheduleRequest {
    pub subject: String,
    pub duration_minutes: u32,
    pub attendees: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub message: String,
    pub join_url: String,
    pub event: Value,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOutlookResponse {
    pub message: String,
    pub join_url: String,
    pub event_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoScheduleResponse {
    pub message: String,
    pub join_url: String,
    pub start: String,
    pub end: String,
    pub event_id: String,
}

/// Returned when no slot could be found. Not an error.
#[derive(Debug, Serialize, Deserialize)]
pub struct NoSlotResponse {
    pub message: String,
}

// Validation

fn require_subject(subject: &str) -> Result<(), String> {
    if subject.trim().is_empty() {
        return Err(String::from("subject must not be empty"));
    }
    Ok(())
}

fn require_duration(field: &str, minutes: u32) -> Result<(), String> {
    if minutes == 0 {
        return Err(format!("{} must be a positive number of minutes", field));
    }
    Ok(())
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn require_attendees(attendees: &[String]) -> Result<(), String> {
    if attendees.is_empty() {
        return Err(String::from("attendees must contain at least one email address"));
    }
    if let Some(invalid) = attendees.iter().find(|a| !is_email(a)) {
        return Err(format!("{:?} is not a valid email address", invalid));
    }
    Ok(())
}

fn parse_field(field: &str, value: &str) -> Result<DateTime<Utc>, String> {
    parse_graph_datetime(value).map_err(|e| format!("{} {:?} is not a valid date time: {}", field, value, e))
}

impl ScheduleRequest {
    /// Validate the request and resolve the free/busy window, filling
    /// in defaults relative to `now` for any missing bound.
    pub fn window(&self, now: DateTime<Utc>) -> Result<TimeWindow, String> {
        require_subject(&self.subject)?;
        require_duration("duration", self.duration)?;

        let defaults = default_window(now);
        let preferred = self.preferred_window.clone().unwrap_or_default();
        // Blank bounds fall back to the defaults like missing ones
        let start = match preferred.start.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(value) => parse_field("preferredWindow.start", value)?,
            None => defaults.start,
        };
        let end = match preferred.end.as_deref().filter(|v| !v.trim().is_empty()) {
            Some(value) => parse_field("preferredWindow.end", value)?,
            None => defaults.end,
        };

        let window = TimeWindow::new(start, end);
        if window.is_empty() {
            return Err(String::from("preferredWindow.end must be after preferredWindow.start"));
        }
        Ok(window)
    }
}

impl ScheduleOutlookRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_subject(&self.subject)?;
        let start = parse_field("startTime", &self.start_time)?;
        let end = parse_field("endTime", &self.end_time)?;
        if end <= start {
            return Err(String::from("endTime must be after startTime"));
        }
        require_attendees(&self.attendees)
    }
}

impl AutoScheduleRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_subject(&self.subject)?;
        require_duration("durationMinutes", self.duration_minutes)?;
        require_attendees(&self.attendees)
    }
}
