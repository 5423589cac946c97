//! Request and response shapes for the subset of Microsoft Graph used
//! to schedule meetings. Field names follow the Graph JSON casing.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder reported when Graph did not attach a Teams link to an event
pub const NO_JOIN_URL: &str = "No join URL found";

pub const TEAMS_FOR_BUSINESS: &str = "teamsForBusiness";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeTimeZone {
    pub date_time: String,
    pub time_zone: String,
}

impl DateTimeTimeZone {
    pub fn new(date_time: &str, time_zone: &str) -> Self {
        Self {
            date_time: date_time.to_string(),
            time_zone: time_zone.to_string(),
        }
    }

    /// Express an instant as a UTC wall-clock time, e.g. `2024-01-01T10:00:00Z`
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self {
            date_time: instant.to_rfc3339_opts(SecondsFormat::Secs, true),
            time_zone: String::from("UTC"),
        }
    }
}

// Free/busy

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FreeBusyStatus {
    Free,
    Tentative,
    Busy,
    Oof,
    WorkingElsewhere,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub status: FreeBusyStatus,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
    pub subject: Option<String>,
    pub location: Option<String>,
    pub is_private: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeBusyError {
    pub message: Option<String>,
    pub response_code: Option<String>,
}

/// One entry of a `getSchedule` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeBusySchedule {
    pub schedule_id: String,
    pub availability_view: Option<String>,
    #[serde(default)]
    pub schedule_items: Vec<ScheduleItem>,
    pub error: Option<FreeBusyError>,
}

#[derive(Debug, Deserialize)]
pub struct GetScheduleResponse {
    pub value: Vec<FreeBusySchedule>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetScheduleRequest {
    pub schedules: Vec<String>,
    pub start_time: DateTimeTimeZone,
    pub end_time: DateTimeTimeZone,
    pub availability_view_interval: u32,
}

// Events

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            name: None,
        }
    }

    pub fn named(address: &str, name: &str) -> Self {
        Self {
            address: address.to_string(),
            name: Some(name.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendeeType {
    Required,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email_address: EmailAddress,
    #[serde(rename = "type")]
    pub attendee_type: AttendeeType,
}

impl Attendee {
    pub fn required(email_address: EmailAddress) -> Self {
        Self {
            email_address,
            attendee_type: AttendeeType::Required,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    #[serde(rename = "HTML")]
    Html,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: BodyType,
    pub content: String,
}

impl ItemBody {
    pub fn html(content: &str) -> Self {
        Self {
            content_type: BodyType::Html,
            content: content.to_string(),
        }
    }
}

/// Event payload posted to `/users/{id}/events`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
    pub attendees: Vec<Attendee>,
    pub is_online_meeting: bool,
    pub online_meeting_provider: String,
}

impl NewEvent {
    /// An event that Graph will attach a Teams meeting to
    pub fn teams_meeting(
        subject: &str,
        start: DateTimeTimeZone,
        end: DateTimeTimeZone,
        attendees: Vec<Attendee>,
    ) -> Self {
        Self {
            subject: subject.to_string(),
            body: None,
            start,
            end,
            attendees,
            is_online_meeting: true,
            online_meeting_provider: TEAMS_FOR_BUSINESS.to_string(),
        }
    }

    pub fn with_body(mut self, body: ItemBody) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineMeetingInfo {
    pub join_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventResponse {
    pub id: String,
    pub online_meeting: Option<OnlineMeetingInfo>,
}

/// An event as returned by Graph after creation. The full payload is
/// kept so it can be relayed to callers untouched.
#[derive(Debug, Clone)]
pub struct CreatedEvent {
    pub id: String,
    pub join_url: Option<String>,
    pub payload: Value,
}

impl CreatedEvent {
    pub fn join_url_or_placeholder(&self) -> &str {
        self.join_url.as_deref().unwrap_or(NO_JOIN_URL)
    }
}

// Meeting time suggestions

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeConstraint {
    pub time_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMeetingTimesRequest {
    pub attendees: Vec<Attendee>,
    pub time_constraint: TimeConstraint,
    /// ISO 8601 duration, e.g. `PT30M`
    pub meeting_duration: String,
    pub max_candidates: u32,
    pub is_organizer_optional: bool,
    pub return_suggestion_reasons: bool,
    pub minimum_attendee_percentage: f64,
}

impl FindMeetingTimesRequest {
    /// Look for slots where every listed attendee is available
    pub fn new(attendees: Vec<Attendee>, window: TimeSlot, duration_minutes: u32) -> Self {
        Self {
            attendees,
            time_constraint: TimeConstraint {
                time_slots: vec![window],
            },
            meeting_duration: format!("PT{}M", duration_minutes),
            max_candidates: 5,
            is_organizer_optional: false,
            return_suggestion_reasons: true,
            minimum_attendee_percentage: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingTimeSuggestion {
    pub meeting_time_slot: TimeSlot,
    pub confidence: Option<f64>,
    pub organizer_availability: Option<String>,
    pub suggestion_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMeetingTimesResponse {
    #[serde(default)]
    pub meeting_time_suggestions: Vec<MeetingTimeSuggestion>,
    pub empty_suggestions_reason: Option<String>,
}

// Mail

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email_address: EmailAddress,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailMessage {
    pub subject: String,
    pub body: ItemBody,
    pub to_recipients: Vec<Recipient>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMailRequest {
    pub message: MailMessage,
    pub save_to_sent_items: bool,
}
