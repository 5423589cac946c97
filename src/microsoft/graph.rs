//! Authenticated client for the Microsoft Graph calendar and mail
//! endpoints. Every call is a single request with no retries.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::GraphError;
use super::models::{
    CreatedEvent, DateTimeTimeZone, EventResponse, FindMeetingTimesRequest,
    FindMeetingTimesResponse, FreeBusySchedule, GetScheduleRequest, GetScheduleResponse,
    MeetingTimeSuggestion, NewEvent, SendMailRequest,
};
use super::oauth::AccessToken;

pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

/// Pull `code: message` out of a Graph error body, falling back to the
/// raw text when it isn't the usual shape.
fn remote_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            let error = v.get("error")?;
            let message = error.get("message")?.as_str()?;
            match error.get("code").and_then(|c| c.as_str()) {
                Some(code) => Some(format!("{}: {}", code, message)),
                None => Some(message.to_string()),
            }
        })
        .unwrap_or_else(|| body.to_string())
}

impl GraphClient {
    pub fn new(http: reqwest::Client, base_url: &str, access_token: AccessToken) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.token,
        }
    }

    fn user_url(&self, user_id: &str, path: &str) -> String {
        format!(
            "{}/users/{}/{}",
            self.base_url,
            urlencoding::encode(user_id),
            path
        )
    }

    async fn post<B: Serialize>(
        &self,
        url: &str,
        body: &B,
        display_time_zone: Option<&str>,
    ) -> Result<reqwest::Response, GraphError> {
        let mut request = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body);
        if let Some(time_zone) = display_time_zone {
            request = request.header("Prefer", format!("outlook.timezone=\"{}\"", time_zone));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Api {
                status: status.as_u16(),
                message: remote_message(&body),
            });
        }

        Ok(response)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        display_time_zone: Option<&str>,
    ) -> Result<R, GraphError> {
        let text = self.post(url, body, display_time_zone).await?.text().await?;
        serde_json::from_str(&text).map_err(|e| GraphError::Decode(e.to_string()))
    }

    /// Fetch the free/busy timeline of `user_id` between `start` and
    /// `end`. Items come back in UTC unless a display zone is requested
    /// elsewhere, so the window is usually given in UTC as well.
    pub async fn get_free_busy(
        &self,
        user_id: &str,
        start: DateTimeTimeZone,
        end: DateTimeTimeZone,
        interval_minutes: u32,
    ) -> Result<FreeBusySchedule, GraphError> {
        let request = GetScheduleRequest {
            schedules: vec![user_id.to_string()],
            start_time: start,
            end_time: end,
            availability_view_interval: interval_minutes,
        };

        let response: GetScheduleResponse = self
            .post_json(&self.user_url(user_id, "calendar/getSchedule"), &request, None)
            .await?;

        let schedule = response
            .value
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::Decode("getSchedule returned no schedules".to_string()))?;

        if let Some(error) = &schedule.error {
            return Err(GraphError::Schedule {
                schedule_id: schedule.schedule_id.clone(),
                message: error
                    .message
                    .clone()
                    .or_else(|| error.response_code.clone())
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        tracing::debug!(
            "Free/busy for {} has {} items",
            schedule.schedule_id,
            schedule.schedule_items.len()
        );

        Ok(schedule)
    }

    /// Create an event on the calendar of `user_id`. When a display time
    /// zone is given the returned payload is rendered in that zone.
    pub async fn create_event(
        &self,
        user_id: &str,
        event: &NewEvent,
        display_time_zone: Option<&str>,
    ) -> Result<CreatedEvent, GraphError> {
        let payload: Value = self
            .post_json(&self.user_url(user_id, "events"), event, display_time_zone)
            .await?;
        let EventResponse { id, online_meeting } = serde_json::from_value(payload.clone())
            .map_err(|e| GraphError::Decode(format!("created event: {}", e)))?;

        Ok(CreatedEvent {
            id,
            join_url: online_meeting.and_then(|m| m.join_url),
            payload,
        })
    }

    pub async fn find_meeting_times(
        &self,
        user_id: &str,
        request: &FindMeetingTimesRequest,
        display_time_zone: Option<&str>,
    ) -> Result<Vec<MeetingTimeSuggestion>, GraphError> {
        let response: FindMeetingTimesResponse = self
            .post_json(
                &self.user_url(user_id, "findMeetingTimes"),
                request,
                display_time_zone,
            )
            .await?;

        if response.meeting_time_suggestions.is_empty() {
            tracing::debug!(
                "No meeting time suggestions: {}",
                response
                    .empty_suggestions_reason
                    .as_deref()
                    .unwrap_or("no reason given")
            );
        }

        Ok(response.meeting_time_suggestions)
    }

    /// Send mail as `user_id`. Graph answers 202 with an empty body.
    pub async fn send_mail(&self, user_id: &str, message: &SendMailRequest) -> Result<(), GraphError> {
        self.post(&self.user_url(user_id, "sendMail"), message, None)
            .await?;
        Ok(())
    }
}
