//! Router for the meeting scheduling API
//!
//! Each handler is a straight pipeline of Graph calls that stops at the
//! first failure. Nothing already done on the remote side is undone.

use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, extract::State, routing::post};
use chrono::Utc;
use http::StatusCode;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::microsoft::models::{
    Attendee, DateTimeTimeZone, EmailAddress, FindMeetingTimesRequest, ItemBody, NewEvent,
    TimeSlot,
};
use crate::scheduling::{
    DEFAULT_DESCRIPTION, Invite, TimeWindow, availability_interval, best_suggestion,
    candidate_window, display_name, first_free_slot, graph_time, invite_mail, meeting_end,
    parse_graph_datetime,
};

type SharedState = Arc<AppState>;

pub const NO_FREE_SLOT_MESSAGE: &str = "No free slots available in preferred window.";
pub const NO_SUGGESTION_MESSAGE: &str = "No available time slot found.";

fn rejected(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}

async fn schedule_handler(
    State(state): State<SharedState>,
    payload: Result<Json<public::ScheduleRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(rejected)?;
    tracing::info!(
        "Received schedule request: subject={:?} duration={} preferred_window={:?}",
        req.subject,
        req.duration,
        req.preferred_window
    );

    let window = req.window(Utc::now()).map_err(ApiError::bad_request)?;

    schedule_first_free_slot(&state, &req, window)
        .await
        .map_err(|e| e.with_message("Error scheduling meeting"))
}

async fn schedule_first_free_slot(
    state: &AppState,
    req: &public::ScheduleRequest,
    window: TimeWindow,
) -> Result<Response, ApiError> {
    let graph = state.graph_client().await?;
    let manager = &state.config.manager_email;

    tracing::info!(
        "Checking {} availability from {} to {}",
        manager,
        window.start,
        window.end
    );
    // Requested in UTC so the returned items can be read as UTC
    let schedule = graph
        .get_free_busy(
            manager,
            DateTimeTimeZone::utc(window.start),
            DateTimeTimeZone::utc(window.end),
            availability_interval(req.duration),
        )
        .await?;

    let Some(slot) = first_free_slot(&schedule) else {
        tracing::info!("No available time slots found for {}", manager);
        return Ok((
            StatusCode::NOT_FOUND,
            Json(public::NoSlotResponse {
                message: NO_FREE_SLOT_MESSAGE.to_string(),
            }),
        )
            .into_response());
    };

    let start = parse_graph_datetime(&slot.start.date_time)
        .map_err(|e| anyhow!("Free slot has an invalid start {:?}: {}", slot.start.date_time, e))?;
    let end = meeting_end(start, req.duration);
    tracing::info!("Found free slot {} - {}", start, end);

    let event = NewEvent::teams_meeting(
        &req.subject,
        DateTimeTimeZone::utc(start),
        DateTimeTimeZone::utc(end),
        vec![Attendee::required(EmailAddress::new(manager))],
    );
    let created = graph
        .create_event(manager, &event, Some(state.config.time_zone.as_str()))
        .await?;
    tracing::info!("Meeting {} created", created.id);

    Ok(Json(public::ScheduleResponse {
        message: String::from("Meeting scheduled!"),
        join_url: created.join_url_or_placeholder().to_string(),
        event: created.payload,
    })
    .into_response())
}

async fn schedule_outlook_handler(
    State(state): State<SharedState>,
    payload: Result<Json<public::ScheduleOutlookRequest>, JsonRejection>,
) -> Result<Json<public::ScheduleOutlookResponse>, ApiError> {
    let Json(req) = payload.map_err(rejected)?;
    tracing::info!(
        "Creating Outlook meeting: subject={:?} start={} end={} attendees={:?}",
        req.subject,
        req.start_time,
        req.end_time,
        req.attendees
    );
    req.validate().map_err(ApiError::bad_request)?;

    let graph = state.graph_client().await?;
    let manager = &state.config.manager_email;
    let time_zone = state.config.time_zone.as_str();

    let attendees = req
        .attendees
        .iter()
        .map(|email| Attendee::required(EmailAddress::named(email, display_name(email))))
        .collect();
    let event = NewEvent::teams_meeting(
        &req.subject,
        graph_time(&req.start_time, time_zone),
        graph_time(&req.end_time, time_zone),
        attendees,
    );
    let created = graph.create_event(manager, &event, Some(time_zone)).await?;
    tracing::info!("Meeting {} created", created.id);

    Ok(Json(public::ScheduleOutlookResponse {
        message: String::from("Meeting scheduled in Outlook with Teams link."),
        join_url: created.join_url_or_placeholder().to_string(),
        event_id: created.id,
    }))
}

async fn auto_schedule_handler(
    State(state): State<SharedState>,
    payload: Result<Json<public::AutoScheduleRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload.map_err(rejected)?;
    tracing::info!(
        "Received auto-schedule request: subject={:?} duration={} attendees={:?}",
        req.subject,
        req.duration_minutes,
        req.attendees
    );
    req.validate().map_err(ApiError::bad_request)?;

    let graph = state.graph_client().await?;
    let manager = &state.config.manager_email;
    let time_zone = state.config.time_zone.as_str();

    // Find the organizer's nearest availability
    let window = candidate_window(Utc::now());
    let request = FindMeetingTimesRequest::new(
        vec![Attendee::required(EmailAddress::new(manager))],
        TimeSlot {
            start: DateTimeTimeZone::utc(window.start),
            end: DateTimeTimeZone::utc(window.end),
        },
        req.duration_minutes,
    );
    let suggestions = graph
        .find_meeting_times(manager, &request, Some(time_zone))
        .await?;

    let Some(best) = best_suggestion(suggestions) else {
        tracing::info!("No meeting time suggestions for {}", manager);
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(public::NoSlotResponse {
                message: NO_SUGGESTION_MESSAGE.to_string(),
            }),
        )
            .into_response());
    };
    let TimeSlot { start, end } = best.meeting_time_slot;

    // Create the event on the organizer's calendar
    let description = req
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION);
    let mut attendees: Vec<Attendee> = req
        .attendees
        .iter()
        .map(|email| Attendee::required(EmailAddress::new(email)))
        .collect();
    if !req.attendees.iter().any(|a| a.eq_ignore_ascii_case(manager)) {
        attendees.push(Attendee::required(EmailAddress::new(manager)));
    }
    let event = NewEvent::teams_meeting(&req.subject, start.clone(), end.clone(), attendees)
        .with_body(ItemBody::html(description));
    let created = graph.create_event(manager, &event, Some(time_zone)).await?;
    tracing::info!("Meeting {} created for {} - {}", created.id, start.date_time, end.date_time);

    // Notify attendees. A failure here leaves the event in place.
    let invite = Invite {
        subject: &req.subject,
        description,
        start: &start.date_time,
        end: &end.date_time,
        join_url: created.join_url.as_deref(),
    };
    let mail = invite_mail(&invite, &req.attendees)?;
    if let Err(err) = graph.send_mail(manager, &mail).await {
        return Err(anyhow::Error::from(err)
            .context(format!(
                "Meeting {} was created but attendees were not notified",
                created.id
            ))
            .into());
    }
    tracing::info!("Invitation sent to {} attendees", req.attendees.len());

    Ok(Json(public::AutoScheduleResponse {
        message: String::from("Meeting scheduled and email sent."),
        join_url: created.join_url_or_placeholder().to_string(),
        start: start.date_time,
        end: end.date_time,
        event_id: created.id,
    })
    .into_response())
}

/// Create the meetings router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/schedule", post(schedule_handler))
        .route("/schedule-outlook", post(schedule_outlook_handler))
        .route("/auto-schedule-outlook", post(auto_schedule_handler))
}
