//! Integration tests for the /schedule-outlook endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use http::StatusCode;
    use mockito::Matcher;
    use serde_json::json;

    use crate::test_utils::{
        EVENTS_PATH, SCHEDULE_PATH, TOKEN_PATH, fixture, mock_token, post_json, test_app,
    };

    fn request() -> serde_json::Value {
        json!({
            "subject": "Design review",
            "startTime": "2024-01-01T15:00:00",
            "endTime": "2024-01-01T15:30:00",
            "attendees": ["jane.doe@example.com", "raj@example.org"]
        })
    }

    /// Tests the event is created as given without checking availability
    #[tokio::test]
    async fn it_creates_the_event_directly() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let schedule = server
            .mock("POST", SCHEDULE_PATH)
            .expect(0)
            .create_async()
            .await;
        let events = server
            .mock("POST", EVENTS_PATH)
            .match_header("prefer", "outlook.timezone=\"India Standard Time\"")
            .match_body(Matcher::PartialJson(json!({
                "subject": "Design review",
                "start": {"dateTime": "2024-01-01T15:00:00", "timeZone": "India Standard Time"},
                "end": {"dateTime": "2024-01-01T15:30:00", "timeZone": "India Standard Time"},
                "attendees": [
                    {
                        "emailAddress": {"address": "jane.doe@example.com", "name": "jane.doe"},
                        "type": "required"
                    },
                    {
                        "emailAddress": {"address": "raj@example.org", "name": "raj"},
                        "type": "required"
                    }
                ],
                "isOnlineMeeting": true,
                "onlineMeetingProvider": "teamsForBusiness"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(fixture("created_event.json"))
            .create_async()
            .await;

        let (status, body) =
            post_json(test_app(&server.url()), "/schedule-outlook", request()).await;

        schedule.assert_async().await;
        events.assert_async().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "message": "Meeting scheduled in Outlook with Teams link.",
                "joinUrl": "https://teams.microsoft.com/l/meetup-join/19%3ameeting_abc",
                "eventId": "AAMkAGI1-event-1"
            })
        );
    }

    /// Tests identical requests are not deduplicated
    #[tokio::test]
    async fn it_creates_a_new_event_for_each_identical_request() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let counter = AtomicUsize::new(0);
        let events = server
            .mock("POST", EVENTS_PATH)
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                json!({
                    "id": format!("event-{}", n),
                    "onlineMeeting": {"joinUrl": format!("https://teams.microsoft.com/l/meetup-join/{}", n)}
                })
                .to_string()
                .into_bytes()
            })
            .expect(2)
            .create_async()
            .await;

        let (first_status, first) =
            post_json(test_app(&server.url()), "/schedule-outlook", request()).await;
        let (second_status, second) =
            post_json(test_app(&server.url()), "/schedule-outlook", request()).await;

        events.assert_async().await;
        assert_eq!(first_status, StatusCode::OK);
        assert_eq!(second_status, StatusCode::OK);
        assert_ne!(first["eventId"], second["eventId"]);
    }

    /// Tests offset times are converted to UTC before being sent
    #[tokio::test]
    async fn it_sends_offset_times_in_utc() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let events = server
            .mock("POST", EVENTS_PATH)
            .match_body(Matcher::PartialJson(json!({
                "start": {"dateTime": "2024-01-01T09:30:00Z", "timeZone": "UTC"},
                "end": {"dateTime": "2024-01-01T10:00:00Z", "timeZone": "UTC"}
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(fixture("created_event.json"))
            .create_async()
            .await;

        let (status, _body) = post_json(
            test_app(&server.url()),
            "/schedule-outlook",
            json!({
                "subject": "Design review",
                "startTime": "2024-01-01T15:00:00+05:30",
                "endTime": "2024-01-01T10:00:00Z",
                "attendees": ["jane.doe@example.com"]
            }),
        )
        .await;

        events.assert_async().await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Tests a missing join URL is reported with a placeholder
    #[tokio::test]
    async fn it_reports_a_placeholder_without_a_join_url() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let _events = server
            .mock("POST", EVENTS_PATH)
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(fixture("created_event_no_join_url.json"))
            .create_async()
            .await;

        let (status, body) =
            post_json(test_app(&server.url()), "/schedule-outlook", request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["joinUrl"], "No join URL found");
        assert_eq!(body["eventId"], "AAMkAGI1-event-2");
    }

    /// Tests Graph errors are relayed in the error field
    #[tokio::test]
    async fn it_returns_500_when_event_creation_fails() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token(&mut server).await;
        let _events = server
            .mock("POST", EVENTS_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error":{"code":"ErrorInvalidRequest","message":"Your request can't be completed."}}"#,
            )
            .create_async()
            .await;

        let (status, body) =
            post_json(test_app(&server.url()), "/schedule-outlook", request()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("message").is_none());
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("ErrorInvalidRequest")
        );
    }

    /// Tests invalid input is rejected before authenticating
    #[tokio::test]
    async fn it_returns_400_for_invalid_input() {
        let mut server = mockito::Server::new_async().await;
        let token = server
            .mock("POST", TOKEN_PATH)
            .expect(0)
            .create_async()
            .await;

        for payload in [
            json!({
                "subject": "Design review",
                "startTime": "2024-01-01T15:30:00",
                "endTime": "2024-01-01T15:00:00",
                "attendees": ["jane.doe@example.com"]
            }),
            json!({
                "subject": "Design review",
                "startTime": "2024-01-01T15:00:00",
                "endTime": "2024-01-01T15:30:00",
                "attendees": []
            }),
            json!({
                "subject": "Design review",
                "startTime": "2024-01-01T15:00:00",
                "endTime": "2024-01-01T15:30:00",
                "attendees": ["jane.doe"]
            }),
            json!({
                "subject": "Design review",
                "startTime": "2024-01-01T15:00:00",
                "endTime": "2024-01-01T15:30:00"
            }),
        ] {
            let (status, body) =
                post_json(test_app(&server.url()), "/schedule-outlook", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }

        token.assert_async().await;
    }
}
