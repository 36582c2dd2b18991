//! Calendar event contract tests against a mock backend.

mod common;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use teamspace::app::state::calendar::{to_display_events, CalendarState};
use teamspace::app::Feedback;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn schedule_json(id: i64, category_id: i64, color: Option<&str>) -> serde_json::Value {
    json!({
        "scheduleId": id,
        "title": format!("event {}", id),
        "content": "agenda",
        "place": "Room B",
        "startDt": "2024-01-08T10:00:00",
        "endDt": "2024-01-08T11:00:00",
        "color": color,
        "scheduleType": "SIMPLE",
        "categoryId": category_id,
        "categoryName": "Work"
    })
}

fn test_month() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

#[tokio::test]
async fn load_events_maps_every_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/7/schedules/calendar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            schedule_json(1, 3, Some("#7aac7a")),
            schedule_json(2, 4, None),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::client_for(&server);
    let schedules = api.list_schedules(7).await.unwrap();
    let events = to_display_events(&schedules);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].extended.category_id, 3);
    assert_eq!(events[1].extended.category_id, 4);
    assert_eq!(events[0].background_color, "#7aac7a");
    // Unset category color falls back to the empty string.
    assert_eq!(events[1].background_color, "");
}

#[tokio::test(flavor = "multi_thread")]
async fn confirmed_delete_sends_body_and_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/team/7/schedules/simple/1"))
        .and(body_json(json!({
            "scheduleId": 1,
            "teamId": 7,
            "teamParticipantId": 42
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/team/7/schedules/calendar"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([schedule_json(2, 3, None)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let services = common::services_for(&server);
    let mut state = CalendarState::new(7, 42, test_month());
    let mut feedback = Feedback::new();

    // Seed the grid, open the detail view, confirm the prompt.
    let seeded: Vec<teamspace::shared::models::Schedule> =
        serde_json::from_value(json!([schedule_json(1, 3, None), schedule_json(2, 3, None)]))
            .unwrap();
    state.apply_list_result(Ok(seeded), &mut feedback);
    let first = state.events[0].clone();
    state.select_event(&first);
    state.request_delete();
    assert_eq!(state.pending_delete, Some(1));
    state.confirm_delete(&services);

    let mut synced = false;
    for _ in 0..100 {
        state.poll(&mut feedback);
        if state.events.len() == 1 {
            synced = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(synced, "delete must end in a refetched event list");
    assert_eq!(state.events[0].id, 2);
    // The detail view closed with the deleted event.
    assert!(state.selected.is_none());
    assert!(feedback.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn forbidden_delete_keeps_grid_and_reports_permissions() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/team/7/schedules/simple/1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("not the creator"))
        .expect(1)
        .mount(&server)
        .await;

    let services = common::services_for(&server);
    let mut state = CalendarState::new(7, 42, test_month());
    let mut feedback = Feedback::new();

    let seeded: Vec<teamspace::shared::models::Schedule> =
        serde_json::from_value(json!([schedule_json(1, 3, None)])).unwrap();
    state.apply_list_result(Ok(seeded), &mut feedback);
    let before = state.events.clone();
    let first = state.events[0].clone();
    state.select_event(&first);
    state.request_delete();
    state.confirm_delete(&services);

    let mut reported = false;
    for _ in 0..100 {
        state.poll(&mut feedback);
        if !feedback.is_empty() {
            reported = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(reported);
    assert_eq!(state.events, before);
    assert_eq!(feedback.len(), 1);
    let message = &feedback.notices().next().unwrap().message;
    assert!(
        message.contains("role"),
        "auth failures get the permission message, got: {}",
        message
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn submitted_form_creates_event_and_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/team/7/schedules/simple"))
        .and(body_json(json!({
            "title": "Standup",
            "content": "",
            "place": "",
            "startDt": "2024-01-15T09:00:00",
            "endDt": "2024-01-15T10:00:00",
            "categoryId": 3,
            "teamParticipantId": 42,
            "color": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule_json(5, 3, None)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/team/7/schedules/calendar"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([schedule_json(5, 3, None)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let services = common::services_for(&server);
    let mut state = CalendarState::new(7, 42, test_month());
    let mut feedback = Feedback::new();

    // Clicking a day pre-fills the form with that date.
    state.select_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    {
        let form = state.form.as_mut().unwrap();
        form.title = "Standup".to_string();
        form.category_id = Some(3);
    }
    state.submit_form(&services, &mut feedback);
    assert!(state.form.is_none(), "form closes on submission");

    let mut synced = false;
    for _ in 0..100 {
        state.poll(&mut feedback);
        if !state.events.is_empty() {
            synced = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(synced);
    assert_eq!(state.events[0].id, 5);
    assert!(feedback.is_empty());
}
