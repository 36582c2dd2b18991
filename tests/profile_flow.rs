//! Profile and membership contract tests.

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use teamspace::app::api::AvatarUpload;
use teamspace::app::state::profile::TeamProfileState;
use teamspace::app::Feedback;
use teamspace::shared::models::{PasswordChangeRequest, SignInRequest};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn participant_json(id: i64, team_id: i64, nickname: &str, role: &str) -> serde_json::Value {
    json!({
        "teamParticipantsId": id,
        "teamId": team_id,
        "teamName": format!("team {}", team_id),
        "teamNickName": nickname,
        "participantsProfileUrl": null,
        "teamRole": role
    })
}

#[tokio::test]
async fn sign_in_reads_token_from_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sign-in"))
        .and(body_json(json!({
            "email": "kim@example.com",
            "password": "password1"
        })))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Authorization", "Bearer fresh-token"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = common::anonymous_client_for(&server);
    let token = api
        .sign_in(&SignInRequest {
            email: "kim@example.com".to_string(),
            password: "password1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(token, "fresh-token");
}

#[tokio::test]
async fn password_change_posts_lowercase_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/member/password"))
        .and(body_json(json!({
            "oldpassword": "oldpass99",
            "newpassword": "newpass99"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::client_for(&server);
    api.change_password(&PasswordChangeRequest {
        old_password: "oldpass99".to_string(),
        new_password: "newpass99".to_string(),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn participant_lookup_scopes_by_team_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/member/participants"))
        .and(wiremock::matchers::query_param("teamId", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [participant_json(11, 7, "nick", "MEMBER")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::client_for(&server);
    let participant = api.participant_for_team(7).await.unwrap().unwrap();
    assert_eq!(participant.team_participants_id, 11);
    assert_eq!(participant.team_id, Some(7));
}

#[tokio::test]
async fn team_list_is_paged_in_creation_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/list"))
        .and(wiremock::matchers::query_param("sort", "createDt,asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {"teamId": 7, "teamName": "Platform"},
                {"teamId": 9, "teamName": "Design"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::client_for(&server);
    let teams = api.list_teams().await.unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].team_name, "Platform");
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_update_sends_multipart_then_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/member/participant"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(participant_json(11, 7, "new-nick", "MEMBER")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/member/participants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [participant_json(11, 7, "new-nick", "MEMBER")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let services = common::services_for(&server);
    let mut state = TeamProfileState::new();
    let mut feedback = Feedback::new();
    state.participants = vec![serde_json::from_value(participant_json(
        11, 7, "old-nick", "MEMBER",
    ))
    .unwrap()];
    state.select(11);
    state.nickname = "new-nick".to_string();
    state.avatar = Some(AvatarUpload {
        file_name: "avatar.png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    });
    state.submit_update(&services, &mut feedback);

    let mut synced = false;
    for _ in 0..100 {
        state.poll(&mut feedback);
        if state.selected.as_ref().map(|p| p.team_nick_name.as_str()) == Some("new-nick") {
            synced = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(synced, "update must end in a refetched membership list");

    // The nickname and image travelled as multipart form fields.
    let requests = server.received_requests().await.unwrap();
    let update = requests
        .iter()
        .find(|r| r.url.path() == "/member/participant")
        .unwrap();
    let content_type = update
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&update.body);
    assert!(body.contains("name=\"teamNickName\""));
    assert!(body.contains("name=\"teamParticipantsId\""));
    assert!(body.contains("name=\"participantImg\""));
    assert!(body.contains("filename=\"avatar.png\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn leader_cannot_leave_and_no_request_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/team/7/participant"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let services = common::services_for(&server);
    let mut state = TeamProfileState::new();
    let mut feedback = Feedback::new();
    state.participants = vec![serde_json::from_value(participant_json(
        11, 7, "nick", "LEADER",
    ))
    .unwrap()];
    state.select(11);
    state.request_leave(&services, &mut feedback);

    assert_eq!(feedback.len(), 1);
    assert!(feedback
        .notices()
        .next()
        .unwrap()
        .message
        .contains("leadership"));
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn member_leave_deletes_then_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/team/7/participant"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/member/participants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
        .expect(1)
        .mount(&server)
        .await;

    let services = common::services_for(&server);
    let mut state = TeamProfileState::new();
    let mut feedback = Feedback::new();
    state.participants = vec![serde_json::from_value(participant_json(
        11, 7, "nick", "MEMBER",
    ))
    .unwrap()];
    state.select(11);
    state.request_leave(&services, &mut feedback);

    let mut left = false;
    for _ in 0..100 {
        state.poll(&mut feedback);
        if state.participants.is_empty() {
            left = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(left);
    assert!(state.selected.is_none());
}
