//! Document list pagination and filtering contract tests.

mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use teamspace::app::state::documents::DocumentListState;
use teamspace::app::Feedback;
use teamspace::shared::ClientError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn document_json(index: usize) -> serde_json::Value {
    json!({
        "id": format!("doc-{}", index),
        "title": format!("Design doc {}", index),
        "content": if index < 5 { "retro notes" } else { "plain contents" },
        "teamId": 7,
        "commentsId": [],
        "createdDt": "2023-12-18T10:00:00",
        "updatedDt": "2023-12-19T10:00:00"
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn fifteen_items_page_and_filter_without_refetching() {
    let server = MockServer::start().await;

    let content: Vec<serde_json::Value> = (0..15).map(document_json).collect();
    // Exactly one fetch: paging and searching stay client-side.
    Mock::given(method("GET"))
        .and(path("/team/7/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": content})))
        .expect(1)
        .mount(&server)
        .await;

    let services = common::services_for(&server);
    let mut state = DocumentListState::new(7);
    let mut feedback = Feedback::new();
    state.refresh(&services);

    let mut fetched = false;
    for _ in 0..100 {
        state.poll(&mut feedback);
        if !state.documents().is_empty() {
            fetched = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(fetched);

    // Page 0 shows items 0-9, page 1 shows items 10-14.
    assert_eq!(state.page_count(), 2);
    let page0: Vec<&str> = state.visible().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(page0.len(), 10);
    assert_eq!(page0[0], "doc-0");
    assert_eq!(page0[9], "doc-9");

    state.set_page(1);
    let page1: Vec<&str> = state.visible().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(page1, vec!["doc-10", "doc-11", "doc-12", "doc-13", "doc-14"]);

    // Search applies only within the fetched 15.
    state.set_search_term("retro".to_string());
    assert_eq!(state.filtered().len(), 5);
    assert_eq!(state.page, 0);

    // The expect(1) on the mock verifies no further fetch happened.
}

#[tokio::test]
async fn missing_content_array_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/7/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let api = common::client_for(&server);
    let error = api.list_documents(7).await.unwrap_err();
    assert_matches!(error, ClientError::Decode { .. });

    // Applying the failure leaves the (empty) list alone and reports once.
    let mut state = DocumentListState::new(7);
    let mut feedback = Feedback::new();
    state.apply_list_result(Err(error), &mut feedback);
    assert!(state.documents().is_empty());
    assert_eq!(feedback.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_document_posts_then_refetches() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/team/7/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "created"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/team/7/documents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"content": [document_json(0)]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let services = common::services_for(&server);
    let mut state = DocumentListState::new(7);
    let mut feedback = Feedback::new();
    state.open_create_form();
    {
        let form = state.create_form.as_mut().unwrap();
        form.title = "Retro notes".to_string();
        form.content = "what went well".to_string();
    }
    state.submit_create(&services, &mut feedback);
    assert!(state.create_form.is_none());

    let mut synced = false;
    for _ in 0..100 {
        state.poll(&mut feedback);
        if !state.documents().is_empty() {
            synced = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(synced);
    assert!(feedback.is_empty());
}
