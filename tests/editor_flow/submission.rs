use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use elite_editor::controller::{Action, SubmitOutcome};
use elite_editor::domain::Tone;
use elite_editor::factory;

use super::gemini::{GENERATE_PATH, config_for, mount_reply, polished_reply};

const GENERIC_FAILURE: &str = "Failed to polish text. Please try again.";

#[tokio::test]
async fn formal_rewrite_records_history_entry() {
    let server = MockServer::start().await;
    let draft = "<b>Pls</b> send the report asap";
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": draft}]}],
            "generationConfig": {"responseMimeType": "application/json"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(polished_reply(
            "<p>Please send the report at your earliest convenience.</p>",
            &["Expanded abbreviation", "Softened urgency"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let config = config_for(&server, tmp.path());
    let mut controller = factory::create_controller(&config);
    controller.dispatch(Action::DraftChanged(draft.into()));
    controller.dispatch(Action::ToneChanged(Tone::Formal));

    assert_eq!(controller.submit().await, SubmitOutcome::Polished);

    let state = controller.state();
    let result = state.result.as_ref().unwrap();
    assert_eq!(
        result.polished_text,
        "<p>Please send the report at your earliest convenience.</p>"
    );
    assert_eq!(result.summary_of_changes.len(), 2);
    assert!(state.error.is_none());

    let history = controller.history();
    assert_eq!(history.len(), 1);
    let entry = &history.entries()[0];
    assert_eq!(entry.original, draft);
    assert_eq!(entry.tone, Tone::Formal);
    assert_eq!(entry.id, entry.timestamp.to_string());

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let instruction = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
    assert!(instruction.contains("Formal"));
}

#[tokio::test]
async fn blank_draft_never_reaches_the_service() {
    let server = MockServer::start().await;
    mount_reply(&server, polished_reply("x", &[]), 0).await;

    let tmp = tempfile::tempdir().unwrap();
    let mut controller = factory::create_controller(&config_for(&server, tmp.path()));
    for draft in ["", "  ", "<br>"] {
        controller.dispatch(Action::DraftChanged(draft.into()));
        assert_eq!(controller.submit().await, SubmitOutcome::Rejected);
    }
    assert!(controller.history().is_empty());
}

#[tokio::test]
async fn server_error_keeps_previous_result_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(polished_reply("<p>First.</p>", &[])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let mut controller = factory::create_controller(&config_for(&server, tmp.path()));
    controller.dispatch(Action::DraftChanged("first".into()));
    assert_eq!(controller.submit().await, SubmitOutcome::Polished);

    controller.dispatch(Action::DraftChanged("second".into()));
    assert_eq!(controller.submit().await, SubmitOutcome::Failed);

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some(GENERIC_FAILURE));
    assert_eq!(state.result.as_ref().unwrap().polished_text, "<p>First.</p>");
    assert_eq!(controller.history().len(), 1);
    assert!(state.can_submit());
}

#[tokio::test]
async fn nonconforming_payload_is_a_failure() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        json!({"candidates": [{"content": {"parts": [{"text": "{\"polishedText\": \"only\"}"}]}}]}),
        1,
    )
    .await;

    let tmp = tempfile::tempdir().unwrap();
    let mut controller = factory::create_controller(&config_for(&server, tmp.path()));
    controller.dispatch(Action::DraftChanged("hello".into()));
    assert_eq!(controller.submit().await, SubmitOutcome::Failed);
    assert!(controller.state().result.is_none());
    assert!(controller.history().is_empty());
}

#[tokio::test]
async fn loading_an_entry_makes_no_call() {
    let server = MockServer::start().await;
    mount_reply(&server, polished_reply("<p>Hi.</p>", &["Capitalized"]), 1).await;

    let tmp = tempfile::tempdir().unwrap();
    let mut controller = factory::create_controller(&config_for(&server, tmp.path()));
    controller.dispatch(Action::DraftChanged("hi".into()));
    controller.dispatch(Action::ToneChanged(Tone::Casual));
    controller.submit().await;
    controller.dispatch(Action::Reset);

    let id = controller.history().entries()[0].id.clone();
    let effects = controller.dispatch(Action::HistoryEntryLoaded(id));
    assert_eq!(effects.len(), 1);

    let state = controller.state();
    assert_eq!(state.draft, "hi");
    assert_eq!(state.tone, Tone::Casual);
    assert_eq!(state.result.as_ref().unwrap().summary_of_changes, vec!["Capitalized"]);
    // `expect(1)` on the mock verifies no second request when the server drops.
}
