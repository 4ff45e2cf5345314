use wiremock::MockServer;

use elite_editor::controller::{Action, SubmitOutcome};
use elite_editor::domain::{HistoryEntry, MAX_HISTORY_ENTRIES, RewriteResult, Tone};
use elite_editor::factory;

use super::gemini::{config_for, mount_reply, polished_reply};

#[tokio::test]
async fn history_survives_restart_in_order() {
    let server = MockServer::start().await;
    mount_reply(&server, polished_reply("<p>Done.</p>", &["Tightened"]), 3).await;
    let tmp = tempfile::tempdir().unwrap();
    let config = config_for(&server, tmp.path());

    let mut controller = factory::create_controller(&config);
    for draft in ["one", "two", "three"] {
        controller.dispatch(Action::DraftChanged(draft.into()));
        assert_eq!(controller.submit().await, SubmitOutcome::Polished);
    }
    let before = controller.history().clone();
    drop(controller);

    let reopened = factory::create_controller(&config);
    assert_eq!(reopened.history(), &before);
    let originals: Vec<_> = reopened.history().iter().map(|e| e.original.as_str()).collect();
    assert_eq!(originals, ["three", "two", "one"]);
}

#[tokio::test]
async fn delete_persists_and_keeps_order() {
    let server = MockServer::start().await;
    mount_reply(&server, polished_reply("<p>x</p>", &[]), 3).await;
    let tmp = tempfile::tempdir().unwrap();
    let config = config_for(&server, tmp.path());

    let mut controller = factory::create_controller(&config);
    for draft in ["a", "b", "c"] {
        controller.dispatch(Action::DraftChanged(draft.into()));
        controller.submit().await;
    }
    let middle = controller.history().entries()[1].id.clone();
    controller.dispatch(Action::HistoryEntryDeleted(middle.clone()));

    let reopened = factory::create_controller(&config);
    let originals: Vec<_> = reopened.history().iter().map(|e| e.original.as_str()).collect();
    assert_eq!(originals, ["c", "a"]);
    assert!(!reopened.history().contains(&middle));
}

#[tokio::test]
async fn clear_removes_the_stored_file() {
    let server = MockServer::start().await;
    mount_reply(&server, polished_reply("<p>x</p>", &[]), 1).await;
    let tmp = tempfile::tempdir().unwrap();
    let config = config_for(&server, tmp.path());

    let mut controller = factory::create_controller(&config);
    controller.dispatch(Action::DraftChanged("a".into()));
    controller.submit().await;
    assert!(config.history_path().exists());

    controller.dispatch(Action::HistoryCleared);
    assert!(!config.history_path().exists());
    assert!(controller.state().result.is_some());
    assert!(factory::create_controller(&config).history().is_empty());
}

#[tokio::test]
async fn full_history_drops_the_oldest_entry() {
    let server = MockServer::start().await;
    mount_reply(&server, polished_reply("<p>new</p>", &[]), 1).await;
    let tmp = tempfile::tempdir().unwrap();
    let config = config_for(&server, tmp.path());

    let seeded: Vec<HistoryEntry> = (0..MAX_HISTORY_ENTRIES as i64)
        .rev()
        .map(|ts| {
            HistoryEntry::new(
                format!("draft {ts}"),
                &RewriteResult::new("old", vec![]),
                Tone::Friendly,
                ts,
            )
        })
        .collect();
    std::fs::write(
        config.history_path(),
        serde_json::to_string(&seeded).unwrap(),
    )
    .unwrap();

    let mut controller = factory::create_controller(&config);
    assert_eq!(controller.history().len(), MAX_HISTORY_ENTRIES);
    controller.dispatch(Action::DraftChanged("fresh".into()));
    controller.submit().await;

    let reopened = factory::create_controller(&config);
    let history = reopened.history();
    assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
    assert_eq!(history.entries()[0].original, "fresh");
    assert!(!history.contains("0"));
    assert!(history.contains("1"));
}

#[tokio::test]
async fn corrupt_history_file_starts_empty() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let config = config_for(&server, tmp.path());
    std::fs::write(config.history_path(), "{not json").unwrap();

    let controller = factory::create_controller(&config);
    assert!(controller.history().is_empty());
    assert!(controller.state().error.is_none());
}
