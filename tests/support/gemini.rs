#![allow(dead_code)]

use std::path::Path;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use elite_editor::Config;
use elite_editor::config::GeminiConfig;

pub const MODEL: &str = "gemini-test";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-test:generateContent";

/// A Gemini reply whose text part is the structured rewrite payload.
pub fn polished_reply(polished: &str, changes: &[&str]) -> Value {
    let payload = json!({
        "polishedText": polished,
        "summaryOfChanges": changes,
    });
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": payload.to_string()}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 40}
    })
}

/// Mount a generateContent handler answering with `body`, expecting `calls` hits.
pub async fn mount_reply(server: &MockServer, body: Value, calls: u64) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(calls)
        .mount(server)
        .await;
}

/// Config pointing at `server` with history stored under `dir`.
pub fn config_for(server: &MockServer, dir: &Path) -> Config {
    Config {
        config_dir: dir.to_path_buf(),
        config_path: dir.join("config.toml"),
        api_key: Some("test-key".into()),
        model: MODEL.into(),
        gemini: GeminiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        },
        ..Config::default()
    }
}
