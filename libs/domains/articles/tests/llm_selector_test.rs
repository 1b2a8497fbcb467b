//! LlmSubheadingSelector against a local chat-completion double.

use domain_articles::Subheading;
use domain_articles::placement::{LlmConfig, LlmSubheadingSelector, SubheadingSelector};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn headings(texts: &[&str]) -> Vec<Subheading> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| Subheading {
            index,
            text: text.to_string(),
        })
        .collect()
}

fn selector(server: &MockServer) -> LlmSubheadingSelector {
    let mut config = LlmConfig::new(format!("{}/v1", server.uri()), "sk-test");
    config.model = "test-model".into();
    config.timeout = Duration::from_millis(300);
    LlmSubheadingSelector::new(config).unwrap()
}

fn reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

const SECTIONS: [&str; 4] = ["Symptoms", "Causes", "Repair cost", "FAQ"];

#[tokio::test]
async fn uses_llm_choice_in_document_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "test-model" })))
        .respond_with(reply("```json\n[\"Repair cost\", \"Symptoms\"]\n```"))
        .expect(1)
        .mount(&server)
        .await;

    let selected = selector(&server)
        .select(&headings(&SECTIONS), 2, Some("P0300 misfire"))
        .await;

    let texts: Vec<_> = selected.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["Symptoms", "Repair cost"]);
}

#[tokio::test]
async fn invented_headings_fall_back_to_first_n() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(reply("[\"Introduction\", \"Conclusion\"]"))
        .mount(&server)
        .await;

    let selected = selector(&server)
        .select(&headings(&SECTIONS), 2, None)
        .await;

    let texts: Vec<_> = selected.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, ["Symptoms", "Causes"]);
}

#[tokio::test]
async fn upstream_error_falls_back_to_first_n() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let selected = selector(&server)
        .select(&headings(&SECTIONS), 3, None)
        .await;
    assert_eq!(selected, headings(&SECTIONS[..3]));
}

#[tokio::test]
async fn slow_upstream_falls_back_to_first_n() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(reply("[\"FAQ\"]").set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let selected = selector(&server)
        .select(&headings(&SECTIONS), 1, None)
        .await;
    assert_eq!(selected[0].text, "Symptoms");
}

#[tokio::test]
async fn no_request_when_every_subheading_is_needed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let available = headings(&["Only", "Two"]);
    let selected = selector(&server).select(&available, 5, None).await;
    assert_eq!(selected, available);
}
