use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::Subheading;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

const SELECTOR_SYSTEM_PROMPT: &str = "You pick which subheadings of a car maintenance \
blog article benefit most from an illustration. Reply with a JSON array of the chosen \
subheadings, copied exactly, and nothing else.";

/// Chooses which subheadings get an image.
///
/// Implementations return at most `count` entries taken from `subheadings`,
/// in document order.
#[async_trait]
pub trait SubheadingSelector: Send + Sync {
    async fn select(
        &self,
        subheadings: &[Subheading],
        count: usize,
        context: Option<&str>,
    ) -> Vec<Subheading>;
}

/// The first `count` subheadings.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstN;

pub fn first_n(subheadings: &[Subheading], count: usize) -> Vec<Subheading> {
    subheadings.iter().take(count).cloned().collect()
}

#[async_trait]
impl SubheadingSelector for FirstN {
    async fn select(
        &self,
        subheadings: &[Subheading],
        count: usize,
        _context: Option<&str>,
    ) -> Vec<Subheading> {
        first_n(subheadings, count)
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` makes the LLM selector behave like [`FirstN`].
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// - `OPENAI_API_KEY` (optional)
/// - `OPENAI_BASE_URL` (default `https://api.openai.com/v1`)
/// - `OPENAI_MODEL` (default `gpt-4o-mini`)
/// - `UPSTREAM_TIMEOUT_SECS` (default 10)
impl FromEnv for LlmConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_optional("OPENAI_API_KEY"),
            base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_LLM_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: env_or_default("OPENAI_MODEL", DEFAULT_LLM_MODEL),
            timeout: Duration::from_secs(env_parse("UPSTREAM_TIMEOUT_SECS", "10")?),
        })
    }
}

#[derive(Debug, Error)]
enum LlmError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("no usable heading list in reply")]
    Unparseable,
}

/// Asks an OpenAI-compatible chat completion endpoint to choose.
///
/// Falls back to [`FirstN`] when no API key is set, the call fails, or the
/// reply names no existing subheading.
#[derive(Debug, Clone)]
pub struct LlmSubheadingSelector {
    client: Client,
    config: LlmConfig,
}

impl LlmSubheadingSelector {
    pub fn new(config: LlmConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn ask(
        &self,
        api_key: &str,
        subheadings: &[Subheading],
        count: usize,
        context: Option<&str>,
    ) -> Result<Vec<String>, LlmError> {
        let mut prompt = String::new();
        if let Some(context) = context {
            prompt.push_str(&format!("Article: {}\n\n", context));
        }
        prompt.push_str(&format!("Choose {} of these subheadings:\n", count));
        for subheading in subheadings {
            prompt.push_str(&format!("- {}\n", subheading.text));
        }

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SELECTOR_SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "temperature": 0
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status(status.as_u16()));
        }

        let reply: Value = response.json().await?;
        let content = reply["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default();

        parse_heading_list(content).ok_or(LlmError::Unparseable)
    }
}

/// The first JSON string array in `content`, ignoring code fences and prose.
fn parse_heading_list(content: &str) -> Option<Vec<String>> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&content[start..=end]).ok()
}

/// Keep the subheadings named in `chosen`, in document order, at most `count`.
fn resolve_choices(subheadings: &[Subheading], chosen: &[String], count: usize) -> Vec<Subheading> {
    let wanted: Vec<String> = chosen
        .iter()
        .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
        .collect();

    subheadings
        .iter()
        .filter(|s| wanted.contains(&s.text.to_lowercase()))
        .take(count)
        .cloned()
        .collect()
}

#[async_trait]
impl SubheadingSelector for LlmSubheadingSelector {
    #[instrument(skip_all, fields(available = subheadings.len(), count = count))]
    async fn select(
        &self,
        subheadings: &[Subheading],
        count: usize,
        context: Option<&str>,
    ) -> Vec<Subheading> {
        if subheadings.len() <= count {
            return subheadings.to_vec();
        }

        let Some(api_key) = self.config.api_key.as_deref() else {
            return first_n(subheadings, count);
        };

        match self.ask(api_key, subheadings, count, context).await {
            Ok(chosen) => {
                let selected = resolve_choices(subheadings, &chosen, count);
                if selected.is_empty() {
                    warn!("LLM picked no known subheading, using the first ones");
                    first_n(subheadings, count)
                } else {
                    debug!(selected = selected.len(), "LLM selected subheadings");
                    selected
                }
            }
            Err(e) => {
                warn!(error = %e, "Subheading selection via LLM failed, using the first ones");
                first_n(subheadings, count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[tokio::test]
    async fn first_n_never_pads() {
        let available = headings(&["A", "B", "C"]);
        assert_eq!(FirstN.select(&available, 5, None).await, available);
        assert_eq!(FirstN.select(&available, 2, None).await.len(), 2);
    }

    #[test]
    fn parses_fenced_array() {
        let reply = "```json\n[\"Symptoms\", \"Repair cost\"]\n```";
        assert_eq!(
            parse_heading_list(reply),
            Some(vec!["Symptoms".to_string(), "Repair cost".to_string()])
        );
        assert_eq!(parse_heading_list("I would pick Symptoms"), None);
    }

    #[test]
    fn choices_are_filtered_to_known_headings_in_document_order() {
        let available = headings(&["Symptoms", "Causes", "Repair cost", "FAQ"]);
        let chosen = vec![
            "repair  cost".to_string(),
            "Invented heading".to_string(),
            "Symptoms".to_string(),
        ];

        let selected = resolve_choices(&available, &chosen, 3);
        let texts: Vec<_> = selected.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["Symptoms", "Repair cost"]);
    }

    #[tokio::test]
    async fn without_api_key_behaves_like_first_n() {
        let config = LlmConfig {
            api_key: None,
            ..LlmConfig::new(DEFAULT_LLM_BASE_URL, "unused")
        };
        let selector = LlmSubheadingSelector::new(config).unwrap();
        let available = headings(&["A", "B", "C"]);

        let selected = selector.select(&available, 2, None).await;
        assert_eq!(selected, first_n(&available, 2));
    }

    #[test]
    fn config_from_env() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("  ")),
                ("OPENAI_BASE_URL", Some("http://llm.local/v1/")),
                ("OPENAI_MODEL", None),
                ("UPSTREAM_TIMEOUT_SECS", Some("3")),
            ],
            || {
                let config = LlmConfig::from_env().unwrap();
                assert_eq!(config.api_key, None);
                assert_eq!(config.base_url, "http://llm.local/v1");
                assert_eq!(config.model, DEFAULT_LLM_MODEL);
                assert_eq!(config.timeout, Duration::from_secs(3));
            },
        );
    }
}
