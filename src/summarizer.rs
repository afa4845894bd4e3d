//! Natural-language summaries of a comparison.
//!
//! The summarizer is an external collaborator: the comparison never fails
//! because of it. See [`crate::compare`] for the fallback text used when it
//! errors.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config;
use crate::error::{ComparioError, Result};
use crate::models::PriceQuote;

/// Produces a short description of a set of quotes.
pub trait Summarizer: Send {
    fn summarize(&self, product_name: &str, quotes: &[PriceQuote]) -> Result<String>;
}

// ---------------------------------------------------------------------------
// HttpSummarizer
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Summarizer backed by an OpenAI-style chat completions endpoint.
pub struct HttpSummarizer {
    endpoint: String,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
    client: std::sync::OnceLock<Client>,
}

impl HttpSummarizer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            model: config::DEFAULT_SUMMARIZER_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            client: std::sync::OnceLock::new(),
        }
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder().timeout(self.timeout).build()?;
        Ok(self.client.get_or_init(|| client))
    }

    fn prompt(product_name: &str, quotes: &[PriceQuote]) -> String {
        let lines: Vec<String> = quotes
            .iter()
            .map(|q| format!("- {}: ${:.2}", q.store, q.price))
            .collect();
        format!(
            "Summarize this price comparison for \"{}\" in one or two sentences, \
             naming the cheapest store.\n{}",
            product_name,
            lines.join("\n")
        )
    }
}

impl Summarizer for HttpSummarizer {
    fn summarize(&self, product_name: &str, quotes: &[PriceQuote]) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": "You are a concise shopping assistant."},
                {"role": "user", "content": Self::prompt(product_name, quotes)},
            ],
        });

        let mut request = self.client()?.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp: ChatResponse = request.send()?.error_for_status()?.json()?;
        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ComparioError::DependencyUnavailable("Summarizer returned no content".into())
            })
    }
}
