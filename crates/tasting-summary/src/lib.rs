//! Gemini-backed [`SummaryGenerator`].
//!
//! Talks to the Generative Language REST API (`models/{model}:generateContent`).
//! Every failure is folded into a readable message; callers never see an
//! error from this crate's [`SummaryGenerator`] impl.

use std::{future::Future, time::Duration};

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tasting_core::summary::SummaryGenerator;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str =
  "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Shown when the service answers but produces no text.
pub const NO_RESPONSE: &str = "No response generated.";

// ─── Config ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
  /// Without a key every request short-circuits to a fallback message.
  #[serde(default)]
  pub api_key:      Option<String>,
  #[serde(default = "default_model")]
  pub model:        String,
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  #[serde(default = "default_timeout")]
  pub timeout_secs: u64,
}

fn default_model() -> String { DEFAULT_MODEL.to_owned() }
fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }
fn default_timeout() -> u64 { 30 }

impl Default for GeminiConfig {
  fn default() -> Self {
    Self {
      api_key:      None,
      model:        default_model(),
      base_url:     default_base_url(),
      timeout_secs: default_timeout(),
    }
  }
}

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  #[error("no API key configured")]
  NotConfigured,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("service returned {0}: {1}")]
  Status(StatusCode, String),

  #[error("empty response")]
  Empty,
}

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
  contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
  parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
  text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
  text: Option<String>,
}

/// Concatenate the text parts of the first candidate.
fn extract_text(resp: &GenerateResponse) -> Option<String> {
  let text: String = resp
    .candidates
    .first()?
    .content
    .as_ref()?
    .parts
    .iter()
    .filter_map(|p| p.text.as_deref())
    .collect();
  let text = text.trim();
  (!text.is_empty()).then(|| text.to_owned())
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiClient {
  client: Client,
  config: GeminiConfig,
}

impl GeminiClient {
  pub fn new(config: GeminiConfig) -> Result<Self, Error> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self { client, config })
  }

  pub fn is_configured(&self) -> bool {
    self.config.api_key.as_deref().is_some_and(|k| !k.is_empty())
  }

  fn url(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    )
  }

  /// One `generateContent` round trip.
  pub async fn request(&self, prompt: &str) -> Result<String, Error> {
    let key = match self.config.api_key.as_deref() {
      Some(k) if !k.is_empty() => k,
      _ => return Err(Error::NotConfigured),
    };

    let body = GenerateRequest {
      contents: vec![Content { parts: vec![Part { text: prompt }] }],
    };

    let resp = self
      .client
      .post(self.url())
      .header("x-goog-api-key", key)
      .json(&body)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let detail = resp.text().await.unwrap_or_default();
      return Err(Error::Status(status, detail));
    }

    let parsed: GenerateResponse = resp.json().await?;
    extract_text(&parsed).ok_or(Error::Empty)
  }
}

impl SummaryGenerator for GeminiClient {
  fn generate<'a>(
    &'a self,
    prompt: &'a str,
  ) -> impl Future<Output = String> + Send + 'a {
    async move {
      match self.request(prompt).await {
        Ok(text) => text,
        Err(Error::Empty) => NO_RESPONSE.to_owned(),
        Err(e) => {
          tracing::warn!(error = %e, "summary generation failed");
          format!("Could not generate a summary due to an error: {e}")
        }
      }
    }
  }
}
