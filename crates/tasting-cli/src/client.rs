//! Async HTTP client wrapping the tasting JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tasting_core::{
  catalog::Catalog,
  fact::Entry,
  submission::Submission,
  view::DashboardView,
};

/// Connection settings for the tasting API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
  summary: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      // Summaries wait on an upstream model.
      .timeout(Duration::from_secs(60))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  /// `{base_url}/api/{segments...}`, each segment percent-encoded.
  fn url(&self, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(&self.config.base_url)
      .with_context(|| format!("invalid server URL {:?}", self.config.base_url))?;
    url
      .path_segments_mut()
      .map_err(|()| anyhow!("server URL {:?} cannot have a path", self.config.base_url))?
      .pop_if_empty()
      .push("api")
      .extend(segments);
    Ok(url)
  }

  // ── Read side ─────────────────────────────────────────────────────────────

  /// `GET /api/dashboard[?item=<item>]`
  pub async fn dashboard(&self, item: Option<&str>) -> Result<DashboardView> {
    let mut req = self.client.get(self.url(&["dashboard"])?);
    if let Some(item) = item {
      req = req.query(&[("item", item)]);
    }
    let resp = req.send().await.context("GET /dashboard failed")?;
    decode(resp, "GET /dashboard").await
  }

  /// `GET /api/catalog`
  pub async fn catalog(&self) -> Result<Catalog> {
    let resp = self
      .client
      .get(self.url(&["catalog"])?)
      .send()
      .await
      .context("GET /catalog failed")?;
    decode(resp, "GET /catalog").await
  }

  /// `POST /api/items/{item}/summary`
  pub async fn summary(&self, item: &str) -> Result<String> {
    let resp = self
      .client
      .post(self.url(&["items", item, "summary"])?)
      .send()
      .await
      .context("POST /summary failed")?;
    let body: SummaryResponse = decode(resp, "POST /summary").await?;
    Ok(body.summary)
  }

  // ── Write side ────────────────────────────────────────────────────────────

  /// `POST /api/submissions`
  pub async fn submit(&self, submission: &Submission) -> Result<Vec<Entry>> {
    let resp = self
      .client
      .post(self.url(&["submissions"])?)
      .json(submission)
      .send()
      .await
      .context("POST /submissions failed")?;
    decode(resp, "POST /submissions").await
  }
}

/// Surface the server's `{"error": ...}` message on failure.
async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    let msg = resp
      .json::<ErrorBody>()
      .await
      .map(|b| b.error)
      .unwrap_or_default();
    return Err(anyhow!("{what} → {status} {msg}"));
  }
  resp.json().await.with_context(|| format!("deserialising {what}"))
}
