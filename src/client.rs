use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use serde::Deserialize;
use thiserror::Error;

/// Project-lookup endpoint; the project ID is appended as the query value.
pub const API_URL: &str = "https://show.bilibili.com/api/ticket/project/getV2?id=";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Failure modes of a single project fetch. One GET per call, no retries.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(reqwest::Error),
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid response body: {0}")]
    Decode(reqwest::Error),
}

/// Top-level response envelope. `code` 0 means success; anything else is the
/// server's own application-error convention, with an accompanying `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPayload {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ProjectData>,
}

/// The slice of the payload's `data` object this scanner cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub hide: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Wrapper over a configured `reqwest::Client` bound to the lookup endpoint.
pub struct ShowClient {
    http: reqwest::Client,
}

impl ShowClient {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
        );
        headers.insert(REFERER, HeaderValue::from_static("https://show.bilibili.com/"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http })
    }

    /// Fetch the raw payload for one project ID. Exactly one attempt.
    pub async fn fetch(&self, id: u64) -> std::result::Result<ApiPayload, FetchError> {
        let url = format!("{API_URL}{id}");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Network)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        resp.json::<ApiPayload>().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e)
            } else {
                FetchError::Network(e)
            }
        })
    }
}
