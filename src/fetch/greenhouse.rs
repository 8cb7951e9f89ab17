//! Greenhouse boards API client.
//!
//! Talks to `{api_base}/{board_token}/…` with `reqwest`, retrying transient
//! failures (HTTP 429/5xx, connect/timeout errors) with exponential backoff.
//! Job postings are listed first, then fetched individually with
//! `?questions=true` for full detail.

use std::time::Duration;

use backoff::{future::retry, ExponentialBackoffBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SourceError};
use crate::types::SourceConfig;

use super::{collection_field, BoardFetcher};

/// HTTP client for one board of the Greenhouse boards API.
#[derive(Debug, Clone)]
pub struct GreenhouseClient {
    http: reqwest::Client,
    api_base: String,
    board_token: String,
}

impl GreenhouseClient {
    /// Create a client for the board named in `config`.
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            board_token: config.board_token.clone(),
        }
    }

    fn board_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.api_base, self.board_token, path)
    }

    /// GET a URL and decode the JSON body, with exponential-backoff retry
    /// (initial 250 ms, cap 10 s, total budget 30 s) on transient failures.
    async fn get_json(&self, url: &str) -> Result<Value> {
        let backoff_policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(250))
            .with_max_interval(Duration::from_secs(10))
            .with_max_elapsed_time(Some(Duration::from_secs(30)))
            .build();

        // Materialise owned data before entering the retry closure.
        let http = self.http.clone();
        let url = url.to_string();

        retry(backoff_policy, move || {
            let http = http.clone();
            let url = url.clone();
            async move {
                debug!("GET {url}");
                let response = http.get(&url).send().await.map_err(classify_transport)?;

                let status = response.status();
                if !status.is_success() {
                    let err = SourceError::Api {
                        status: status.as_u16(),
                        message: response.text().await.unwrap_or_default(),
                    };
                    if status.as_u16() == 429 || status.is_server_error() {
                        warn!("Transient API failure ({status}) for {url}, retrying");
                        return Err(backoff::Error::transient(err));
                    }
                    return Err(backoff::Error::permanent(err));
                }

                response.json::<Value>().await.map_err(|e| {
                    backoff::Error::permanent(SourceError::Transport(e.to_string()))
                })
            }
        })
        .await
    }
}

/// Classify a transport-level error as transient (retry) or permanent.
fn classify_transport(err: reqwest::Error) -> backoff::Error<SourceError> {
    let source_err = SourceError::Transport(err.to_string());
    if err.is_connect() || err.is_timeout() {
        backoff::Error::transient(source_err)
    } else {
        backoff::Error::permanent(source_err)
    }
}

impl BoardFetcher for GreenhouseClient {
    async fn fetch_offices(&self) -> Result<Vec<Value>> {
        let body = self.get_json(&self.board_url("offices")).await?;
        Ok(collection_field(&body, "offices"))
    }

    async fn fetch_departments(&self) -> Result<Vec<Value>> {
        let body = self.get_json(&self.board_url("departments")).await?;
        Ok(collection_field(&body, "departments"))
    }

    /// List the board's jobs, then fetch each posting's full detail
    /// (`?questions=true`), replacing the listing stub.
    async fn fetch_jobs(&self) -> Result<Vec<Value>> {
        let body = self.get_json(&self.board_url("jobs")).await?;
        let stubs = collection_field(&body, "jobs");

        let mut jobs = Vec::with_capacity(stubs.len());
        for stub in stubs {
            match stub.get("id").and_then(Value::as_i64) {
                Some(id) if id != 0 => {
                    let url = format!("{}/{id}?questions=true", self.board_url("jobs"));
                    jobs.push(self.get_json(&url).await?);
                }
                // Stubs without a usable id pass through; the filter stage
                // drops them with the other sentinels.
                _ => jobs.push(stub),
            }
        }
        Ok(jobs)
    }
}
