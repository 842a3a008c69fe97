use crate::models::payload_dto::ArticlePayload;
use axum::http::StatusCode;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// One completed request as seen from the load generator. Any status code
/// is an observation; only transport failures are errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub status: StatusCode,
    pub latency: Duration,
}

// Anything the virtual users can drive traffic against
pub trait Target {
    async fn post(&self, payload: &ArticlePayload) -> Result<Observation, TargetError>;
}

#[derive(Clone)]
pub struct HttpTarget {
    client: reqwest::Client,
    url: String,
}

impl HttpTarget {
    /// The client is shared so connections are reused across iterations.
    pub fn new(url: String) -> HttpTarget {
        HttpTarget {
            client: reqwest::Client::new(),
            url,
        }
    }
}

impl Target for HttpTarget {
    async fn post(&self, payload: &ArticlePayload) -> Result<Observation, TargetError> {
        let started = Instant::now();
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(TargetError::RequestFailed)?;
        let latency = started.elapsed();

        debug!("{} -> {} in {:?}", self.url, response.status(), latency);

        Ok(Observation {
            status: response.status(),
            latency,
        })
    }
}
