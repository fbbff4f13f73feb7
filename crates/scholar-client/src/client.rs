//! HTTP client for the Lens Scholar API using reqwest

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ScholarConfig;
use crate::error::ClientError;
use crate::request::{ScholarResponse, SearchRequest};
use crate::service::SearchService;

pub struct ScholarClient {
    client: Client,
    config: ScholarConfig,
}

impl ScholarClient {
    pub fn new(config: ScholarConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Client configured from `LENS_SCHOLAR_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ScholarConfig::from_env()?)
    }

    pub fn config(&self) -> &ScholarConfig {
        &self.config
    }

    fn search_endpoint(&self, path: &str) -> Result<Url, ClientError> {
        endpoint(&self.config.search_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.config.api_key)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/json")
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.authorized(request).send().await?;
        let status = response.status().as_u16();
        debug!(status, url = %response.url(), "request status");

        let body = response.text().await?;
        check_status(status, &body)?;
        serde_json::from_str(&body).map_err(|e| ClientError::ParseError {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SearchService for ScholarClient {
    async fn search(&self, request: &SearchRequest) -> Result<ScholarResponse, ClientError> {
        let url = self.search_endpoint("search")?;
        let builder = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        self.send(builder).await
    }

    async fn usage(&self) -> Result<Value, ClientError> {
        let url = Url::parse(&self.config.usage_url).map_err(|_| ClientError::InvalidUrl {
            url: self.config.usage_url.clone(),
        })?;
        self.send(self.client.get(url)).await
    }

    async fn by_lens_id(&self, lens_id: &str) -> Result<Value, ClientError> {
        let url = self.search_endpoint(lens_id)?;
        self.send(self.client.get(url)).await
    }
}

/// `base` with one path segment appended.
fn endpoint(base: &str, segment: &str) -> Result<Url, ClientError> {
    let invalid = || ClientError::InvalidUrl {
        url: format!("{}/{}", base, segment),
    };
    let mut url = Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

/// Map a response status to an error; 2xx passes.
fn check_status(status: u16, body: &str) -> Result<(), ClientError> {
    match status {
        200..=299 => Ok(()),
        429 => Err(ClientError::RateLimited),
        _ => {
            error!(status, body = %body, "request failed");
            Err(ClientError::Status {
                status,
                body: body.to_string(),
            })
        }
    }
}
