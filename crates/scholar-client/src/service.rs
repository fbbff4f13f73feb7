//! The search service seam.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;
use crate::request::{ScholarResponse, SearchRequest};

/// Operations the Lens Scholar API offers.
///
/// [`ScholarClient`](crate::ScholarClient) implements it over HTTP; the scroll
/// loop only depends on this trait.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Run one search and return one page of results.
    async fn search(&self, request: &SearchRequest) -> Result<ScholarResponse, ClientError>;

    /// Current API usage and remaining quota.
    async fn usage(&self) -> Result<Value, ClientError>;

    /// Fetch one record by Lens ID.
    async fn by_lens_id(&self, lens_id: &str) -> Result<Value, ClientError>;
}
