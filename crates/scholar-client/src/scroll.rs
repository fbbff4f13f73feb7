//! Scrolling through large result sets.
//!
//! The service returns at most [`MAX_SCROLL_SIZE`](crate::request::MAX_SCROLL_SIZE)
//! results per request together with a `scroll_id`; sending the id back
//! fetches the next page. An empty page, or one shorter than the requested
//! size, is the last.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::ScholarConfig;
use crate::error::ClientError;
use crate::request::{ScholarResponse, SearchRequest};
use crate::service::SearchService;

/// Where scrolled pages go.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollSink {
    /// Collect every document in memory.
    Memory,
    /// Write each page to its own JSON file in this directory.
    Directory(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScrollOutput {
    Documents(Vec<Value>),
    Files(Vec<PathBuf>),
}

impl ScrollOutput {
    pub fn len(&self) -> usize {
        match self {
            ScrollOutput::Documents(docs) => docs.len(),
            ScrollOutput::Files(files) => files.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fetch every page of `request`.
///
/// HTTP 429 responses are retried after `rate_limit_sleep_secs`, up to
/// `max_rate_limit_retries` times in a row. Any other error ends the scroll.
pub async fn scroll_all<S>(
    service: &S,
    mut request: SearchRequest,
    sink: &ScrollSink,
    config: &ScholarConfig,
) -> Result<ScrollOutput, ClientError>
where
    S: SearchService + ?Sized,
{
    if let ScrollSink::Directory(dir) = sink {
        tokio::fs::create_dir_all(dir).await?;
    }

    let mut documents = Vec::new();
    let mut files = Vec::new();
    let mut rate_limited = 0u32;
    let page_size = request.size as usize;

    loop {
        if let Some(id) = &request.scroll_id {
            debug!(scroll_id = %abbreviate(id), "continuing scroll");
        }

        let page = match service.search(&request).await {
            Ok(page) => page,
            Err(ClientError::RateLimited) => {
                rate_limited += 1;
                if rate_limited > config.max_rate_limit_retries {
                    error!(attempts = rate_limited, "giving up after repeated rate limiting");
                    return Err(ClientError::RetriesExhausted {
                        attempts: rate_limited,
                    });
                }
                warn!(
                    sleep_secs = config.rate_limit_sleep_secs,
                    "too many requests, backing off"
                );
                tokio::time::sleep(Duration::from_secs(config.rate_limit_sleep_secs)).await;
                continue;
            }
            Err(e) => {
                error!(error = %e, "scroll request failed");
                return Err(e);
            }
        };
        rate_limited = 0;

        let returned = page.data.len();
        let next_id = page.scroll_id.clone();
        match sink {
            ScrollSink::Memory => documents.extend(page.data),
            ScrollSink::Directory(dir) => {
                let path = write_page(dir, &page).await?;
                debug!(path = %path.display(), "scroll page saved");
                files.push(path);
            }
        }

        if returned == 0 || returned < page_size {
            break;
        }
        match next_id {
            Some(id) => request.scroll_id = Some(id),
            None => break,
        }
    }

    Ok(match sink {
        ScrollSink::Memory => {
            info!(documents = documents.len(), "scroll finished");
            ScrollOutput::Documents(documents)
        }
        ScrollSink::Directory(_) => {
            info!(files = files.len(), "scroll finished");
            ScrollOutput::Files(files)
        }
    })
}

async fn write_page(dir: &Path, page: &ScholarResponse) -> Result<PathBuf, ClientError> {
    let path = dir.join(page_file_name());
    let body = serde_json::to_string_pretty(page).map_err(|e| ClientError::ParseError {
        message: e.to_string(),
    })?;
    tokio::fs::write(&path, body).await?;
    Ok(path)
}

/// `scroll_data_<unix seconds>_<4 hex>.json`
fn page_file_name() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "scroll_data_{}_{}.json",
        chrono::Utc::now().timestamp(),
        &suffix[..4]
    )
}

fn abbreviate(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 20 {
        return id.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 10..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_file_name_shape() {
        let name = page_file_name();
        let stem = name
            .strip_prefix("scroll_data_")
            .and_then(|s| s.strip_suffix(".json"))
            .unwrap();
        let (ts, suffix) = stem.split_once('_').unwrap();
        assert!(ts.parse::<i64>().unwrap() > 0);
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("short"), "short");
        assert_eq!(
            abbreviate("0123456789abcdefghijKLMNOPQRST"),
            "0123456789...KLMNOPQRST"
        );
    }
}
