//! scholar-client: transport for queries built with `scholar-query`.
//!
//! Wraps the Lens Scholar search, usage and record endpoints behind the
//! [`SearchService`] trait, and scrolls large result sets into memory or
//! into a directory of page files.

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod scroll;
pub mod service;

pub use client::ScholarClient;
pub use config::ScholarConfig;
pub use error::{ClientError, ConfigError};
pub use request::{ScholarResponse, SearchRequest};
pub use scroll::{scroll_all, ScrollOutput, ScrollSink};
pub use service::SearchService;
