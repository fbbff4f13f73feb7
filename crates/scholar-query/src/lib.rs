//! scholar-query: schema-checked boolean query construction for the Lens
//! Scholar API.
//!
//! Callers describe a search as directives on named fields, grouped by field
//! group (`GENERAL`, `AUTHOR`, `RANGE`, ...). Each group checks its directives
//! against a static field table and produces fragments bucketed by boolean
//! clause; the merger concatenates groups into one `{"bool": {...}}` query.
//!
//! # Directives
//!
//! - standard groups: `[bool_clause, query_clause, value]`, e.g.
//!   `["must", "match_phrase", "machine learning"]`
//! - `RANGE`: `[bool_clause, {gte?, gt?, lte?, lt?}]`
//! - `BOOLEAN_FILTERS`: `[bool_clause, bool]`; `filter` yields a `term`
//!   query, any other clause a `match`
//!
//! A field argument may also be a list of directives.
//!
//! ```
//! use scholar_query::{merge, QueryGroup};
//! use serde_json::json;
//!
//! let general = QueryGroup::general(
//!     json!({"title": ["must", "match_phrase", "machine learning"]})
//!         .as_object()
//!         .unwrap(),
//! )
//! .unwrap();
//! let query = merge([&general]);
//! assert_eq!(
//!     query.to_value(),
//!     json!({"bool": {"must": [{"match_phrase": {"title": "machine learning"}}]}})
//! );
//! ```

pub mod builder;
pub mod clause;
pub mod document;
pub mod error;
mod fields;
pub mod fragment;
pub mod group;
pub mod issn;
pub mod merge;
pub mod schema;
pub mod validators;

pub use builder::{build_boolean_filter, build_range, build_standard, ClauseBuilder};
pub use clause::*;
pub use document::{build_document, groups_from_value, parse_document};
pub use error::{ErrorKind, QueryError, Result};
pub use fragment::*;
pub use group::*;
pub use issn::{normalize_issn, normalize_issn_value};
pub use merge::{merge, BoolQuery, CombinedQuery, QueryBuilder};
pub use schema::*;
