//! Query documents: a whole query as one JSON object.
//!
//! ```json
//! {
//!   "general": {"title": ["must", "match_phrase", "machine learning"]},
//!   "range": {"year_published": ["filter", {"gte": "2019", "lte": "2021"}]}
//! }
//! ```
//!
//! Keys name groups, values are that group's field arguments. Groups are
//! merged in key order.

use serde_json::Value;

use crate::error::{QueryError, Result};
use crate::group::QueryGroup;
use crate::merge::{merge, CombinedQuery};

pub fn groups_from_value(document: &Value) -> Result<Vec<QueryGroup>> {
    let groups = document
        .as_object()
        .ok_or_else(|| QueryError::Document("top level must be an object of groups".into()))?;

    groups
        .iter()
        .map(|(name, args)| {
            let args = args.as_object().ok_or_else(|| {
                QueryError::Document(format!("arguments for group '{}' must be an object", name))
            })?;
            QueryGroup::from_name(name, args)
        })
        .collect()
}

pub fn parse_document(text: &str) -> Result<Vec<QueryGroup>> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| QueryError::Document(e.to_string()))?;
    groups_from_value(&document)
}

/// Parse a document and merge its groups.
pub fn build_document(text: &str) -> Result<CombinedQuery> {
    let groups = parse_document(text)?;
    Ok(merge(&groups))
}
