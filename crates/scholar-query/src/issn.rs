//! ISSN normalization for `source_issn` values.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::error::{QueryError, Result};

lazy_static! {
    // Seven digits followed by a digit or check character, hyphen already removed
    static ref ISSN_PATTERN: Regex = Regex::new(r"^\d{7}[0-9x]$").unwrap();
}

/// Strip hyphens, lower-case, and check the `NNNNNNNC` shape.
///
/// `"1234-567X"` becomes `"1234567x"`.
pub fn normalize_issn(issn: &str) -> Result<String> {
    let normalized = issn.trim().replace('-', "").to_lowercase();
    if ISSN_PATTERN.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(QueryError::InvalidIssnFormat {
            value: issn.to_string(),
        })
    }
}

/// Normalize a string value, or each string element of a list.
///
/// Values that do not look like an ISSN are passed through unchanged with a
/// warning; non-string values are left for the type check to reject.
pub fn normalize_issn_value(field: &str, value: &Value) -> Value {
    match value {
        Value::String(s) => match normalize_issn(s) {
            Ok(normalized) => Value::String(normalized),
            Err(err) => {
                warn!(field, error = %err, "keeping unnormalized ISSN");
                value.clone()
            }
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| normalize_issn_value(field, item))
                .collect(),
        ),
        other => other.clone(),
    }
}
