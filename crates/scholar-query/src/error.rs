//! Error types for query construction.
//!
//! Every failure is immediate: a single bad directive aborts construction of the
//! group it belongs to. Variants carry the offending field and value so the
//! message can be shown to a user as is.

use serde_json::Value;
use thiserror::Error;

use crate::schema::{DateFormat, GroupTag, TypeTag};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Field group {group} is not available")]
    UnknownGroup { group: String },

    #[error("Invalid field: {field}. Must be one of {accepted:?} in group {group}")]
    UnknownField {
        field: String,
        group: GroupTag,
        accepted: Vec<&'static str>,
    },

    #[error("Invalid value for {field}: {value}. Must be a list")]
    InvalidArgumentShape { field: String, value: Value },

    #[error("Invalid number of arguments for {field}: {value}. Must have {expected} arguments")]
    DirectiveArityMismatch {
        field: String,
        value: Value,
        expected: usize,
    },

    #[error("Invalid condition type for {field}: {value}. Must be one of must, should, must_not, filter")]
    ClauseNotAllowed { field: String, value: Value },

    #[error("Invalid query type for {field}: {value}. Must be one of term, terms, match, match_phrase")]
    QueryKindNotAllowed { field: String, value: Value },

    #[error("Invalid value for {field}: {value}. A {query_clause} query needs {expected}")]
    TermShapeMismatch {
        field: String,
        query_clause: String,
        value: Value,
        expected: &'static str,
    },

    #[error("Invalid value for {field}: {value}. Must be of type {expected}")]
    TypeMismatch {
        field: String,
        value: Value,
        expected: TypeTag,
    },

    #[error("Invalid value for {field}: {value}. Must be one of {allowed:?}")]
    ValueNotAllowed {
        field: String,
        value: Value,
        allowed: &'static [&'static str],
    },

    #[error("Invalid value for {field}: {value}. Must be in the format {format}")]
    DateFormatInvalid {
        field: String,
        value: Value,
        format: DateFormat,
    },

    #[error("Invalid value for {field}: {value}. For range queries, value must be a mapping")]
    RangePayloadNotAMapping { field: String, value: Value },

    #[error("Invalid range key for {field}: {key}. Must be one of gte, gt, lte, lt")]
    RangeKeyNotAllowed { field: String, key: String },

    #[error("Invalid value for {field}: {value}. Must have only one of '{first}' or '{second}'")]
    RangeBoundConflict {
        field: String,
        first: &'static str,
        second: &'static str,
        value: Value,
    },

    #[error("Invalid value for {field}: gt/e -> {lower}, lt/e -> {upper}. {reason}")]
    RangeOrderInvalid {
        field: String,
        lower: Value,
        upper: Value,
        reason: &'static str,
    },

    #[error("Invalid query object at position {index}: {reason}")]
    InvalidQueryObject { index: usize, reason: String },

    #[error("Invalid ISSN format: {value}")]
    InvalidIssnFormat { value: String },

    #[error("Invalid query document: {0}")]
    Document(String),
}

/// Result type alias for query construction.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Fieldless discriminant of [`QueryError`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownGroup,
    UnknownField,
    InvalidArgumentShape,
    DirectiveArityMismatch,
    ClauseNotAllowed,
    QueryKindNotAllowed,
    TermShapeMismatch,
    TypeMismatch,
    ValueNotAllowed,
    DateFormatInvalid,
    RangePayloadNotAMapping,
    RangeKeyNotAllowed,
    RangeBoundConflict,
    RangeOrderInvalid,
    InvalidQueryObject,
    InvalidIssnFormat,
    Document,
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::UnknownGroup { .. } => ErrorKind::UnknownGroup,
            QueryError::UnknownField { .. } => ErrorKind::UnknownField,
            QueryError::InvalidArgumentShape { .. } => ErrorKind::InvalidArgumentShape,
            QueryError::DirectiveArityMismatch { .. } => ErrorKind::DirectiveArityMismatch,
            QueryError::ClauseNotAllowed { .. } => ErrorKind::ClauseNotAllowed,
            QueryError::QueryKindNotAllowed { .. } => ErrorKind::QueryKindNotAllowed,
            QueryError::TermShapeMismatch { .. } => ErrorKind::TermShapeMismatch,
            QueryError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            QueryError::ValueNotAllowed { .. } => ErrorKind::ValueNotAllowed,
            QueryError::DateFormatInvalid { .. } => ErrorKind::DateFormatInvalid,
            QueryError::RangePayloadNotAMapping { .. } => ErrorKind::RangePayloadNotAMapping,
            QueryError::RangeKeyNotAllowed { .. } => ErrorKind::RangeKeyNotAllowed,
            QueryError::RangeBoundConflict { .. } => ErrorKind::RangeBoundConflict,
            QueryError::RangeOrderInvalid { .. } => ErrorKind::RangeOrderInvalid,
            QueryError::InvalidQueryObject { .. } => ErrorKind::InvalidQueryObject,
            QueryError::InvalidIssnFormat { .. } => ErrorKind::InvalidIssnFormat,
            QueryError::Document(_) => ErrorKind::Document,
        }
    }

    /// Field the error is about, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            QueryError::UnknownField { field, .. }
            | QueryError::InvalidArgumentShape { field, .. }
            | QueryError::DirectiveArityMismatch { field, .. }
            | QueryError::ClauseNotAllowed { field, .. }
            | QueryError::QueryKindNotAllowed { field, .. }
            | QueryError::TermShapeMismatch { field, .. }
            | QueryError::TypeMismatch { field, .. }
            | QueryError::ValueNotAllowed { field, .. }
            | QueryError::DateFormatInvalid { field, .. }
            | QueryError::RangePayloadNotAMapping { field, .. }
            | QueryError::RangeKeyNotAllowed { field, .. }
            | QueryError::RangeBoundConflict { field, .. }
            | QueryError::RangeOrderInvalid { field, .. } => Some(field),
            QueryError::UnknownGroup { .. }
            | QueryError::InvalidQueryObject { .. }
            | QueryError::InvalidIssnFormat { .. }
            | QueryError::Document(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn messages_name_field_and_value() {
        let err = QueryError::TypeMismatch {
            field: "author_count".into(),
            value: json!("three"),
            expected: TypeTag::Integer,
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for author_count: \"three\". Must be of type integer"
        );
        assert_eq!(err.field(), Some("author_count"));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn date_format_message() {
        let err = QueryError::DateFormatInvalid {
            field: "date_published".into(),
            value: json!("2021/01/01"),
            format: DateFormat::YearMonthDay,
        };
        assert!(err.to_string().ends_with("Must be in the format YYYY-MM-DD"));
    }

    #[test]
    fn group_level_errors_have_no_field() {
        let err = QueryError::UnknownGroup {
            group: "PATENT".into(),
        };
        assert_eq!(err.field(), None);
        assert_eq!(err.to_string(), "Field group PATENT is not available");
    }
}
