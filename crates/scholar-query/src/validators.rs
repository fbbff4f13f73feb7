//! Directive validators.
//!
//! Each function checks one structural rule and either returns normally or
//! fails with the matching [`QueryError`]. None of them has side effects; the
//! clause builder composes them in a fixed order.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::clause::{BoolClause, QueryClause, RangeBound};
use crate::error::{QueryError, Result};
use crate::schema::{DateFormat, FieldDefinition, FieldSchema, TypeTag};

/// Resolve `field` in `schema`.
pub fn validate_field(field: &str, schema: &FieldSchema) -> Result<&'static FieldDefinition> {
    schema.get(field).ok_or_else(|| QueryError::UnknownField {
        field: field.to_string(),
        group: schema.tag(),
        accepted: schema.field_names(),
    })
}

/// Check that a directive has exactly `N` elements.
pub fn validate_directive_arity<'a, const N: usize>(
    field: &str,
    directive: &'a [Value],
) -> Result<&'a [Value; N]> {
    directive
        .try_into()
        .map_err(|_| QueryError::DirectiveArityMismatch {
            field: field.to_string(),
            value: Value::Array(directive.to_vec()),
            expected: N,
        })
}

pub fn validate_bool_clause(field: &str, value: &Value) -> Result<BoolClause> {
    value
        .as_str()
        .and_then(BoolClause::parse)
        .ok_or_else(|| QueryError::ClauseNotAllowed {
            field: field.to_string(),
            value: value.clone(),
        })
}

pub fn validate_query_clause(field: &str, value: &Value) -> Result<QueryClause> {
    value
        .as_str()
        .and_then(QueryClause::parse)
        .ok_or_else(|| QueryError::QueryKindNotAllowed {
            field: field.to_string(),
            value: value.clone(),
        })
}

/// `terms` needs a list; `term`, `match` and `match_phrase` need a single value.
pub fn validate_term_shape(field: &str, query_clause: QueryClause, value: &Value) -> Result<()> {
    let expected = match (query_clause.expects_list(), value.is_array()) {
        (true, false) => "a list",
        (false, true) => "a single value",
        _ => return Ok(()),
    };
    Err(QueryError::TermShapeMismatch {
        field: field.to_string(),
        query_clause: query_clause.to_string(),
        value: value.clone(),
        expected,
    })
}

/// Check a value, or every element of a list, against the field's type.
pub fn validate_value_type(field: &str, value: &Value, accepted: TypeTag) -> Result<()> {
    for item in elements(value) {
        if !accepted.accepts(item) {
            return Err(QueryError::TypeMismatch {
                field: field.to_string(),
                value: item.clone(),
                expected: accepted,
            });
        }
    }
    Ok(())
}

/// Check string values, or every string element of a list, against a closed vocabulary.
pub fn validate_value_restriction(
    field: &str,
    value: &Value,
    allowed: Option<&'static [&'static str]>,
) -> Result<()> {
    let Some(allowed) = allowed else {
        return Ok(());
    };
    for item in elements(value) {
        if let Some(s) = item.as_str() {
            if !allowed.contains(&s) {
                return Err(QueryError::ValueNotAllowed {
                    field: field.to_string(),
                    value: item.clone(),
                    allowed,
                });
            }
        }
    }
    Ok(())
}

/// Check that `value` is a string parsing under `format`.
pub fn validate_date_format(field: &str, value: &Value, format: DateFormat) -> Result<()> {
    match value.as_str() {
        Some(s) if format.parses(s) => Ok(()),
        _ => Err(QueryError::DateFormatInvalid {
            field: field.to_string(),
            value: value.clone(),
            format,
        }),
    }
}

pub fn validate_range_mapping<'a>(field: &str, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| QueryError::RangePayloadNotAMapping {
            field: field.to_string(),
            value: value.clone(),
        })
}

pub fn validate_range_keys(field: &str, bounds: &Map<String, Value>) -> Result<()> {
    match bounds.keys().find(|k| RangeBound::parse(k).is_none()) {
        Some(key) => Err(QueryError::RangeKeyNotAllowed {
            field: field.to_string(),
            key: key.clone(),
        }),
        None => Ok(()),
    }
}

/// At most one of two mutually exclusive bounds (`gte`/`gt` or `lte`/`lt`).
pub fn validate_exclusive_bounds(
    field: &str,
    bounds: &Map<String, Value>,
    first: RangeBound,
    second: RangeBound,
) -> Result<()> {
    match (bounds.get(first.as_str()), bounds.get(second.as_str())) {
        (Some(a), Some(b)) => Err(QueryError::RangeBoundConflict {
            field: field.to_string(),
            first: first.as_str(),
            second: second.as_str(),
            value: Value::Array(vec![a.clone(), b.clone()]),
        }),
        _ => Ok(()),
    }
}

/// Lower bound must not exceed upper bound.
///
/// Strings compare lexically (dates in a fixed format sort correctly),
/// numbers numerically. Bounds of different kinds cannot be ordered.
pub fn validate_range_order(field: &str, lower: &Value, upper: &Value) -> Result<()> {
    let reason = match compare_bounds(lower, upper) {
        Some(Ordering::Greater) => "gt/e must be less than lt/e",
        Some(_) => return Ok(()),
        None => "bounds are not comparable",
    };
    Err(QueryError::RangeOrderInvalid {
        field: field.to_string(),
        lower: lower.clone(),
        upper: upper.clone(),
        reason,
    })
}

fn compare_bounds(lower: &Value, upper: &Value) -> Option<Ordering> {
    match (lower, upper) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
        },
        _ => None,
    }
}

fn elements(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        other => Box::new(std::iter::once(other)),
    }
}
