//! Clause builders.
//!
//! One builder per directive shape. Each runs its validators in a fixed order,
//! first failure wins, and on success yields the parsed boolean clause together
//! with the fragment to file under it.

use serde_json::{Map, Value};

use crate::clause::{BoolClause, ClauseKind, RangeBound};
use crate::error::Result;
use crate::fragment::{AccumulatedOutput, Payload, QueryFragment};
use crate::schema::{DirectiveShape, FieldDefinition, TypeTag};
use crate::validators::{
    validate_bool_clause, validate_date_format, validate_directive_arity,
    validate_exclusive_bounds, validate_query_clause, validate_range_keys,
    validate_range_mapping, validate_range_order, validate_term_shape, validate_value_restriction,
    validate_value_type,
};

/// `[bool_clause, query_clause, value]` on a standard field.
pub fn build_standard(
    field: &str,
    def: &FieldDefinition,
    bool_clause: &Value,
    query_clause: &Value,
    value: &Value,
) -> Result<(BoolClause, QueryFragment)> {
    let bool_clause = validate_bool_clause(field, bool_clause)?;
    let query_clause = validate_query_clause(field, query_clause)?;
    validate_term_shape(field, query_clause, value)?;
    validate_value_type(field, value, def.accepted_type)?;
    validate_value_restriction(field, value, def.allowed_values)?;
    if let Some(format) = def.date_format {
        for item in strings(value) {
            validate_date_format(field, item, format)?;
        }
    }

    let fragment = QueryFragment::new(
        query_clause.into(),
        def.wire_name,
        Payload::Value(value.clone()),
    );
    Ok((bool_clause, fragment))
}

/// `[bool_clause, {gte?, gt?, lte?, lt?}]` on a range field.
pub fn build_range(
    field: &str,
    def: &FieldDefinition,
    directive: &[Value],
) -> Result<(BoolClause, QueryFragment)> {
    let [bool_clause, bounds] = validate_directive_arity::<2>(field, directive)?;
    let bool_clause = validate_bool_clause(field, bool_clause)?;
    let bounds = validate_range_mapping(field, bounds)?;
    validate_range_keys(field, bounds)?;
    validate_exclusive_bounds(field, bounds, RangeBound::Gte, RangeBound::Gt)?;
    validate_exclusive_bounds(field, bounds, RangeBound::Lte, RangeBound::Lt)?;

    if let Some(format) = def.date_format {
        for bound in bounds.values() {
            validate_date_format(field, bound, format)?;
        }
    }

    if let (Some(lower), Some(upper)) = (lower_bound(bounds), upper_bound(bounds)) {
        validate_range_order(field, lower, upper)?;
    }

    let fragment = QueryFragment::new(ClauseKind::Range, def.wire_name, Payload::Range(bounds.clone()));
    Ok((bool_clause, fragment))
}

/// `[bool_clause, bool]` on a boolean filter field.
///
/// A `filter` clause becomes a `term` query, every other clause a `match`.
pub fn build_boolean_filter(
    field: &str,
    def: &FieldDefinition,
    directive: &[Value],
) -> Result<(BoolClause, QueryFragment)> {
    let [bool_clause, value] = validate_directive_arity::<2>(field, directive)?;
    let bool_clause = validate_bool_clause(field, bool_clause)?;
    validate_value_type(field, value, TypeTag::Boolean)?;

    let kind = match bool_clause {
        BoolClause::Filter => ClauseKind::Term,
        _ => ClauseKind::Match,
    };
    let fragment = QueryFragment::new(kind, def.wire_name, Payload::Value(value.clone()));
    Ok((bool_clause, fragment))
}

fn lower_bound(bounds: &Map<String, Value>) -> Option<&Value> {
    bounds
        .get(RangeBound::Gte.as_str())
        .or_else(|| bounds.get(RangeBound::Gt.as_str()))
}

fn upper_bound(bounds: &Map<String, Value>) -> Option<&Value> {
    bounds
        .get(RangeBound::Lte.as_str())
        .or_else(|| bounds.get(RangeBound::Lt.as_str()))
}

fn strings(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().filter(|v| v.is_string()).collect(),
        Value::String(_) => vec![value],
        _ => Vec::new(),
    }
}

/// Accumulates the fragments of one group into its four clause buckets.
#[derive(Debug, Default)]
pub struct ClauseBuilder {
    output: AccumulatedOutput,
}

impl ClauseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one directive against `shape` and file the resulting fragment.
    pub fn add(
        &mut self,
        shape: DirectiveShape,
        field: &str,
        def: &FieldDefinition,
        directive: &[Value],
    ) -> Result<()> {
        let (bool_clause, fragment) = match shape {
            DirectiveShape::Standard => {
                let [bool_clause, query_clause, value] =
                    validate_directive_arity::<3>(field, directive)?;
                build_standard(field, def, bool_clause, query_clause, value)?
            }
            DirectiveShape::Range => build_range(field, def, directive)?,
            DirectiveShape::BooleanFilter => build_boolean_filter(field, def, directive)?,
        };
        self.output.push(bool_clause, fragment);
        Ok(())
    }

    pub fn output(&self) -> &AccumulatedOutput {
        &self.output
    }

    pub fn finish(self) -> AccumulatedOutput {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::GroupTag;
    use serde_json::json;

    fn def(group: GroupTag, name: &str) -> &'static FieldDefinition {
        group.schema().get(name).unwrap()
    }

    fn array(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap()
    }

    #[test]
    fn standard_uses_wire_name() {
        let def = def(GroupTag::Source, "source_title_exact");
        let (clause, fragment) = build_standard(
            "source_title_exact",
            def,
            &json!("should"),
            &json!("term"),
            &json!("Nature"),
        )
        .unwrap();
        assert_eq!(clause, BoolClause::Should);
        assert_eq!(fragment.to_value(), json!({"term": {"source.title.exact": "Nature"}}));
    }

    #[test]
    fn standard_order_clause_before_kind() {
        let def = def(GroupTag::General, "title");
        let err = build_standard("title", def, &json!("nope"), &json!("fuzzy"), &json!(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ClauseNotAllowed);
        let err = build_standard("title", def, &json!("must"), &json!("fuzzy"), &json!(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QueryKindNotAllowed);
        let err = build_standard("title", def, &json!("must"), &json!("terms"), &json!(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TermShapeMismatch);
        let err = build_standard("title", def, &json!("must"), &json!("term"), &json!(1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn standard_checks_vocabulary_and_dates() {
        let def_type = def(GroupTag::General, "publication_type");
        let err = build_standard(
            "publication_type",
            def_type,
            &json!("filter"),
            &json!("terms"),
            &json!(["preprint", "blog post"]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueNotAllowed);

        let def_date = def(GroupTag::Date, "date_published");
        let err = build_standard(
            "date_published",
            def_date,
            &json!("must"),
            &json!("term"),
            &json!("2021/01/01"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DateFormatInvalid);

        let def_year = def(GroupTag::Date, "year_published");
        assert!(build_standard(
            "year_published",
            def_year,
            &json!("must"),
            &json!("term"),
            &json!(2020)
        )
        .is_ok());
    }

    #[test]
    fn range_keeps_bounds() {
        let def = def(GroupTag::Range, "referenced_by_patent_count");
        let (clause, fragment) = build_range(
            "referenced_by_patent_count",
            def,
            &array(json!(["must", {"gt": 0}])),
        )
        .unwrap();
        assert_eq!(clause, BoolClause::Must);
        assert_eq!(
            fragment.to_value(),
            json!({"range": {"referenced_by_patent.count": {"gt": 0}}})
        );
    }

    #[test]
    fn range_failure_order() {
        let def = def(GroupTag::Range, "date_published");
        let cases = [
            (json!(["must"]), ErrorKind::DirectiveArityMismatch),
            (json!(["sometimes", {}]), ErrorKind::ClauseNotAllowed),
            (json!(["must", "2020-01-01"]), ErrorKind::RangePayloadNotAMapping),
            (json!(["must", {"after": "2020-01-01"}]), ErrorKind::RangeKeyNotAllowed),
            (
                json!(["must", {"gte": "bad", "gt": "2020-01-01"}]),
                ErrorKind::RangeBoundConflict,
            ),
            (
                json!(["must", {"lte": "bad", "lt": "2020-01-01"}]),
                ErrorKind::RangeBoundConflict,
            ),
            (json!(["must", {"gte": "2020"}]), ErrorKind::DateFormatInvalid),
            (
                json!(["must", {"gt": "2021-01-01", "lt": "2020-01-01"}]),
                ErrorKind::RangeOrderInvalid,
            ),
        ];
        for (directive, expected) in cases {
            let err = build_range("date_published", def, &array(directive.clone())).unwrap_err();
            assert_eq!(err.kind(), expected, "{directive}");
        }
    }

    #[test]
    fn range_allows_one_sided_and_empty() {
        let def = def(GroupTag::Range, "author_count");
        assert!(build_range("author_count", def, &array(json!(["filter", {"lte": 3}]))).is_ok());
        assert!(build_range("author_count", def, &array(json!(["filter", {}]))).is_ok());
    }

    #[test]
    fn boolean_filter_asymmetry() {
        let def = def(GroupTag::BooleanFilters, "is_open_access");
        let (_, filter) =
            build_boolean_filter("is_open_access", def, &array(json!(["filter", true]))).unwrap();
        assert_eq!(filter.kind, ClauseKind::Term);
        let (_, must) =
            build_boolean_filter("is_open_access", def, &array(json!(["must", true]))).unwrap();
        assert_eq!(must.kind, ClauseKind::Match);
        let err = build_boolean_filter("is_open_access", def, &array(json!(["must", "yes"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn clause_builder_buckets_in_order() {
        let def = def(GroupTag::Author, "author_last_name");
        let mut builder = ClauseBuilder::new();
        for (clause, name) in [("must", "Curie"), ("must_not", "Bohr"), ("must", "Meitner")] {
            builder
                .add(
                    DirectiveShape::Standard,
                    "author_last_name",
                    def,
                    &array(json!([clause, "match", name])),
                )
                .unwrap();
        }
        let output = builder.finish();
        assert_eq!(
            serde_json::to_value(&output.must).unwrap(),
            json!([
                {"match": {"author.last_name": "Curie"}},
                {"match": {"author.last_name": "Meitner"}}
            ])
        );
        assert_eq!(output.must_not.len(), 1);
        assert!(output.filter.is_empty());
    }

    #[test]
    fn clause_builder_checks_standard_arity() {
        let def = def(GroupTag::Author, "author_count");
        let mut builder = ClauseBuilder::new();
        let err = builder
            .add(
                DirectiveShape::Standard,
                "author_count",
                def,
                &array(json!(["must", "term"])),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectiveArityMismatch);
        assert!(builder.output().is_empty());
    }
}
