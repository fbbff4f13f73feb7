//! Query groups.
//!
//! A [`QueryGroup`] is built from one group tag and a `{field: argument}`
//! mapping. An argument is either a single directive (`["must", "match", "x"]`)
//! or a list of directives (`[["must", ...], ["should", ...]]`). Construction
//! is all-or-nothing: the first invalid directive aborts the group.

use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::builder::ClauseBuilder;
use crate::clause::{BoolClause, QueryClause, RangeBound};
use crate::error::{QueryError, Result};
use crate::fragment::AccumulatedOutput;
use crate::issn::normalize_issn_value;
use crate::schema::{resolve, DirectiveShape, FieldDefinition, GroupTag, Normalizer};
use crate::validators::validate_field;

/// Field name to directive (or list of directives).
pub type FieldArgs = Map<String, Value>;

/// The validated output of one field group.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryGroup {
    tag: GroupTag,
    output: AccumulatedOutput,
}

impl QueryGroup {
    /// Build a group from dynamic arguments.
    ///
    /// Every key must name a field of the group. Fields are processed in the
    /// group's declaration order; `null` and `[]` arguments are skipped.
    pub fn new(tag: GroupTag, args: &FieldArgs) -> Result<Self> {
        let schema = tag.schema();
        for field in args.keys() {
            validate_field(field, &schema)?;
        }

        let mut builder = ClauseBuilder::new();
        for def in schema.fields() {
            if let Some(argument) = args.get(def.name) {
                add_argument(&mut builder, schema.shape(), def, argument)?;
            }
        }

        let output = builder.finish();
        debug!(group = %tag, fragments = output.len(), "built query group");
        Ok(Self { tag, output })
    }

    /// Build a group named by a string tag such as `"AUTHOR"` or `"open_access"`.
    pub fn from_name(group: &str, args: &FieldArgs) -> Result<Self> {
        Self::new(resolve(group)?.tag(), args)
    }

    pub fn from_pairs<I, K, V>(tag: GroupTag, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let args: FieldArgs = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(tag, &args)
    }

    pub fn tag(&self) -> GroupTag {
        self.tag
    }

    pub fn output(&self) -> &AccumulatedOutput {
        &self.output
    }

    pub fn into_output(self) -> AccumulatedOutput {
        self.output
    }
}

macro_rules! group_constructors {
    ($($name:ident => $tag:ident),* $(,)?) => {
        impl QueryGroup {
            $(
                #[doc = concat!("Build a `", stringify!($tag), "` group.")]
                pub fn $name(args: &FieldArgs) -> Result<Self> {
                    Self::new(GroupTag::$tag, args)
                }
            )*
        }
    };
}

group_constructors! {
    general => General,
    retraction => Retraction,
    author => Author,
    citation => Citation,
    external_id => ExternalId,
    source => Source,
    subject_matter => SubjectMatter,
    institutions => Institutions,
    funding => Funding,
    conferences => Conferences,
    clinical_trials => ClinicalTrials,
    open_access => OpenAccess,
    date => Date,
    boolean_filters => BooleanFilters,
    range => Range,
}

fn add_argument(
    builder: &mut ClauseBuilder,
    shape: DirectiveShape,
    def: &FieldDefinition,
    argument: &Value,
) -> Result<()> {
    let field = def.name;
    let items = match argument {
        Value::Null => return Ok(()),
        Value::Array(items) if items.is_empty() => return Ok(()),
        Value::Array(items) => items,
        other => {
            return Err(QueryError::InvalidArgumentShape {
                field: field.to_string(),
                value: other.clone(),
            })
        }
    };

    if items[0].is_array() {
        debug!(field, directives = items.len(), "processing multiple directives");
        for item in items {
            let directive = item
                .as_array()
                .ok_or_else(|| QueryError::InvalidArgumentShape {
                    field: field.to_string(),
                    value: item.clone(),
                })?;
            add_directive(builder, shape, def, directive)?;
        }
        Ok(())
    } else {
        trace!(field, "processing single directive");
        add_directive(builder, shape, def, items)
    }
}

fn add_directive(
    builder: &mut ClauseBuilder,
    shape: DirectiveShape,
    def: &FieldDefinition,
    directive: &[Value],
) -> Result<()> {
    let directive = normalize(shape, def, directive);
    builder.add(shape, def.name, def, &directive)
}

fn normalize<'a>(
    shape: DirectiveShape,
    def: &FieldDefinition,
    directive: &'a [Value],
) -> Cow<'a, [Value]> {
    match (shape, def.normalizer, directive) {
        (DirectiveShape::Standard, Some(Normalizer::Issn), [clause, query, value]) => {
            Cow::Owned(vec![
                clause.clone(),
                query.clone(),
                normalize_issn_value(def.name, value),
            ])
        }
        _ => Cow::Borrowed(directive),
    }
}

/// A typed directive, convertible into the dynamic argument form.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Standard {
        clause: BoolClause,
        query: QueryClause,
        value: Value,
    },
    Range {
        clause: BoolClause,
        bounds: Map<String, Value>,
    },
    BooleanFilter {
        clause: BoolClause,
        value: bool,
    },
}

impl Directive {
    pub fn standard(clause: BoolClause, query: QueryClause, value: impl Into<Value>) -> Self {
        Directive::Standard {
            clause,
            query,
            value: value.into(),
        }
    }

    /// Range directive; bounds keep the order given.
    pub fn range<I, V>(clause: BoolClause, bounds: I) -> Self
    where
        I: IntoIterator<Item = (RangeBound, V)>,
        V: Into<Value>,
    {
        Directive::Range {
            clause,
            bounds: bounds
                .into_iter()
                .map(|(bound, value)| (bound.as_str().to_string(), value.into()))
                .collect(),
        }
    }

    pub fn boolean(clause: BoolClause, value: bool) -> Self {
        Directive::BooleanFilter { clause, value }
    }

    pub fn clause(&self) -> BoolClause {
        match self {
            Directive::Standard { clause, .. }
            | Directive::Range { clause, .. }
            | Directive::BooleanFilter { clause, .. } => *clause,
        }
    }
}

impl From<Directive> for Value {
    fn from(directive: Directive) -> Self {
        match directive {
            Directive::Standard {
                clause,
                query,
                value,
            } => Value::Array(vec![clause.as_str().into(), query.as_str().into(), value]),
            Directive::Range { clause, bounds } => {
                Value::Array(vec![clause.as_str().into(), Value::Object(bounds)])
            }
            Directive::BooleanFilter { clause, value } => {
                Value::Array(vec![clause.as_str().into(), Value::Bool(value)])
            }
        }
    }
}

/// Collects typed directives per field before building a group.
///
/// Adding a second directive to the same field turns its argument into a
/// directive list.
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    tag: GroupTag,
    args: FieldArgs,
}

impl GroupBuilder {
    pub fn new(tag: GroupTag) -> Self {
        Self {
            tag,
            args: FieldArgs::new(),
        }
    }

    pub fn directive(mut self, field: &str, directive: Directive) -> Self {
        let directive = Value::from(directive);
        match self.args.get_mut(field) {
            Some(Value::Array(existing)) if existing.first().is_some_and(Value::is_array) => {
                existing.push(directive);
            }
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, directive]);
            }
            None => {
                self.args.insert(field.to_string(), directive);
            }
        }
        self
    }

    pub fn args(&self) -> &FieldArgs {
        &self.args
    }

    pub fn build(self) -> Result<QueryGroup> {
        QueryGroup::new(self.tag, &self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn args(value: Value) -> FieldArgs {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn single_and_multiple_directives() {
        let group = QueryGroup::author(&args(json!({
            "author_last_name": [
                ["must", "match", "Curie"],
                ["should", "match", "Joliot"]
            ],
            "author_count": ["filter", "term", 2]
        })))
        .unwrap();
        let output = group.output();
        assert_eq!(output.must.len(), 1);
        assert_eq!(output.should.len(), 1);
        assert_eq!(
            output.filter[0].to_value(),
            json!({"term": {"author_count": 2}})
        );
    }

    #[test]
    fn declaration_order_wins_over_argument_order() {
        let group = QueryGroup::date(&args(json!({
            "created": ["must", "term", "2020-01-01"],
            "year_published": ["must", "term", 2019]
        })))
        .unwrap();
        let wires: Vec<_> = group.output().must.iter().map(|f| f.wire_name.as_str()).collect();
        assert_eq!(wires, vec!["year_published", "created"]);
    }

    #[test]
    fn unknown_field_rejected_before_processing() {
        let err = QueryGroup::general(&args(json!({
            "title": ["must", "fuzzy", "x"],
            "subtitle": ["must", "match", "x"]
        })))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownField);
        assert_eq!(err.field(), Some("subtitle"));
    }

    #[test]
    fn empty_arguments_are_skipped() {
        let group = QueryGroup::general(&args(json!({"title": null, "abstract": []}))).unwrap();
        assert!(group.output().is_empty());
    }

    #[test]
    fn non_list_arguments_rejected() {
        let err = QueryGroup::general(&args(json!({"title": "machine learning"}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentShape);

        let err = QueryGroup::general(&args(json!({
            "title": [["must", "match", "a"], "should"]
        })))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentShape);
    }

    #[test]
    fn one_bad_directive_aborts_group() {
        let err = QueryGroup::external_id(&args(json!({
            "doi": [
                ["must", "term", "10.1000/x"],
                ["must", "term"]
            ]
        })))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectiveArityMismatch);
    }

    #[test]
    fn from_name_resolves_tag() {
        let group =
            QueryGroup::from_name("boolean_filters", &args(json!({"has_orcid": ["filter", true]})))
                .unwrap();
        assert_eq!(group.tag(), GroupTag::BooleanFilters);
        assert!(QueryGroup::from_name("PATENT", &FieldArgs::new()).is_err());
    }

    #[test]
    fn issn_normalized_in_lists() {
        let group = QueryGroup::source(&args(json!({
            "source_issn": [
                ["must", "term", "0028-0836"],
                ["should", "terms", ["1476-4687", "1234-567X"]]
            ]
        })))
        .unwrap();
        assert_eq!(
            group.output().must[0].to_value(),
            json!({"term": {"source.issn": "00280836"}})
        );
        assert_eq!(
            group.output().should[0].to_value(),
            json!({"terms": {"source.issn": ["14764687", "1234567x"]}})
        );
    }

    #[test]
    fn group_builder_collects_directives() {
        let group = GroupBuilder::new(GroupTag::General)
            .directive(
                "title",
                Directive::standard(BoolClause::Must, QueryClause::Match, "graphene"),
            )
            .directive(
                "title",
                Directive::standard(BoolClause::MustNot, QueryClause::Match, "oxide"),
            )
            .directive(
                "title",
                Directive::standard(BoolClause::Should, QueryClause::MatchPhrase, "thin film"),
            )
            .build()
            .unwrap();
        assert_eq!(group.output().len(), 3);

        let range = GroupBuilder::new(GroupTag::Range)
            .directive(
                "author_count",
                Directive::range(BoolClause::Filter, [(RangeBound::Gte, 2), (RangeBound::Lt, 10)]),
            )
            .build()
            .unwrap();
        assert_eq!(
            range.output().filter[0].to_value(),
            json!({"range": {"author_count": {"gte": 2, "lt": 10}}})
        );
    }

    #[test]
    fn directive_into_value() {
        let value = Value::from(Directive::boolean(BoolClause::Filter, true));
        assert_eq!(value, json!(["filter", true]));
        assert_eq!(Directive::boolean(BoolClause::Must, false).clause(), BoolClause::Must);
    }
}
