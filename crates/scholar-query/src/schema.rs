//! Field schema definitions and group lookup.
//!
//! Every searchable field belongs to exactly one group. A group binds a static
//! table of [`FieldDefinition`]s to the directive shape its fields accept, so
//! one generic builder can process every group.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::error::{QueryError, Result};
use crate::fields;

/// Value type a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    String,
    Integer,
    Boolean,
}

impl TypeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Integer => "integer",
            TypeTag::Boolean => "boolean",
        }
    }

    /// Check a single (non-list) value against this tag.
    ///
    /// Integers must be whole JSON numbers; booleans never count as integers.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (TypeTag::String, Value::String(_)) => true,
            (TypeTag::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (TypeTag::Boolean, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar format a date-typed field's string values must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    YearMonthDay,
    /// `YYYY`
    Year,
}

impl DateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::YearMonthDay => "YYYY-MM-DD",
            DateFormat::Year => "YYYY",
        }
    }

    /// Whether `input` is a valid date under this exact format.
    ///
    /// The year is always four digits, from 0001 to 9999.
    pub fn parses(&self, input: &str) -> bool {
        match self {
            DateFormat::Year => is_four_digit_year(input),
            DateFormat::YearMonthDay => {
                let year_ok = input.split('-').next().is_some_and(is_four_digit_year);
                year_ok && NaiveDate::parse_from_str(input, "%Y-%m-%d").is_ok()
            }
        }
    }
}

fn is_four_digit_year(input: &str) -> bool {
    input.len() == 4
        && input.bytes().all(|b| b.is_ascii_digit())
        && input
            .parse::<i32>()
            .ok()
            .filter(|&year| year >= 1)
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .is_some()
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-validation rewrite applied to a field's values before the directive is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalizer {
    /// Strip hyphens and lower-case a `NNNNNNNC` ISSN.
    Issn,
}

/// Directive shape a group's fields accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveShape {
    /// `[bool_clause, query_clause, value]`
    Standard,
    /// `[bool_clause, {gte?, gt?, lte?, lt?}]`
    Range,
    /// `[bool_clause, bool]`
    BooleanFilter,
}

impl DirectiveShape {
    pub fn arity(&self) -> usize {
        match self {
            DirectiveShape::Standard => 3,
            DirectiveShape::Range | DirectiveShape::BooleanFilter => 2,
        }
    }
}

/// One searchable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Public name used as the argument key.
    pub name: &'static str,
    /// Name the search service expects; may contain dots.
    pub wire_name: &'static str,
    pub accepted_type: TypeTag,
    /// Closed vocabulary, if the field has one.
    pub allowed_values: Option<&'static [&'static str]>,
    pub date_format: Option<DateFormat>,
    pub normalizer: Option<Normalizer>,
}

impl FieldDefinition {
    pub const fn new(name: &'static str, wire_name: &'static str, accepted_type: TypeTag) -> Self {
        Self {
            name,
            wire_name,
            accepted_type,
            allowed_values: None,
            date_format: None,
            normalizer: None,
        }
    }

    pub const fn text(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, TypeTag::String)
    }

    pub const fn integer(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, TypeTag::Integer)
    }

    pub const fn boolean(name: &'static str, wire_name: &'static str) -> Self {
        Self::new(name, wire_name, TypeTag::Boolean)
    }

    pub const fn allowed(self, values: &'static [&'static str]) -> Self {
        Self {
            allowed_values: Some(values),
            ..self
        }
    }

    pub const fn date(self, format: DateFormat) -> Self {
        Self {
            date_format: Some(format),
            ..self
        }
    }

    pub const fn normalized(self, normalizer: Normalizer) -> Self {
        Self {
            normalizer: Some(normalizer),
            ..self
        }
    }
}

/// Group tag naming one field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupTag {
    General,
    Retraction,
    Author,
    Citation,
    ExternalId,
    Source,
    SubjectMatter,
    Institutions,
    Funding,
    Conferences,
    ClinicalTrials,
    OpenAccess,
    Date,
    BooleanFilters,
    Range,
}

impl GroupTag {
    pub const ALL: [GroupTag; 15] = [
        GroupTag::General,
        GroupTag::Retraction,
        GroupTag::Author,
        GroupTag::Citation,
        GroupTag::ExternalId,
        GroupTag::Source,
        GroupTag::SubjectMatter,
        GroupTag::Institutions,
        GroupTag::Funding,
        GroupTag::Conferences,
        GroupTag::ClinicalTrials,
        GroupTag::OpenAccess,
        GroupTag::Date,
        GroupTag::BooleanFilters,
        GroupTag::Range,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupTag::General => "GENERAL",
            GroupTag::Retraction => "RETRACTION",
            GroupTag::Author => "AUTHOR",
            GroupTag::Citation => "CITATION",
            GroupTag::ExternalId => "EXTERNAL_ID",
            GroupTag::Source => "SOURCE",
            GroupTag::SubjectMatter => "SUBJECT_MATTER",
            GroupTag::Institutions => "INSTITUTIONS",
            GroupTag::Funding => "FUNDING",
            GroupTag::Conferences => "CONFERENCES",
            GroupTag::ClinicalTrials => "CLINICAL_TRIALS",
            GroupTag::OpenAccess => "OPEN_ACCESS",
            GroupTag::Date => "DATE",
            GroupTag::BooleanFilters => "BOOLEAN_FILTERS",
            GroupTag::Range => "RANGE",
        }
    }

    /// Parse a group tag. Accepts `EXTERNAL_ID`, `external_id` and `external-id`.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL.into_iter().find(|g| g.as_str() == normalized)
    }

    pub fn shape(&self) -> DirectiveShape {
        match self {
            GroupTag::Range => DirectiveShape::Range,
            GroupTag::BooleanFilters => DirectiveShape::BooleanFilter,
            _ => DirectiveShape::Standard,
        }
    }

    pub fn schema(&self) -> FieldSchema {
        let fields = match self {
            GroupTag::General => fields::GENERAL,
            GroupTag::Retraction => fields::RETRACTION,
            GroupTag::Author => fields::AUTHOR,
            GroupTag::Citation => fields::CITATION,
            GroupTag::ExternalId => fields::EXTERNAL_ID,
            GroupTag::Source => fields::SOURCE,
            GroupTag::SubjectMatter => fields::SUBJECT_MATTER,
            GroupTag::Institutions => fields::INSTITUTIONS,
            GroupTag::Funding => fields::FUNDING,
            GroupTag::Conferences => fields::CONFERENCES,
            GroupTag::ClinicalTrials => fields::CLINICAL_TRIALS,
            GroupTag::OpenAccess => fields::OPEN_ACCESS,
            GroupTag::Date => fields::DATE,
            GroupTag::BooleanFilters => fields::BOOLEAN_FILTERS,
            GroupTag::Range => fields::RANGE,
        };
        FieldSchema { tag: *self, fields }
    }
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only field table for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    tag: GroupTag,
    fields: &'static [FieldDefinition],
}

impl FieldSchema {
    pub fn tag(&self) -> GroupTag {
        self.tag
    }

    pub fn shape(&self) -> DirectiveShape {
        self.tag.shape()
    }

    /// Fields in declaration order; this is also the order a group processes them in.
    pub fn fields(&self) -> &'static [FieldDefinition] {
        self.fields
    }

    pub fn get(&self, name: &str) -> Option<&'static FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

/// Look up the field table registered under `group`.
pub fn resolve(group: &str) -> Result<FieldSchema> {
    GroupTag::parse(group)
        .map(|tag| tag.schema())
        .ok_or_else(|| QueryError::UnknownGroup {
            group: group.to_string(),
        })
}
