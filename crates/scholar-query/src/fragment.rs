//! Query fragments and the per-clause buckets they accumulate in.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::clause::{BoolClause, ClauseKind};

/// What a fragment matches against its field.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Scalar or list value of a term/terms/match/match_phrase query.
    Value(Value),
    /// Bounds of a range query, in the order the caller supplied them.
    Range(Map<String, Value>),
}

impl Payload {
    pub fn to_value(&self) -> Value {
        match self {
            Payload::Value(v) => v.clone(),
            Payload::Range(bounds) => Value::Object(bounds.clone()),
        }
    }
}

/// One leaf or range query, serialized as `{kind: {wire_name: payload}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFragment {
    pub kind: ClauseKind,
    pub wire_name: String,
    pub payload: Payload,
}

impl QueryFragment {
    pub fn new(kind: ClauseKind, wire_name: impl Into<String>, payload: Payload) -> Self {
        Self {
            kind,
            wire_name: wire_name.into(),
            payload,
        }
    }

    pub fn to_value(&self) -> Value {
        let mut inner = Map::new();
        inner.insert(self.wire_name.clone(), self.payload.to_value());
        let mut outer = Map::new();
        outer.insert(self.kind.as_str().to_string(), Value::Object(inner));
        Value::Object(outer)
    }

    /// Read a fragment back from its serialized form.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let (kind, inner) = single_entry(value).ok_or("fragment must be a single-key object")?;
        let kind = ClauseKind::parse(kind).ok_or_else(|| format!("unknown query kind '{}'", kind))?;
        let (wire_name, payload) =
            single_entry(inner).ok_or("fragment body must be a single-key object")?;
        let payload = match (kind, payload) {
            (ClauseKind::Range, Value::Object(bounds)) => Payload::Range(bounds.clone()),
            (ClauseKind::Range, _) => return Err("range bounds must be an object".to_string()),
            (_, other) => Payload::Value(other.clone()),
        };
        Ok(Self::new(kind, wire_name, payload))
    }
}

fn single_entry(value: &Value) -> Option<(&String, &Value)> {
    match value {
        Value::Object(map) if map.len() == 1 => map.iter().next(),
        _ => None,
    }
}

impl Serialize for QueryFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Fragments produced by one group, bucketed by boolean clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccumulatedOutput {
    pub must: Vec<QueryFragment>,
    pub should: Vec<QueryFragment>,
    pub must_not: Vec<QueryFragment>,
    pub filter: Vec<QueryFragment>,
}

impl AccumulatedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, clause: BoolClause) -> &[QueryFragment] {
        match clause {
            BoolClause::Must => &self.must,
            BoolClause::Should => &self.should,
            BoolClause::MustNot => &self.must_not,
            BoolClause::Filter => &self.filter,
        }
    }

    fn bucket_mut(&mut self, clause: BoolClause) -> &mut Vec<QueryFragment> {
        match clause {
            BoolClause::Must => &mut self.must,
            BoolClause::Should => &mut self.should,
            BoolClause::MustNot => &mut self.must_not,
            BoolClause::Filter => &mut self.filter,
        }
    }

    pub fn push(&mut self, clause: BoolClause, fragment: QueryFragment) {
        self.bucket_mut(clause).push(fragment);
    }

    pub fn len(&self) -> usize {
        BoolClause::ALL.iter().map(|c| self.bucket(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read an output back from `{must, should, must_not, filter}`.
    ///
    /// Missing buckets are treated as empty; any other key is rejected.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let map = value.as_object().ok_or("expected an object of clause lists")?;
        let mut output = Self::new();
        for (key, fragments) in map {
            let clause =
                BoolClause::parse(key).ok_or_else(|| format!("unknown boolean clause '{}'", key))?;
            let fragments = fragments
                .as_array()
                .ok_or_else(|| format!("'{}' must be a list of fragments", key))?;
            for fragment in fragments {
                output.push(clause, QueryFragment::from_value(fragment)?);
            }
        }
        Ok(output)
    }
}
