//! Merging group outputs into one boolean query.

use serde::Serialize;
use serde_json::Value;

use crate::clause::BoolClause;
use crate::error::{QueryError, Result};
use crate::fragment::{AccumulatedOutput, QueryFragment};
use crate::group::QueryGroup;

/// The `bool` body; empty clause lists are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<QueryFragment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<QueryFragment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<QueryFragment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<QueryFragment>,
}

impl BoolQuery {
    pub fn clause(&self, clause: BoolClause) -> &[QueryFragment] {
        match clause {
            BoolClause::Must => &self.must,
            BoolClause::Should => &self.should,
            BoolClause::MustNot => &self.must_not,
            BoolClause::Filter => &self.filter,
        }
    }

    pub fn is_empty(&self) -> bool {
        BoolClause::ALL.iter().all(|c| self.clause(*c).is_empty())
    }
}

/// `{"bool": {...}}`, the value of a search request's `query` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombinedQuery {
    #[serde(rename = "bool")]
    pub bool_query: BoolQuery,
}

impl CombinedQuery {
    pub fn to_value(&self) -> Value {
        // Serializing fragments and string-keyed structs cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<CombinedQuery> for Value {
    fn from(query: CombinedQuery) -> Self {
        query.to_value()
    }
}

/// Concatenates group outputs clause by clause, in the order added.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: BoolQuery,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, group: &QueryGroup) -> &mut Self {
        self.add_output(group.output())
    }

    pub fn add_output(&mut self, output: &AccumulatedOutput) -> &mut Self {
        self.query.must.extend_from_slice(&output.must);
        self.query.should.extend_from_slice(&output.should);
        self.query.must_not.extend_from_slice(&output.must_not);
        self.query.filter.extend_from_slice(&output.filter);
        self
    }

    pub fn build(&self) -> CombinedQuery {
        CombinedQuery {
            bool_query: self.query.clone(),
        }
    }

    pub fn from_outputs<'a, I>(outputs: I) -> CombinedQuery
    where
        I: IntoIterator<Item = &'a AccumulatedOutput>,
    {
        let mut builder = Self::new();
        for output in outputs {
            builder.add_output(output);
        }
        builder.build()
    }

    /// Merge serialized group outputs.
    ///
    /// Each element must be a `{must, should, must_not, filter}` object of
    /// fragment lists; anything else fails with
    /// [`QueryError::InvalidQueryObject`] naming its position.
    pub fn from_json_outputs(outputs: &[Value]) -> Result<CombinedQuery> {
        let mut builder = Self::new();
        for (index, value) in outputs.iter().enumerate() {
            let output = AccumulatedOutput::from_value(value)
                .map_err(|reason| QueryError::InvalidQueryObject { index, reason })?;
            builder.add_output(&output);
        }
        Ok(builder.build())
    }
}

/// Merge groups in order.
pub fn merge<'a, I>(groups: I) -> CombinedQuery
where
    I: IntoIterator<Item = &'a QueryGroup>,
{
    QueryBuilder::from_outputs(groups.into_iter().map(QueryGroup::output))
}
