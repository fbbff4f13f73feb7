//! Boolean and leaf clause vocabularies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean clause a fragment is filed under in the combined `bool` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolClause {
    Must,
    Should,
    MustNot,
    Filter,
}

impl BoolClause {
    /// All clauses in the order they appear in a combined query.
    pub const ALL: [BoolClause; 4] = [
        BoolClause::Must,
        BoolClause::Should,
        BoolClause::MustNot,
        BoolClause::Filter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoolClause::Must => "must",
            BoolClause::Should => "should",
            BoolClause::MustNot => "must_not",
            BoolClause::Filter => "filter",
        }
    }

    /// Parse the wire spelling. Matching is exact: `"Must"` is rejected.
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == input)
    }
}

impl fmt::Display for BoolClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leaf query kind a standard directive asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryClause {
    Term,
    Terms,
    Match,
    MatchPhrase,
}

impl QueryClause {
    pub const ALL: [QueryClause; 4] = [
        QueryClause::Term,
        QueryClause::Terms,
        QueryClause::Match,
        QueryClause::MatchPhrase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryClause::Term => "term",
            QueryClause::Terms => "terms",
            QueryClause::Match => "match",
            QueryClause::MatchPhrase => "match_phrase",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == input)
    }

    /// `terms` takes a list of values; every other kind takes a single value.
    pub fn expects_list(&self) -> bool {
        matches!(self, QueryClause::Terms)
    }
}

impl fmt::Display for QueryClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of an emitted fragment: a leaf query kind or `range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    Term,
    Terms,
    Match,
    MatchPhrase,
    Range,
}

impl ClauseKind {
    pub const ALL: [ClauseKind; 5] = [
        ClauseKind::Term,
        ClauseKind::Terms,
        ClauseKind::Match,
        ClauseKind::MatchPhrase,
        ClauseKind::Range,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseKind::Term => "term",
            ClauseKind::Terms => "terms",
            ClauseKind::Match => "match",
            ClauseKind::MatchPhrase => "match_phrase",
            ClauseKind::Range => "range",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == input)
    }
}

impl From<QueryClause> for ClauseKind {
    fn from(clause: QueryClause) -> Self {
        match clause {
            QueryClause::Term => ClauseKind::Term,
            QueryClause::Terms => ClauseKind::Terms,
            QueryClause::Match => ClauseKind::Match,
            QueryClause::MatchPhrase => ClauseKind::MatchPhrase,
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bound keys accepted inside a range directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeBound {
    Gte,
    Gt,
    Lte,
    Lt,
}

impl RangeBound {
    pub const ALL: [RangeBound; 4] = [
        RangeBound::Gte,
        RangeBound::Gt,
        RangeBound::Lte,
        RangeBound::Lt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RangeBound::Gte => "gte",
            RangeBound::Gt => "gt",
            RangeBound::Lte => "lte",
            RangeBound::Lt => "lt",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == input)
    }

    pub fn is_lower(&self) -> bool {
        matches!(self, RangeBound::Gte | RangeBound::Gt)
    }
}
