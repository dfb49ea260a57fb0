//! Match query specification

use serde::{Deserialize, Serialize};

/// Canonical field path within an indexed document.
///
/// Resolved once per document type and never reinterpreted per request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Boolean operator applied between analyzed query terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    And,
    Or,
}

/// Behavior when the analyzer removes all terms from the query text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroTermsQuery {
    All,
    None,
}

/// Query specification; currently one concrete form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QuerySpec {
    Match(MatchQuerySpec),
}

impl QuerySpec {
    pub fn match_query(spec: MatchQuerySpec) -> Self {
        Self::Match(spec)
    }
}

/// A match query on a single field.
///
/// Each tuning parameter is independently optional; absence means the engine
/// default applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchQuerySpec {
    pub field: FieldPath,
    pub text: String,
    pub analyzer: Option<String>,
    pub operator: Option<Operator>,
    pub fuzzy_transpositions: Option<bool>,
    pub lenient: Option<bool>,
    pub max_expansions: Option<u32>,
    pub prefix_length: Option<u32>,
    pub zero_terms_query: Option<ZeroTermsQuery>,
    pub auto_generate_synonyms_phrase_query: Option<bool>,
}

impl MatchQuerySpec {
    /// Create a match query for the given field and query text
    pub fn new(field: impl Into<FieldPath>, text: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
            analyzer: None,
            operator: None,
            fuzzy_transpositions: None,
            lenient: None,
            max_expansions: None,
            prefix_length: None,
            zero_terms_query: None,
            auto_generate_synonyms_phrase_query: None,
        }
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn with_fuzzy_transpositions(mut self, enabled: bool) -> Self {
        self.fuzzy_transpositions = Some(enabled);
        self
    }

    pub fn with_lenient(mut self, enabled: bool) -> Self {
        self.lenient = Some(enabled);
        self
    }

    pub fn with_max_expansions(mut self, max: u32) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_prefix_length(mut self, length: u32) -> Self {
        self.prefix_length = Some(length);
        self
    }

    pub fn with_zero_terms_query(mut self, behavior: ZeroTermsQuery) -> Self {
        self.zero_terms_query = Some(behavior);
        self
    }

    pub fn with_auto_generate_synonyms_phrase_query(mut self, enabled: bool) -> Self {
        self.auto_generate_synonyms_phrase_query = Some(enabled);
        self
    }
}
