//! Typed search request model
//!
//! Immutable value types describing a search request: an optional match
//! query, an optional highlight configuration, and an optional set of
//! suggesters. Every optional concern left unset is absent from the compiled
//! engine request entirely, leaving the engine default in effect.

mod highlight;
mod query;
mod suggest;

pub use highlight::{
    BoundaryScanner, HighlightFieldSpec, HighlightSpec, HighlighterEncoder, HighlighterFragmenter,
    HighlighterOrder, HighlighterTagsSchema, HighlighterType,
};
pub use query::{FieldPath, MatchQuerySpec, Operator, QuerySpec, ZeroTermsQuery};
pub use suggest::{
    CompletionContextSpec, CompletionFuzzySpec, CompletionSuggestSpec, DirectGeneratorSpec,
    Fuzziness, PhraseCollateQuerySpec, PhraseCollateSpec, PhraseHighlightSpec, PhraseSuggestSpec,
    SmoothingSpec, SuggestMode, SuggestSort, SuggestSpec, StringDistance, TermSuggestSpec,
    DEFAULT_COMPLETION_SUGGEST_NAME, DEFAULT_PHRASE_SUGGEST_NAME, DEFAULT_TERM_SUGGEST_NAME,
};

use serde::{Deserialize, Serialize};

/// Root container of a search request.
///
/// Any section left unset means "no configuration for this concern" and has
/// zero effect on the sibling sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: Option<QuerySpec>,
    pub highlight: Option<HighlightSpec>,
    pub suggest: Option<SuggestSpec>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: QuerySpec) -> Self {
        self.query = Some(query);
        self
    }

    /// Convenience shorthand for the common single-match-query case
    pub fn with_match(self, spec: MatchQuerySpec) -> Self {
        self.with_query(QuerySpec::Match(spec))
    }

    pub fn with_highlight(mut self, highlight: HighlightSpec) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn with_suggest(mut self, suggest: SuggestSpec) -> Self {
        self.suggest = Some(suggest);
        self
    }
}
