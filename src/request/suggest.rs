//! Suggester specifications: term, completion, and phrase

use serde::{Deserialize, Serialize};

use super::query::FieldPath;

/// Default suggester name for the term suggester section
pub const DEFAULT_TERM_SUGGEST_NAME: &str = "termSuggest";
/// Default suggester name for the completion suggester section
pub const DEFAULT_COMPLETION_SUGGEST_NAME: &str = "completionSuggest";
/// Default suggester name for the phrase suggester section
pub const DEFAULT_PHRASE_SUGGEST_NAME: &str = "phraseSuggest";

/// Which terms the suggester considers for corrections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestMode {
    Missing,
    Popular,
    Always,
}

/// String distance metric for candidate ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringDistance {
    Internal,
    DamerauLevenshtein,
    Levenshtein,
    JaroWinkler,
    Ngram,
}

/// Ordering of term suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestSort {
    Score,
    Frequency,
}

/// Up to one suggester of each kind; the kinds are mutually independent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestSpec {
    pub term: Option<TermSuggestSpec>,
    pub completion: Option<CompletionSuggestSpec>,
    pub phrase: Option<PhraseSuggestSpec>,
}

impl SuggestSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_term(mut self, term: TermSuggestSpec) -> Self {
        self.term = Some(term);
        self
    }

    pub fn with_completion(mut self, completion: CompletionSuggestSpec) -> Self {
        self.completion = Some(completion);
        self
    }

    pub fn with_phrase(mut self, phrase: PhraseSuggestSpec) -> Self {
        self.phrase = Some(phrase);
        self
    }
}

/// Typo-correction suggester.
///
/// The suggester is only compiled when `field` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermSuggestSpec {
    /// Section key in the compiled suggest block; defaults to "termSuggest"
    pub name: Option<String>,
    pub field: Option<FieldPath>,
    pub text: Option<String>,
    pub analyzer: Option<String>,
    pub lowercase_terms: Option<bool>,
    pub max_edits: Option<u32>,
    pub max_inspections: Option<u32>,
    pub max_term_freq: Option<f64>,
    pub min_doc_freq: Option<f64>,
    pub min_word_length: Option<u32>,
    pub prefix_length: Option<u32>,
    pub shard_size: Option<u32>,
    pub size: Option<u32>,
    pub suggest_mode: Option<SuggestMode>,
    pub sort: Option<SuggestSort>,
    pub string_distance: Option<StringDistance>,
}

impl TermSuggestSpec {
    pub fn new(field: impl Into<FieldPath>, text: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn with_lowercase_terms(mut self, enabled: bool) -> Self {
        self.lowercase_terms = Some(enabled);
        self
    }

    pub fn with_max_edits(mut self, max: u32) -> Self {
        self.max_edits = Some(max);
        self
    }

    pub fn with_max_inspections(mut self, max: u32) -> Self {
        self.max_inspections = Some(max);
        self
    }

    pub fn with_max_term_freq(mut self, freq: f64) -> Self {
        self.max_term_freq = Some(freq);
        self
    }

    pub fn with_min_doc_freq(mut self, freq: f64) -> Self {
        self.min_doc_freq = Some(freq);
        self
    }

    pub fn with_min_word_length(mut self, length: u32) -> Self {
        self.min_word_length = Some(length);
        self
    }

    pub fn with_prefix_length(mut self, length: u32) -> Self {
        self.prefix_length = Some(length);
        self
    }

    pub fn with_shard_size(mut self, size: u32) -> Self {
        self.shard_size = Some(size);
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_suggest_mode(mut self, mode: SuggestMode) -> Self {
        self.suggest_mode = Some(mode);
        self
    }

    pub fn with_sort(mut self, sort: SuggestSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_string_distance(mut self, distance: StringDistance) -> Self {
        self.string_distance = Some(distance);
        self
    }
}

/// Fuzziness specification for completion suggestions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fuzziness {
    /// Edit distance derived from term length
    Auto,
    /// Auto with explicit low/high term-length thresholds
    AutoRange(u32, u32),
    /// Fixed maximum edit distance
    Distance(u32),
}

/// Fuzzy-matching sub-configuration of the completion suggester
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionFuzzySpec {
    pub fuzziness: Option<Fuzziness>,
    pub min_length: Option<u32>,
    pub prefix_length: Option<u32>,
    pub transpositions: Option<bool>,
    pub unicode_aware: Option<bool>,
}

impl CompletionFuzzySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fuzziness(mut self, fuzziness: Fuzziness) -> Self {
        self.fuzziness = Some(fuzziness);
        self
    }

    pub fn with_min_length(mut self, length: u32) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn with_prefix_length(mut self, length: u32) -> Self {
        self.prefix_length = Some(length);
        self
    }

    pub fn with_transpositions(mut self, enabled: bool) -> Self {
        self.transpositions = Some(enabled);
        self
    }

    pub fn with_unicode_aware(mut self, enabled: bool) -> Self {
        self.unicode_aware = Some(enabled);
        self
    }
}

/// One named context filter of the completion suggester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionContextSpec {
    /// Context mapping name this filter applies to
    pub name: String,
    pub context: Option<String>,
    pub boost: Option<f64>,
    pub prefix: Option<bool>,
    pub precision: Option<u32>,
}

impl CompletionContextSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: None,
            boost: None,
            prefix: None,
            precision: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn with_prefix(mut self, prefix: bool) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }
}

/// Prefix/regex completion suggester
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionSuggestSpec {
    /// Section key in the compiled suggest block; defaults to
    /// "completionSuggest"
    pub name: Option<String>,
    pub field: Option<FieldPath>,
    pub prefix: Option<String>,
    pub regex: Option<String>,
    pub analyzer: Option<String>,
    pub size: Option<u32>,
    pub skip_duplicates: Option<bool>,
    pub fuzzy: Option<CompletionFuzzySpec>,
    /// Zero or more named context filters, compiled independently
    pub contexts: Vec<CompletionContextSpec>,
}

impl CompletionSuggestSpec {
    pub fn new(field: impl Into<FieldPath>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = Some(regex.into());
        self
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_skip_duplicates(mut self, enabled: bool) -> Self {
        self.skip_duplicates = Some(enabled);
        self
    }

    pub fn with_fuzzy(mut self, fuzzy: CompletionFuzzySpec) -> Self {
        self.fuzzy = Some(fuzzy);
        self
    }

    pub fn with_context(mut self, context: CompletionContextSpec) -> Self {
        self.contexts.push(context);
        self
    }
}

/// Templated collation query applied to phrase suggestions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhraseCollateQuerySpec {
    /// Stored template id
    pub id: Option<String>,
    /// Inline template source
    pub source: Option<String>,
}

/// Collation settings pruning phrase suggestions that match no documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhraseCollateSpec {
    pub query: PhraseCollateQuerySpec,
    pub params: Option<serde_json::Map<String, serde_json::Value>>,
    pub prune: Option<bool>,
}

impl PhraseCollateSpec {
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            query: PhraseCollateQuerySpec {
                id: None,
                source: Some(source.into()),
            },
            params: None,
            prune: None,
        }
    }

    pub fn with_template_id(id: impl Into<String>) -> Self {
        Self {
            query: PhraseCollateQuerySpec {
                id: Some(id.into()),
                source: None,
            },
            params: None,
            prune: None,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value);
        self
    }

    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = Some(prune);
        self
    }
}

/// Candidate generator override for the phrase suggester
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectGeneratorSpec {
    pub field: Option<FieldPath>,
    pub max_edits: Option<u32>,
    pub max_inspections: Option<f64>,
    pub max_term_freq: Option<f64>,
    pub min_doc_freq: Option<f64>,
    pub min_word_length: Option<u32>,
    pub pre_filter: Option<String>,
    pub post_filter: Option<String>,
    pub prefix_length: Option<u32>,
    pub size: Option<u32>,
    pub suggest_mode: Option<SuggestMode>,
}

impl DirectGeneratorSpec {
    pub fn new(field: impl Into<FieldPath>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    pub fn with_max_edits(mut self, max: u32) -> Self {
        self.max_edits = Some(max);
        self
    }

    pub fn with_max_inspections(mut self, max: f64) -> Self {
        self.max_inspections = Some(max);
        self
    }

    pub fn with_max_term_freq(mut self, freq: f64) -> Self {
        self.max_term_freq = Some(freq);
        self
    }

    pub fn with_min_doc_freq(mut self, freq: f64) -> Self {
        self.min_doc_freq = Some(freq);
        self
    }

    pub fn with_min_word_length(mut self, length: u32) -> Self {
        self.min_word_length = Some(length);
        self
    }

    pub fn with_pre_filter(mut self, filter: impl Into<String>) -> Self {
        self.pre_filter = Some(filter.into());
        self
    }

    pub fn with_post_filter(mut self, filter: impl Into<String>) -> Self {
        self.post_filter = Some(filter.into());
        self
    }

    pub fn with_prefix_length(mut self, length: u32) -> Self {
        self.prefix_length = Some(length);
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_suggest_mode(mut self, mode: SuggestMode) -> Self {
        self.suggest_mode = Some(mode);
        self
    }
}

/// Snippet markers around corrected parts of a phrase suggestion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhraseHighlightSpec {
    pub pre_tag: Option<String>,
    pub post_tag: Option<String>,
}

impl PhraseHighlightSpec {
    pub fn new(pre_tag: impl Into<String>, post_tag: impl Into<String>) -> Self {
        Self {
            pre_tag: Some(pre_tag.into()),
            post_tag: Some(post_tag.into()),
        }
    }
}

/// Smoothing model for n-gram scoring; exactly one variant is chosen.
///
/// A variant whose parameter is unset still compiles to a (default-valued)
/// smoothing block rather than omitting the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SmoothingSpec {
    Laplace {
        alpha: Option<f64>,
    },
    LinearInterpolation {
        trigram_lambda: Option<f64>,
        bigram_lambda: Option<f64>,
        unigram_lambda: Option<f64>,
    },
    StupidBackoff {
        discount: Option<f64>,
    },
}

/// N-gram phrase correction suggester
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhraseSuggestSpec {
    /// Section key in the compiled suggest block; defaults to
    /// "phraseSuggest"
    pub name: Option<String>,
    pub field: Option<FieldPath>,
    pub text: Option<String>,
    pub analyzer: Option<String>,
    pub size: Option<u32>,
    pub shard_size: Option<u32>,
    pub confidence: Option<f64>,
    pub gram_size: Option<u32>,
    pub max_errors: Option<f64>,
    pub real_word_error_likelihood: Option<f64>,
    pub separator: Option<char>,
    pub token_limit: Option<u32>,
    pub force_unigrams: Option<bool>,
    pub highlight: Option<PhraseHighlightSpec>,
    pub collate: Option<PhraseCollateSpec>,
    pub direct_generator: Option<DirectGeneratorSpec>,
    pub smoothing: Option<SmoothingSpec>,
}

impl PhraseSuggestSpec {
    pub fn new(field: impl Into<FieldPath>, text: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_shard_size(mut self, size: u32) -> Self {
        self.shard_size = Some(size);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_gram_size(mut self, size: u32) -> Self {
        self.gram_size = Some(size);
        self
    }

    pub fn with_max_errors(mut self, max: f64) -> Self {
        self.max_errors = Some(max);
        self
    }

    pub fn with_real_word_error_likelihood(mut self, likelihood: f64) -> Self {
        self.real_word_error_likelihood = Some(likelihood);
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    pub fn with_token_limit(mut self, limit: u32) -> Self {
        self.token_limit = Some(limit);
        self
    }

    pub fn with_force_unigrams(mut self, enabled: bool) -> Self {
        self.force_unigrams = Some(enabled);
        self
    }

    pub fn with_highlight(mut self, highlight: PhraseHighlightSpec) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn with_collate(mut self, collate: PhraseCollateSpec) -> Self {
        self.collate = Some(collate);
        self
    }

    pub fn with_direct_generator(mut self, generator: DirectGeneratorSpec) -> Self {
        self.direct_generator = Some(generator);
        self
    }

    pub fn with_smoothing(mut self, smoothing: SmoothingSpec) -> Self {
        self.smoothing = Some(smoothing);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_spec_kinds_independent() {
        let spec = SuggestSpec::new().with_term(TermSuggestSpec::new("name", "reprot"));
        assert!(spec.term.is_some());
        assert!(spec.completion.is_none());
        assert!(spec.phrase.is_none());
    }

    #[test]
    fn test_completion_contexts_accumulate() {
        let spec = CompletionSuggestSpec::new("name.suggest")
            .with_context(CompletionContextSpec::new("place").with_boost(2.0))
            .with_context(CompletionContextSpec::new("kind"));
        assert_eq!(spec.contexts.len(), 2);
        assert_eq!(spec.contexts[0].name, "place");
    }

    #[test]
    fn test_collate_params() {
        let collate = PhraseCollateSpec::with_source("{\"match\": {\"{{field}}\": \"{{suggestion}}\"}}")
            .with_param("field", serde_json::json!("name"))
            .with_prune(true);
        assert_eq!(collate.params.as_ref().unwrap().len(), 1);
        assert_eq!(collate.prune, Some(true));
    }
}
