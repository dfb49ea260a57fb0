//! Pure translation of the typed request model into the engine's native
//! JSON query body.
//!
//! Compilation never fails: malformed input (e.g. a match query with an
//! empty field path) produces an under-specified body that the engine
//! rejects at execution time, surfaced as a query error by the client.
//!
//! Every domain enum is mapped to its engine wire string through an
//! exhaustive match; the compiler is the single owner of these translation
//! tables.

use serde_json::{Map, Value};

use crate::request::{
    BoundaryScanner, CompletionContextSpec, CompletionFuzzySpec, CompletionSuggestSpec,
    DirectGeneratorSpec, Fuzziness, HighlightFieldSpec, HighlightSpec, HighlighterEncoder,
    HighlighterFragmenter, HighlighterOrder, HighlighterTagsSchema, HighlighterType,
    MatchQuerySpec, Operator, PhraseCollateSpec, PhraseSuggestSpec, QuerySpec, SearchRequest,
    SmoothingSpec, StringDistance, SuggestMode, SuggestSort, SuggestSpec, TermSuggestSpec,
    ZeroTermsQuery, DEFAULT_COMPLETION_SUGGEST_NAME, DEFAULT_PHRASE_SUGGEST_NAME,
    DEFAULT_TERM_SUGGEST_NAME,
};

/// Compile a search request into the engine's native query body.
///
/// A section left unset on the request is absent from the body entirely;
/// absence of one section has zero effect on its siblings.
pub fn compile(request: &SearchRequest) -> Value {
    let mut body = Map::new();

    if let Some(query) = &request.query {
        body.insert("query".to_string(), compile_query(query));
    }
    if let Some(highlight) = &request.highlight {
        body.insert("highlight".to_string(), compile_highlight(highlight));
    }
    if let Some(suggest) = &request.suggest {
        body.insert("suggest".to_string(), compile_suggest(suggest));
    }

    Value::Object(body)
}

/// Insert `key` only when the value is set; unset parameters stay absent so
/// the engine default applies.
fn set<T: Into<Value>>(obj: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        obj.insert(key.to_string(), value.into());
    }
}

fn compile_query(query: &QuerySpec) -> Value {
    match query {
        QuerySpec::Match(spec) => compile_match(spec),
    }
}

fn compile_match(spec: &MatchQuerySpec) -> Value {
    let mut params = Map::new();
    params.insert("query".to_string(), Value::from(spec.text.as_str()));
    set(&mut params, "analyzer", spec.analyzer.as_deref());
    set(&mut params, "operator", spec.operator.map(Operator::as_wire));
    set(
        &mut params,
        "fuzzy_transpositions",
        spec.fuzzy_transpositions,
    );
    set(&mut params, "lenient", spec.lenient);
    set(&mut params, "max_expansions", spec.max_expansions);
    set(&mut params, "prefix_length", spec.prefix_length);
    set(
        &mut params,
        "zero_terms_query",
        spec.zero_terms_query.map(ZeroTermsQuery::as_wire),
    );
    set(
        &mut params,
        "auto_generate_synonyms_phrase_query",
        spec.auto_generate_synonyms_phrase_query,
    );

    let mut clause = Map::new();
    clause.insert(spec.field.as_str().to_string(), Value::Object(params));

    let mut query = Map::new();
    query.insert("match".to_string(), Value::Object(clause));
    Value::Object(query)
}

fn compile_highlight(spec: &HighlightSpec) -> Value {
    let mut obj = Map::new();

    // One tag marks both sides of a snippet
    if let Some(tag) = &spec.tag {
        obj.insert("pre_tags".to_string(), Value::from(vec![tag.as_str()]));
        obj.insert("post_tags".to_string(), Value::from(vec![tag.as_str()]));
    }
    set(
        &mut obj,
        "encoder",
        spec.encoder.map(HighlighterEncoder::as_wire),
    );
    set(&mut obj, "boundary_chars", spec.boundary_chars.as_deref());
    set(&mut obj, "boundary_max_scan", spec.boundary_max_scan);
    set(
        &mut obj,
        "boundary_scanner",
        spec.boundary_scanner.map(BoundaryScanner::as_wire),
    );
    set(
        &mut obj,
        "boundary_scanner_locale",
        spec.boundary_scanner_locale.as_deref(),
    );
    set(
        &mut obj,
        "fragmenter",
        spec.fragmenter.map(HighlighterFragmenter::as_wire),
    );
    set(&mut obj, "fragment_offset", spec.fragment_offset);
    set(&mut obj, "fragment_size", spec.fragment_size);
    set(&mut obj, "max_fragment_length", spec.max_fragment_length);
    set(&mut obj, "no_match_size", spec.no_match_size);
    set(&mut obj, "number_of_fragments", spec.number_of_fragments);
    set(&mut obj, "order", spec.order.map(HighlighterOrder::as_wire));
    set(&mut obj, "require_field_match", spec.require_field_match);
    if let Some(query) = &spec.highlight_query {
        obj.insert("highlight_query".to_string(), compile_query(query));
    }

    // Only overrides with a field path are attached, in their original order
    let fields: Vec<Value> = spec
        .fields
        .iter()
        .filter(|field| field.field.is_some())
        .map(compile_highlight_field)
        .collect();
    if !fields.is_empty() {
        obj.insert("fields".to_string(), Value::Array(fields));
    }

    Value::Object(obj)
}

fn compile_highlight_field(spec: &HighlightFieldSpec) -> Value {
    let mut obj = Map::new();

    obj.insert(
        "type".to_string(),
        Value::from(
            spec.highlighter_type
                .unwrap_or(HighlighterType::Unified)
                .as_wire(),
        ),
    );
    set(&mut obj, "force_source", spec.force_source);
    set(
        &mut obj,
        "fragmenter",
        spec.fragmenter.map(HighlighterFragmenter::as_wire),
    );
    set(&mut obj, "fragment_offset", spec.fragment_offset);
    set(&mut obj, "fragment_size", spec.fragment_size);
    set(&mut obj, "number_of_fragments", spec.number_of_fragments);
    set(&mut obj, "no_match_size", spec.no_match_size);
    set(&mut obj, "boundary_chars", spec.boundary_chars.as_deref());
    set(&mut obj, "boundary_max_scan", spec.boundary_max_scan);
    set(
        &mut obj,
        "boundary_scanner",
        spec.boundary_scanner.map(BoundaryScanner::as_wire),
    );
    set(
        &mut obj,
        "boundary_scanner_locale",
        spec.boundary_scanner_locale.as_deref(),
    );
    set(&mut obj, "max_fragment_length", spec.max_fragment_length);
    set(&mut obj, "phrase_limit", spec.phrase_limit);
    set(&mut obj, "order", spec.order.map(HighlighterOrder::as_wire));
    if let Some(tags) = &spec.pre_tags {
        obj.insert("pre_tags".to_string(), Value::from(vec![tags.as_str()]));
    }
    if let Some(tags) = &spec.post_tags {
        obj.insert("post_tags".to_string(), Value::from(vec![tags.as_str()]));
    }
    set(&mut obj, "require_field_match", spec.require_field_match);
    set(
        &mut obj,
        "tags_schema",
        spec.tags_schema.map(HighlighterTagsSchema::as_wire),
    );
    if let Some(query) = &spec.highlight_query {
        obj.insert("highlight_query".to_string(), compile_query(query));
    }

    let mut entry = Map::new();
    // Filtered by the caller, so the path is always present here
    let field = spec.field.as_ref().map(|f| f.as_str()).unwrap_or_default();
    entry.insert(field.to_string(), Value::Object(obj));
    Value::Object(entry)
}

fn compile_suggest(spec: &SuggestSpec) -> Value {
    let mut obj = Map::new();

    // The term suggester is only emitted when its field is set
    if let Some(term) = &spec.term {
        if term.field.is_some() {
            let name = term
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_TERM_SUGGEST_NAME.to_string());
            obj.insert(name, compile_term(term));
        }
    }
    if let Some(completion) = &spec.completion {
        let name = completion
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_COMPLETION_SUGGEST_NAME.to_string());
        obj.insert(name, compile_completion(completion));
    }
    if let Some(phrase) = &spec.phrase {
        let name = phrase
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_PHRASE_SUGGEST_NAME.to_string());
        obj.insert(name, compile_phrase(phrase));
    }

    Value::Object(obj)
}

fn compile_term(spec: &TermSuggestSpec) -> Value {
    let mut inner = Map::new();
    set(
        &mut inner,
        "field",
        spec.field.as_ref().map(|f| f.as_str()),
    );
    set(&mut inner, "analyzer", spec.analyzer.as_deref());
    set(&mut inner, "lowercase_terms", spec.lowercase_terms);
    set(&mut inner, "max_edits", spec.max_edits);
    set(&mut inner, "max_inspections", spec.max_inspections);
    set(&mut inner, "max_term_freq", spec.max_term_freq);
    set(&mut inner, "min_doc_freq", spec.min_doc_freq);
    set(&mut inner, "min_word_length", spec.min_word_length);
    set(&mut inner, "prefix_length", spec.prefix_length);
    set(&mut inner, "shard_size", spec.shard_size);
    set(&mut inner, "size", spec.size);
    set(
        &mut inner,
        "suggest_mode",
        spec.suggest_mode.map(SuggestMode::as_wire),
    );
    set(&mut inner, "sort", spec.sort.map(SuggestSort::as_wire));
    set(
        &mut inner,
        "string_distance",
        spec.string_distance.map(StringDistance::as_wire),
    );

    let mut outer = Map::new();
    set(&mut outer, "text", spec.text.as_deref());
    outer.insert("term".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn compile_completion(spec: &CompletionSuggestSpec) -> Value {
    let mut inner = Map::new();
    set(
        &mut inner,
        "field",
        spec.field.as_ref().map(|f| f.as_str()),
    );
    set(&mut inner, "analyzer", spec.analyzer.as_deref());
    set(&mut inner, "size", spec.size);
    set(&mut inner, "skip_duplicates", spec.skip_duplicates);
    if let Some(fuzzy) = &spec.fuzzy {
        inner.insert("fuzzy".to_string(), compile_fuzzy(fuzzy));
    }

    // Each named context block is compiled independently; duplicate names
    // accumulate under one key
    let mut contexts: Map<String, Value> = Map::new();
    for context in &spec.contexts {
        let compiled = compile_context(context);
        match contexts.get_mut(&context.name) {
            Some(Value::Array(entries)) => entries.push(compiled),
            _ => {
                contexts.insert(context.name.clone(), Value::Array(vec![compiled]));
            }
        }
    }
    if !contexts.is_empty() {
        inner.insert("contexts".to_string(), Value::Object(contexts));
    }

    let mut outer = Map::new();
    set(&mut outer, "prefix", spec.prefix.as_deref());
    set(&mut outer, "regex", spec.regex.as_deref());
    outer.insert("completion".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn compile_fuzzy(spec: &CompletionFuzzySpec) -> Value {
    let mut obj = Map::new();
    set(
        &mut obj,
        "fuzziness",
        spec.fuzziness.map(fuzziness_value),
    );
    set(&mut obj, "min_length", spec.min_length);
    set(&mut obj, "prefix_length", spec.prefix_length);
    set(&mut obj, "transpositions", spec.transpositions);
    set(&mut obj, "unicode_aware", spec.unicode_aware);
    Value::Object(obj)
}

fn fuzziness_value(fuzziness: Fuzziness) -> Value {
    match fuzziness {
        Fuzziness::Auto => Value::from("AUTO"),
        Fuzziness::AutoRange(low, high) => Value::from(format!("AUTO:{low},{high}")),
        Fuzziness::Distance(distance) => Value::from(distance),
    }
}

fn compile_context(spec: &CompletionContextSpec) -> Value {
    let mut obj = Map::new();
    set(&mut obj, "context", spec.context.as_deref());
    set(&mut obj, "boost", spec.boost);
    set(&mut obj, "prefix", spec.prefix);
    set(&mut obj, "precision", spec.precision);
    Value::Object(obj)
}

fn compile_phrase(spec: &PhraseSuggestSpec) -> Value {
    let mut inner = Map::new();
    set(
        &mut inner,
        "field",
        spec.field.as_ref().map(|f| f.as_str()),
    );
    set(&mut inner, "analyzer", spec.analyzer.as_deref());
    set(&mut inner, "size", spec.size);
    set(&mut inner, "shard_size", spec.shard_size);
    set(&mut inner, "confidence", spec.confidence);
    set(&mut inner, "gram_size", spec.gram_size);
    set(&mut inner, "max_errors", spec.max_errors);
    set(
        &mut inner,
        "real_word_error_likelihood",
        spec.real_word_error_likelihood,
    );
    set(
        &mut inner,
        "separator",
        spec.separator.map(|c| c.to_string()),
    );
    set(&mut inner, "token_limit", spec.token_limit);
    set(&mut inner, "force_unigrams", spec.force_unigrams);

    if let Some(highlight) = &spec.highlight {
        let mut obj = Map::new();
        set(&mut obj, "pre_tag", highlight.pre_tag.as_deref());
        set(&mut obj, "post_tag", highlight.post_tag.as_deref());
        inner.insert("highlight".to_string(), Value::Object(obj));
    }
    if let Some(collate) = &spec.collate {
        inner.insert("collate".to_string(), compile_collate(collate));
    }
    if let Some(generator) = &spec.direct_generator {
        inner.insert(
            "direct_generator".to_string(),
            Value::Array(vec![compile_generator(generator)]),
        );
    }
    if let Some(smoothing) = &spec.smoothing {
        inner.insert("smoothing".to_string(), compile_smoothing(smoothing));
    }

    let mut outer = Map::new();
    set(&mut outer, "text", spec.text.as_deref());
    outer.insert("phrase".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn compile_collate(spec: &PhraseCollateSpec) -> Value {
    let mut query = Map::new();
    set(&mut query, "id", spec.query.id.as_deref());
    set(&mut query, "source", spec.query.source.as_deref());

    let mut obj = Map::new();
    obj.insert("query".to_string(), Value::Object(query));
    if let Some(params) = &spec.params {
        obj.insert("params".to_string(), Value::Object(params.clone()));
    }
    set(&mut obj, "prune", spec.prune);
    Value::Object(obj)
}

fn compile_generator(spec: &DirectGeneratorSpec) -> Value {
    let mut obj = Map::new();
    set(&mut obj, "field", spec.field.as_ref().map(|f| f.as_str()));
    set(&mut obj, "max_edits", spec.max_edits);
    set(&mut obj, "max_inspections", spec.max_inspections);
    set(&mut obj, "max_term_freq", spec.max_term_freq);
    set(&mut obj, "min_doc_freq", spec.min_doc_freq);
    set(&mut obj, "min_word_length", spec.min_word_length);
    set(&mut obj, "pre_filter", spec.pre_filter.as_deref());
    set(&mut obj, "post_filter", spec.post_filter.as_deref());
    set(&mut obj, "prefix_length", spec.prefix_length);
    set(&mut obj, "size", spec.size);
    set(
        &mut obj,
        "suggest_mode",
        spec.suggest_mode.map(SuggestMode::as_wire),
    );
    Value::Object(obj)
}

/// A chosen smoothing model always compiles to a smoothing block; a variant
/// with no value yields an empty block rather than omitting the section.
fn compile_smoothing(spec: &SmoothingSpec) -> Value {
    let (key, params) = match spec {
        SmoothingSpec::Laplace { alpha } => {
            let mut obj = Map::new();
            set(&mut obj, "alpha", *alpha);
            ("laplace", obj)
        }
        SmoothingSpec::LinearInterpolation {
            trigram_lambda,
            bigram_lambda,
            unigram_lambda,
        } => {
            let mut obj = Map::new();
            set(&mut obj, "trigram_lambda", *trigram_lambda);
            set(&mut obj, "bigram_lambda", *bigram_lambda);
            set(&mut obj, "unigram_lambda", *unigram_lambda);
            ("linear_interpolation", obj)
        }
        SmoothingSpec::StupidBackoff { discount } => {
            let mut obj = Map::new();
            set(&mut obj, "discount", *discount);
            ("stupid_backoff", obj)
        }
    };

    let mut outer = Map::new();
    outer.insert(key.to_string(), Value::Object(params));
    Value::Object(outer)
}

// Wire translation tables. Exhaustive matches keep every domain variant
// mapped to exactly one engine value.

impl Operator {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
        }
    }
}

impl ZeroTermsQuery {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            ZeroTermsQuery::All => "all",
            ZeroTermsQuery::None => "none",
        }
    }
}

impl SuggestMode {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            SuggestMode::Missing => "missing",
            SuggestMode::Popular => "popular",
            SuggestMode::Always => "always",
        }
    }
}

impl StringDistance {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            StringDistance::Internal => "internal",
            StringDistance::DamerauLevenshtein => "damerau_levenshtein",
            StringDistance::Levenshtein => "levenshtein",
            StringDistance::JaroWinkler => "jaro_winkler",
            StringDistance::Ngram => "ngram",
        }
    }
}

impl SuggestSort {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            SuggestSort::Score => "score",
            SuggestSort::Frequency => "frequency",
        }
    }
}

impl HighlighterType {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            HighlighterType::Plain => "plain",
            HighlighterType::Fvh => "fvh",
            HighlighterType::Unified => "unified",
        }
    }
}

impl HighlighterFragmenter {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            HighlighterFragmenter::Simple => "simple",
            HighlighterFragmenter::Span => "span",
        }
    }
}

impl HighlighterEncoder {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            HighlighterEncoder::Default => "default",
            HighlighterEncoder::Html => "html",
        }
    }
}

impl BoundaryScanner {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            BoundaryScanner::Characters => "chars",
            BoundaryScanner::Sentence => "sentence",
            BoundaryScanner::Word => "word",
        }
    }
}

impl HighlighterOrder {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            HighlighterOrder::Score => "score",
        }
    }
}

impl HighlighterTagsSchema {
    pub(crate) fn as_wire(self) -> &'static str {
        match self {
            HighlighterTagsSchema::Styled => "styled",
        }
    }
}
