//! Engine response deserialization and normalization
//!
//! The engine returns a heterogeneous body: hits with per-field highlight
//! maps, plus a top-level suggest section grouped by suggester name.
//! [`normalize`] flattens it into one uniform record per hit.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Raw search response as returned by the engine
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default)]
    pub took: u64,

    #[serde(default)]
    pub timed_out: bool,

    pub hits: SearchHits<T>,

    /// Suggestion groups keyed by suggester name
    #[serde(default = "BTreeMap::new")]
    pub suggest: BTreeMap<String, Vec<SuggestEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHits<T> {
    #[serde(default)]
    pub total: Option<SearchHitsTotal>,

    pub hits: Vec<SearchHit<T>>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHitsTotal {
    pub value: u64,

    #[serde(default)]
    pub relation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit<T> {
    #[serde(rename = "_id")]
    pub id: Option<String>,

    #[serde(rename = "_score")]
    pub score: Option<f64>,

    #[serde(rename = "_source")]
    pub source: Option<T>,

    /// Snippets keyed by field, in the engine's own field order
    pub highlight: Option<serde_json::Map<String, serde_json::Value>>,
}

/// One suggestion group: the analyzed input token and its options
#[derive(Debug, Deserialize)]
pub struct SuggestEntry {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub offset: u64,

    #[serde(default)]
    pub length: u64,

    #[serde(default)]
    pub options: Vec<SuggestOption>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestOption {
    pub text: String,

    #[serde(default)]
    pub score: Option<f64>,

    #[serde(default)]
    pub freq: Option<u64>,
}

/// Uniform per-hit record produced by normalization.
///
/// Highlight and suggestion sequences are never absent; a hit without them
/// carries empty vectors.
#[derive(Debug, Clone)]
pub struct NormalizedHit<T> {
    /// Engine-assigned document identifier
    pub id: String,

    /// Opaque source document, copied through unchanged
    pub document: Option<T>,

    /// Highlight snippets flattened across fields in response order
    pub highlights: Vec<String>,

    /// Suggested texts flattened across all suggesters, scores and offsets
    /// discarded
    pub suggestions: Vec<String>,
}

/// Flatten the engine response into one uniform record per hit.
///
/// Pure function: the response-level suggestion texts are attached to every
/// hit, and per-hit highlight maps are flattened field by field in the order
/// the engine returned them.
pub fn normalize<T>(response: SearchResponse<T>) -> Vec<NormalizedHit<T>> {
    let suggestions = flatten_suggestions(&response.suggest);

    response
        .hits
        .hits
        .into_iter()
        .map(|hit| NormalizedHit {
            id: hit.id.unwrap_or_default(),
            document: hit.source,
            highlights: hit.highlight.map(flatten_highlights).unwrap_or_default(),
            suggestions: suggestions.clone(),
        })
        .collect()
}

fn flatten_highlights(highlight: serde_json::Map<String, serde_json::Value>) -> Vec<String> {
    let mut snippets = Vec::new();
    for (_field, values) in highlight {
        if let serde_json::Value::Array(values) = values {
            for value in values {
                if let serde_json::Value::String(snippet) = value {
                    snippets.push(snippet);
                }
            }
        }
    }
    snippets
}

fn flatten_suggestions(suggest: &BTreeMap<String, Vec<SuggestEntry>>) -> Vec<String> {
    suggest
        .values()
        .flatten()
        .flat_map(|entry| &entry.options)
        .map(|option| option.text.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SearchResponse<serde_json::Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_highlights_flattened_in_field_order() {
        let response = parse(json!({
            "took": 3,
            "timed_out": false,
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "hits": [{
                    "_id": "1",
                    "_source": {"name": "doc"},
                    "highlight": {"field1": ["a"], "field2": ["b"]}
                }]
            }
        }));

        let hits = normalize(response);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].highlights, vec!["a", "b"]);
        assert!(hits[0].suggestions.is_empty());
    }

    #[test]
    fn test_multiple_snippets_per_field_concatenated() {
        let response = parse(json!({
            "hits": {
                "hits": [{
                    "_id": "1",
                    "highlight": {"name": ["x", "y"], "attachment.content": ["z"]}
                }]
            }
        }));

        let hits = normalize(response);
        assert_eq!(hits[0].highlights, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_hit_without_highlight_gets_empty_vec() {
        let response = parse(json!({
            "hits": {"hits": [{"_id": "1", "_source": {}}]}
        }));

        let hits = normalize(response);
        assert!(hits[0].highlights.is_empty());
        assert!(hits[0].suggestions.is_empty());
    }

    #[test]
    fn test_suggestions_flattened_across_suggesters() {
        let response = parse(json!({
            "hits": {
                "hits": [{"_id": "1"}]
            },
            "suggest": {
                "phraseSuggest": [{
                    "text": "quartely",
                    "offset": 0,
                    "length": 8,
                    "options": [{"text": "quarterly", "score": 0.8}]
                }],
                "termSuggest": [
                    {
                        "text": "reprot",
                        "offset": 0,
                        "length": 6,
                        "options": [
                            {"text": "report", "score": 0.9, "freq": 4},
                            {"text": "reports", "score": 0.7, "freq": 2}
                        ]
                    },
                    {
                        "text": "ok",
                        "offset": 7,
                        "length": 2,
                        "options": []
                    }
                ]
            }
        }));

        let hits = normalize(response);
        // Suggester groups iterate in name order; scores and offsets are
        // discarded
        assert_eq!(
            hits[0].suggestions,
            vec!["quarterly", "report", "reports"]
        );
    }

    #[test]
    fn test_suggestions_attached_to_every_hit() {
        let response = parse(json!({
            "hits": {
                "hits": [{"_id": "1"}, {"_id": "2"}]
            },
            "suggest": {
                "termSuggest": [{
                    "text": "x",
                    "options": [{"text": "y"}]
                }]
            }
        }));

        let hits = normalize(response);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].suggestions, vec!["y"]);
        assert_eq!(hits[1].suggestions, vec!["y"]);
    }

    #[test]
    fn test_source_copied_through_unchanged() {
        let response = parse(json!({
            "hits": {
                "hits": [{
                    "_id": "42",
                    "_source": {"id": 42, "content_base64": "aGVsbG8="}
                }]
            }
        }));

        let hits = normalize(response);
        assert_eq!(hits[0].id, "42");
        let doc = hits[0].document.as_ref().unwrap();
        assert_eq!(doc["id"], 42);
    }

    #[test]
    fn test_empty_response_normalizes_to_empty() {
        let response = parse(json!({"hits": {"hits": []}}));
        assert!(normalize(response).is_empty());
    }

    #[test]
    fn test_typed_source_deserialization() {
        #[derive(Debug, serde::Deserialize)]
        struct Doc {
            id: i64,
        }

        let response: SearchResponse<Doc> = serde_json::from_value(json!({
            "hits": {"hits": [{"_id": "7", "_source": {"id": 7}}]}
        }))
        .unwrap();

        let hits = normalize(response);
        assert_eq!(hits[0].document.as_ref().unwrap().id, 7);
    }
}
