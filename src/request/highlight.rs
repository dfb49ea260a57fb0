//! Highlight specification

use serde::{Deserialize, Serialize};

use super::query::{FieldPath, QuerySpec};

/// Highlighter implementation selected per field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlighterType {
    Plain,
    Fvh,
    Unified,
}

/// Fragmenting strategy for the plain highlighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlighterFragmenter {
    Simple,
    Span,
}

/// Snippet encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlighterEncoder {
    Default,
    Html,
}

/// Fragment boundary scanning mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryScanner {
    Characters,
    Sentence,
    Word,
}

/// Snippet ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlighterOrder {
    Score,
}

/// Predefined tag schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlighterTagsSchema {
    Styled,
}

/// Global highlight settings plus ordered per-field overrides.
///
/// The single `tag` is used for both the opening and closing snippet marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighlightSpec {
    pub tag: Option<String>,
    pub highlight_query: Option<QuerySpec>,
    pub encoder: Option<HighlighterEncoder>,
    pub boundary_chars: Option<String>,
    pub boundary_max_scan: Option<u32>,
    pub boundary_scanner: Option<BoundaryScanner>,
    pub boundary_scanner_locale: Option<String>,
    pub fragmenter: Option<HighlighterFragmenter>,
    pub fragment_offset: Option<u32>,
    pub fragment_size: Option<u32>,
    pub max_fragment_length: Option<u32>,
    pub no_match_size: Option<u32>,
    pub number_of_fragments: Option<u32>,
    pub order: Option<HighlighterOrder>,
    pub require_field_match: Option<bool>,

    /// Per-field overrides; order is significant and preserved in the
    /// compiled request. Entries without a field path are skipped.
    pub fields: Vec<HighlightFieldSpec>,
}

impl HighlightSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_highlight_query(mut self, query: QuerySpec) -> Self {
        self.highlight_query = Some(query);
        self
    }

    pub fn with_encoder(mut self, encoder: HighlighterEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn with_boundary_chars(mut self, chars: impl Into<String>) -> Self {
        self.boundary_chars = Some(chars.into());
        self
    }

    pub fn with_boundary_max_scan(mut self, max: u32) -> Self {
        self.boundary_max_scan = Some(max);
        self
    }

    pub fn with_boundary_scanner(mut self, scanner: BoundaryScanner) -> Self {
        self.boundary_scanner = Some(scanner);
        self
    }

    pub fn with_boundary_scanner_locale(mut self, locale: impl Into<String>) -> Self {
        self.boundary_scanner_locale = Some(locale.into());
        self
    }

    pub fn with_fragmenter(mut self, fragmenter: HighlighterFragmenter) -> Self {
        self.fragmenter = Some(fragmenter);
        self
    }

    pub fn with_fragment_offset(mut self, offset: u32) -> Self {
        self.fragment_offset = Some(offset);
        self
    }

    pub fn with_fragment_size(mut self, size: u32) -> Self {
        self.fragment_size = Some(size);
        self
    }

    pub fn with_max_fragment_length(mut self, length: u32) -> Self {
        self.max_fragment_length = Some(length);
        self
    }

    pub fn with_no_match_size(mut self, size: u32) -> Self {
        self.no_match_size = Some(size);
        self
    }

    pub fn with_number_of_fragments(mut self, count: u32) -> Self {
        self.number_of_fragments = Some(count);
        self
    }

    pub fn with_order(mut self, order: HighlighterOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_require_field_match(mut self, required: bool) -> Self {
        self.require_field_match = Some(required);
        self
    }

    /// Append a per-field override; appearance order is preserved
    pub fn with_field(mut self, field: HighlightFieldSpec) -> Self {
        self.fields.push(field);
        self
    }
}

/// Per-field highlight override.
///
/// Any global setting can be overridden for a single field. The highlighter
/// type defaults to Unified when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighlightFieldSpec {
    pub field: Option<FieldPath>,
    pub highlighter_type: Option<HighlighterType>,
    pub force_source: Option<bool>,
    pub number_of_fragments: Option<u32>,
    pub no_match_size: Option<u32>,
    pub boundary_chars: Option<String>,
    pub boundary_max_scan: Option<u32>,
    pub boundary_scanner: Option<BoundaryScanner>,
    pub boundary_scanner_locale: Option<String>,
    pub fragmenter: Option<HighlighterFragmenter>,
    pub fragment_offset: Option<u32>,
    pub fragment_size: Option<u32>,
    pub max_fragment_length: Option<u32>,
    pub phrase_limit: Option<u32>,
    pub highlight_query: Option<QuerySpec>,
    pub order: Option<HighlighterOrder>,
    pub pre_tags: Option<String>,
    pub post_tags: Option<String>,
    pub require_field_match: Option<bool>,
    pub tags_schema: Option<HighlighterTagsSchema>,
}

impl HighlightFieldSpec {
    pub fn new(field: impl Into<FieldPath>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    pub fn with_highlighter_type(mut self, highlighter_type: HighlighterType) -> Self {
        self.highlighter_type = Some(highlighter_type);
        self
    }

    pub fn with_force_source(mut self, enabled: bool) -> Self {
        self.force_source = Some(enabled);
        self
    }

    pub fn with_number_of_fragments(mut self, count: u32) -> Self {
        self.number_of_fragments = Some(count);
        self
    }

    pub fn with_no_match_size(mut self, size: u32) -> Self {
        self.no_match_size = Some(size);
        self
    }

    pub fn with_boundary_chars(mut self, chars: impl Into<String>) -> Self {
        self.boundary_chars = Some(chars.into());
        self
    }

    pub fn with_boundary_max_scan(mut self, max: u32) -> Self {
        self.boundary_max_scan = Some(max);
        self
    }

    pub fn with_boundary_scanner(mut self, scanner: BoundaryScanner) -> Self {
        self.boundary_scanner = Some(scanner);
        self
    }

    pub fn with_boundary_scanner_locale(mut self, locale: impl Into<String>) -> Self {
        self.boundary_scanner_locale = Some(locale.into());
        self
    }

    pub fn with_fragmenter(mut self, fragmenter: HighlighterFragmenter) -> Self {
        self.fragmenter = Some(fragmenter);
        self
    }

    pub fn with_fragment_offset(mut self, offset: u32) -> Self {
        self.fragment_offset = Some(offset);
        self
    }

    pub fn with_fragment_size(mut self, size: u32) -> Self {
        self.fragment_size = Some(size);
        self
    }

    pub fn with_max_fragment_length(mut self, length: u32) -> Self {
        self.max_fragment_length = Some(length);
        self
    }

    pub fn with_phrase_limit(mut self, limit: u32) -> Self {
        self.phrase_limit = Some(limit);
        self
    }

    pub fn with_highlight_query(mut self, query: QuerySpec) -> Self {
        self.highlight_query = Some(query);
        self
    }

    pub fn with_order(mut self, order: HighlighterOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_pre_tags(mut self, tags: impl Into<String>) -> Self {
        self.pre_tags = Some(tags.into());
        self
    }

    pub fn with_post_tags(mut self, tags: impl Into<String>) -> Self {
        self.post_tags = Some(tags.into());
        self
    }

    pub fn with_require_field_match(mut self, required: bool) -> Self {
        self.require_field_match = Some(required);
        self
    }

    pub fn with_tags_schema(mut self, schema: HighlighterTagsSchema) -> Self {
        self.tags_schema = Some(schema);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_preserved() {
        let spec = HighlightSpec::new()
            .with_field(HighlightFieldSpec::new("name"))
            .with_field(HighlightFieldSpec::new("attachment.content"));

        let fields: Vec<&str> = spec
            .fields
            .iter()
            .filter_map(|f| f.field.as_ref().map(FieldPath::as_str))
            .collect();
        assert_eq!(fields, vec!["name", "attachment.content"]);
    }

    #[test]
    fn test_unset_means_unset() {
        let spec = HighlightSpec::new().with_tag("<em>");
        assert_eq!(spec.tag.as_deref(), Some("<em>"));
        assert!(spec.encoder.is_none());
        assert!(spec.fragment_size.is_none());
        assert!(spec.fields.is_empty());
    }
}
