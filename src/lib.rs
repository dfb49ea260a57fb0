//! Typed query compiler, response normalizer, and lifecycle client for an
//! Elasticsearch-backed file index.
//!
//! The crate is built around three cooperating parts:
//!
//! - **Request model** ([`request`]): immutable value types describing a
//!   match query, highlighting rules, and up to three suggesters (term,
//!   completion, phrase). Anything left unset stays at the engine default.
//! - **Compiler** ([`compiler`]) and **normalizer** ([`response`]): pure
//!   translations between the typed model and the engine's JSON bodies.
//! - **Client** ([`client`]): validates configuration before any I/O,
//!   ensures the index exists with a custom path-hierarchy analyzer, and
//!   exposes search, insert, and delete in async and blocking forms.
//!
//! # Example
//!
//! ```no_run
//! use elastic_filesearch::{
//!     ClientConfig, ElasticClient, HighlightFieldSpec, HighlightSpec, MatchQuerySpec,
//!     SearchRequest,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("files", "http://localhost:9200".parse()?);
//!     let client = ElasticClient::connect(config).await?;
//!
//!     let request = SearchRequest::new()
//!         .with_match(MatchQuerySpec::new("attachment.content", "quarterly report"))
//!         .with_highlight(
//!             HighlightSpec::new()
//!                 .with_tag("<em>")
//!                 .with_field(HighlightFieldSpec::new("attachment.content")),
//!         );
//!
//!     let hits = client.search::<serde_json::Value>(&request).await?;
//!     for hit in hits {
//!         println!("{}: {:?}", hit.id, hit.highlights);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod compiler;
pub mod config;
pub mod document;
pub mod error;
pub mod observe;
pub mod request;
pub mod response;

pub use client::{ElasticClient, WriteAck, ANALYZER_NAME, TOKENIZER_NAME};
pub use compiler::compile;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_PIPELINE};
pub use document::FileDocument;
pub use error::{Error, Result};
pub use observe::{CallEvent, CallObserver, TracingObserver};
pub use request::{
    BoundaryScanner, CompletionContextSpec, CompletionFuzzySpec, CompletionSuggestSpec,
    DirectGeneratorSpec, FieldPath, Fuzziness, HighlightFieldSpec, HighlightSpec,
    HighlighterEncoder, HighlighterFragmenter, HighlighterOrder, HighlighterTagsSchema,
    HighlighterType, MatchQuerySpec, Operator, PhraseCollateQuerySpec, PhraseCollateSpec,
    PhraseHighlightSpec, PhraseSuggestSpec, QuerySpec, SearchRequest, SmoothingSpec,
    StringDistance, SuggestMode, SuggestSort, SuggestSpec, TermSuggestSpec, ZeroTermsQuery,
};
pub use response::{normalize, NormalizedHit, SearchResponse};
