//! Search client: connection lifecycle, index-ensure, search, insert, delete
//!
//! The client validates its configuration before any I/O, ensures the target
//! index exists (creating it with the path-hierarchy analyzer if absent),
//! and wraps every search call with the request compiler and the response
//! normalizer. All operations are stateless per call; the configuration is
//! immutable for the lifetime of the client.

use std::sync::Arc;

use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::compiler;
use crate::config::ClientConfig;
use crate::document::FileDocument;
use crate::error::{Error, Result};
use crate::observe::{CallEvent, CallObserver, TracingObserver};
use crate::request::SearchRequest;
use crate::response::{self, NormalizedHit, SearchResponse};

/// Name of the custom analyzer installed on a newly created index
pub const ANALYZER_NAME: &str = "windows_path_hierarchy_analyzer";
/// Name of the path-hierarchy tokenizer backing the analyzer
pub const TOKENIZER_NAME: &str = "windows_path_hierarchy_tokenizer";

/// Engine acknowledgement for a document write or delete
#[derive(Debug, Clone, Deserialize)]
pub struct WriteAck {
    /// Engine-assigned document identifier
    #[serde(rename = "_id")]
    pub id: String,

    /// Outcome reported by the engine ("created", "updated", "deleted",
    /// "not_found")
    pub result: String,
}

/// Client for one index of an Elasticsearch-compatible engine.
///
/// Safe for concurrent use; the underlying HTTP client is cheaply cloneable
/// and task-safe.
#[derive(Clone)]
pub struct ElasticClient {
    config: ClientConfig,
    node: Url,
    http: reqwest::Client,
    observer: Arc<dyn CallObserver>,
}

impl std::fmt::Debug for ElasticClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticClient")
            .field("config", &self.config)
            .field("node", &self.node)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

impl ElasticClient {
    /// Connect with the default `tracing`-backed call observer.
    ///
    /// Validates the configuration before any I/O, then ensures the target
    /// index exists, creating it with the path-hierarchy analyzer when
    /// absent. Any failure of the existence check or creation is fatal; the
    /// client must be discarded, not retried.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        Self::connect_with_observer(config, Arc::new(TracingObserver)).await
    }

    /// Connect with an injected call observer
    pub async fn connect_with_observer(
        config: ClientConfig,
        observer: Arc<dyn CallObserver>,
    ) -> Result<Self> {
        let node = config
            .node
            .clone()
            .ok_or_else(|| Error::Configuration("search engine node address is not set".to_string()))?;
        if config.index_name.is_empty() {
            return Err(Error::Configuration(
                "index name for the search engine is not set".to_string(),
            ));
        }
        if node.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "node address '{node}' cannot be used as a base URL"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration(format!("failed to create HTTP client: {e}")))?;

        let client = Self {
            config,
            node,
            http,
            observer,
        };
        client.ensure_index().await?;
        Ok(client)
    }

    /// Blocking form of [`connect`](Self::connect).
    ///
    /// Must not be called from within an async runtime.
    pub fn connect_blocking(config: ClientConfig) -> Result<Self> {
        block_on(Self::connect(config))?
    }

    /// Compile and execute a search request, returning one normalized
    /// record per hit.
    ///
    /// A non-success engine response fails with [`Error::Query`] carrying
    /// the engine's diagnostic body verbatim; no partial results are ever
    /// returned.
    pub async fn search<T: DeserializeOwned>(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<NormalizedHit<T>>> {
        let body = compiler::compile(request);
        let url = self.index_url(&["_search"]);

        tracing::debug!(index = %self.config.index_name, "executing search");
        let (status, text) = self.call(Method::POST, url, Some(&body)).await?;
        if !status.is_success() {
            return Err(Error::Query(text));
        }

        let parsed: SearchResponse<T> = serde_json::from_str(&text)
            .map_err(|e| Error::Query(format!("failed to decode engine search response: {e}")))?;
        Ok(response::normalize(parsed))
    }

    /// Blocking form of [`search`](Self::search).
    ///
    /// Must not be called from within an async runtime.
    pub fn search_blocking<T: DeserializeOwned>(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<NormalizedHit<T>>> {
        block_on(self.search(request))?
    }

    /// Insert a document through the configured ingestion pipeline.
    ///
    /// The call waits for the engine's refresh before returning: a search
    /// issued immediately after a successful insert observes the document.
    /// Callers needing low-latency writes must accept this trade-off; the
    /// wait is not configurable per call.
    pub async fn insert_doc(&self, doc: &FileDocument) -> Result<WriteAck> {
        let mut url = self.index_url(&["_doc", &doc.id.to_string()]);
        url.query_pairs_mut()
            .append_pair("pipeline", &self.config.pipeline)
            .append_pair("refresh", "wait_for");

        let body = serde_json::to_value(doc)
            .map_err(|e| Error::Transport(format!("failed to serialize document: {e}")))?;

        tracing::debug!(index = %self.config.index_name, id = doc.id, "inserting document");
        let (status, text) = self.call(Method::PUT, url, Some(&body)).await?;
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "insert of document {} failed with status {status}: {text}",
                doc.id
            )));
        }
        parse_ack(&text)
    }

    /// Blocking form of [`insert_doc`](Self::insert_doc).
    ///
    /// Must not be called from within an async runtime.
    pub fn insert_doc_blocking(&self, doc: &FileDocument) -> Result<WriteAck> {
        block_on(self.insert_doc(doc))?
    }

    /// Delete a document by its integer identifier.
    ///
    /// Deleting an unknown id is acknowledged with result "not_found".
    pub async fn delete_doc(&self, id: i64) -> Result<WriteAck> {
        let url = self.index_url(&["_doc", &id.to_string()]);

        tracing::debug!(index = %self.config.index_name, id, "deleting document");
        let (status, text) = self.call(Method::DELETE, url, None).await?;
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(Error::Transport(format!(
                "delete of document {id} failed with status {status}: {text}"
            )));
        }
        parse_ack(&text)
    }

    /// Blocking form of [`delete_doc`](Self::delete_doc).
    ///
    /// Must not be called from within an async runtime.
    pub fn delete_doc_blocking(&self, id: i64) -> Result<WriteAck> {
        block_on(self.delete_doc(id))?
    }

    /// Drop the configured index
    pub async fn delete_index(&self) -> Result<()> {
        let url = self.index_url(&[]);
        let (status, text) = self.call(Method::DELETE, url, None).await?;
        if !status.is_success() {
            return Err(Error::Transport(format!(
                "deletion of index '{}' failed with status {status}: {text}",
                self.config.index_name
            )));
        }
        Ok(())
    }

    /// The immutable configuration this client was constructed with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check index existence and create it when absent.
    ///
    /// Runs exactly once during construction. A concurrent creation race
    /// across processes can fail here; the loser is expected to be
    /// discarded and reconstructed.
    async fn ensure_index(&self) -> Result<()> {
        let url = self.index_url(&[]);
        let (status, body) = self
            .call(Method::HEAD, url, None)
            .await
            .map_err(into_construction)?;

        if status.is_success() {
            tracing::debug!(index = %self.config.index_name, "index already exists");
            return Ok(());
        }
        if status != StatusCode::NOT_FOUND {
            return Err(Error::Construction(format!(
                "existence check of index '{}' failed with status {status}: {body}",
                self.config.index_name
            )));
        }
        self.create_index().await
    }

    async fn create_index(&self) -> Result<()> {
        let settings = index_settings(self.config.path_delimiter);
        let url = self.index_url(&[]);
        let (status, body) = self
            .call(Method::PUT, url, Some(&settings))
            .await
            .map_err(into_construction)?;

        if !status.is_success() {
            return Err(Error::Construction(format!(
                "creation of index '{}' failed with status {status}: {body}",
                self.config.index_name
            )));
        }
        tracing::info!(
            index = %self.config.index_name,
            analyzer = ANALYZER_NAME,
            "created index with path-hierarchy analyzer"
        );
        Ok(())
    }

    /// Execute one engine call and report it to the observer.
    ///
    /// Transport-level failures preserve the underlying error message
    /// verbatim.
    async fn call(&self, method: Method, url: Url, body: Option<&Value>) -> Result<(StatusCode, String)> {
        let request_body = body.map(Value::to_string);

        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(text) = &request_body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(text.clone());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.observer.on_call(&CallEvent {
                    method: method.as_str(),
                    url: url.as_str(),
                    request_body: request_body.as_deref(),
                    status: None,
                    response_body: None,
                });
                return Err(Error::Transport(e.to_string()));
            }
        };

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        self.observer.on_call(&CallEvent {
            method: method.as_str(),
            url: url.as_str(),
            request_body: request_body.as_deref(),
            status: Some(status.as_u16()),
            response_body: Some(&text),
        });

        Ok((status, text))
    }

    fn index_url(&self, parts: &[&str]) -> Url {
        let mut url = self.node.clone();
        // The node URL is validated as a base at construction
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&self.config.index_name);
            for part in parts {
                segments.push(part);
            }
        }
        url
    }
}

fn into_construction(error: Error) -> Error {
    match error {
        Error::Transport(message) => Error::Construction(message),
        other => other,
    }
}

fn parse_ack(text: &str) -> Result<WriteAck> {
    serde_json::from_str(text)
        .map_err(|e| Error::Transport(format!("failed to decode engine acknowledgement: {e}")))
}

/// Index settings carrying the custom path-hierarchy analyzer
fn index_settings(delimiter: char) -> Value {
    json!({
        "settings": {
            "analysis": {
                "analyzer": {
                    ANALYZER_NAME: {
                        "type": "custom",
                        "tokenizer": TOKENIZER_NAME
                    }
                },
                "tokenizer": {
                    TOKENIZER_NAME: {
                        "type": "path_hierarchy",
                        "delimiter": delimiter.to_string()
                    }
                }
            }
        }
    })
}

/// Run a client future to completion on a dedicated current-thread runtime.
///
/// Used by the blocking call variants; panics inside the future propagate
/// to the caller unchanged.
fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Transport(format!("failed to start blocking runtime: {e}")))?;
    Ok(runtime.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfigBuilder;

    #[tokio::test]
    async fn test_connect_fails_without_node() {
        let config = ClientConfigBuilder::new().index_name("files").build();
        let err = ElasticClient::connect(config).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_connect_fails_with_empty_index_name() {
        let config = ClientConfigBuilder::new()
            .node(Url::parse("http://localhost:9200").unwrap())
            .build();
        let err = ElasticClient::connect(config).await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_index_settings_carry_analyzer_and_delimiter() {
        let settings = index_settings('\\');
        let analysis = &settings["settings"]["analysis"];
        assert_eq!(analysis["analyzer"][ANALYZER_NAME]["tokenizer"], TOKENIZER_NAME);
        assert_eq!(analysis["tokenizer"][TOKENIZER_NAME]["type"], "path_hierarchy");
        assert_eq!(analysis["tokenizer"][TOKENIZER_NAME]["delimiter"], "\\");
    }

    #[test]
    fn test_write_ack_decoding() {
        let ack = parse_ack(r#"{"_id": "1", "result": "created"}"#).unwrap();
        assert_eq!(ack.id, "1");
        assert_eq!(ack.result, "created");
    }
}
