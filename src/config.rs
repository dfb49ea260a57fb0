//! Client configuration

use reqwest::Url;

/// Default ingestion pipeline for document inserts. The pipeline is expected
/// to be pre-provisioned on the engine and to extract text from the
/// base64-encoded attachment payload.
pub const DEFAULT_PIPELINE: &str = "attachment";

/// Search client configuration.
///
/// Immutable for the lifetime of a client instance; created once and never
/// mutated afterward.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Target index name (must be non-empty)
    pub index_name: String,

    /// Engine node address (must be set before connecting)
    pub node: Option<Url>,

    /// Delimiter for the path-hierarchy tokenizer of the index analyzer
    pub path_delimiter: char,

    /// Ingestion pipeline applied to inserted documents
    pub pipeline: String,

    /// Client-wide HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            index_name: String::new(),
            node: None,
            path_delimiter: '\\',
            pipeline: DEFAULT_PIPELINE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given index and node address
    pub fn new(index_name: impl Into<String>, node: Url) -> Self {
        Self {
            index_name: index_name.into(),
            node: Some(node),
            ..Self::default()
        }
    }
}

/// Builder for ClientConfig
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn index_name(mut self, name: impl Into<String>) -> Self {
        self.config.index_name = name.into();
        self
    }

    pub fn node(mut self, node: Url) -> Self {
        self.config.node = Some(node);
        self
    }

    pub fn path_delimiter(mut self, delimiter: char) -> Self {
        self.config.path_delimiter = delimiter;
        self
    }

    pub fn pipeline(mut self, pipeline: impl Into<String>) -> Self {
        self.config.pipeline = pipeline.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
