//! Document carrier for indexed files

use base64ct::{Base64, Encoding};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file document as stored in the search index.
///
/// Only the identity is used by insert, delete, and normalization; the
/// remaining fields are opaque payload. The `attachment` field is filled in
/// by the engine-side ingestion pipeline that extracts text from
/// `content_base64`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDocument {
    /// Document identity
    pub id: i64,

    /// Last change timestamp of the underlying file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_change: Option<DateTime<Utc>>,

    /// Base64-encoded file content consumed by the ingestion pipeline
    pub content_base64: String,

    /// Extracted attachment payload, produced by the engine pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<serde_json::Value>,
}

impl FileDocument {
    /// Create a document from raw file content, encoding it for the
    /// attachment pipeline
    pub fn from_bytes(id: i64, content: &[u8]) -> Self {
        Self {
            id,
            data_change: None,
            content_base64: Base64::encode_string(content),
            attachment: None,
        }
    }

    pub fn with_data_change(mut self, data_change: DateTime<Utc>) -> Self {
        self.data_change = Some(data_change);
        self
    }
}
