//! Portal metadata for 3D models
//!
//! The ARS3D portal publishes one JSON document per object describing how its model
//! was captured. [`MetadataEnricher`] reads that document from a local cache
//! directory when possible and falls back to a [`MetadataSource`] otherwise.

use async_trait::async_trait;
use std::path::PathBuf;

pub mod http;
pub mod note;

pub use http::HttpMetadataSource;
pub use note::TechnicalNote;

/// Errors raised while obtaining or reading portal metadata
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Portal answered with a non-success status
    #[error("Invalid return code {status} for id: {object_id}.")]
    Status { object_id: String, status: u16 },

    /// Request could not be completed
    #[error("Failed to fetch metadata for id {object_id}: {message}")]
    Transport { object_id: String, message: String },

    /// Document lacks a required value
    #[error("Metadata for id {object_id} has no value at '{path}'")]
    MissingField { object_id: String, path: String },

    /// Document is not JSON, or a value has the wrong type
    #[error("Invalid metadata document for id {object_id}: {message}")]
    InvalidDocument { object_id: String, message: String },

    /// Cache file could not be read or written
    #[error("Metadata cache error for {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Somewhere portal documents can be fetched from
#[async_trait(?Send)]
pub trait MetadataSource: Send + Sync {
    /// Fetch the raw JSON document of one object
    async fn fetch(&self, object_id: &str) -> Result<String, MetadataError>;
}

/// Cache-first access to portal documents
pub struct MetadataEnricher {
    source: Box<dyn MetadataSource>,
    cache_dir: Option<PathBuf>,
}

impl MetadataEnricher {
    pub fn new(source: Box<dyn MetadataSource>, cache_dir: Option<PathBuf>) -> Self {
        Self { source, cache_dir }
    }

    fn cache_file(&self, object_id: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", object_id)))
    }

    /// Raw document text for `object_id`.
    ///
    /// A cached document is returned as is; a fetched one is written to the cache
    /// (when configured) before it is returned.
    pub async fn raw_document(&self, object_id: &str) -> Result<String, MetadataError> {
        let cache_file = self.cache_file(object_id);

        if let Some(path) = &cache_file
            && tokio::fs::try_exists(path).await.unwrap_or(false)
        {
            tracing::debug!("Using cached portal metadata {}", path.display());
            return tokio::fs::read_to_string(path)
                .await
                .map_err(|e| MetadataError::Io {
                    path: path.clone(),
                    message: e.to_string(),
                });
        }

        let body = self.source.fetch(object_id).await?;

        if let Some(path) = &cache_file {
            let io_err = |e: std::io::Error| MetadataError::Io {
                path: path.clone(),
                message: e.to_string(),
            };
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
            }
            tokio::fs::write(path, &body).await.map_err(io_err)?;
            tracing::debug!("Cached portal metadata at {}", path.display());
        }

        Ok(body)
    }

    /// Technical note text for the `modell3d` record of `object_id`
    pub async fn technical_note(&self, object_id: &str) -> Result<String, MetadataError> {
        let body = self.raw_document(object_id).await?;
        let document: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| MetadataError::InvalidDocument {
                object_id: object_id.to_string(),
                message: e.to_string(),
            })?;
        Ok(TechnicalNote::from_document(object_id, &document)?.render())
    }
}
