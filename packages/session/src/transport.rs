//! Chunk sources for a generation session.

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

/// Stream of raw text chunks as the producer emits them
pub type ChunkStream = BoxStream<'static, Result<Vec<u8>, TransportError>>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Stream interrupted: {0}")]
    Stream(String),
}

/// Opens a chunk stream for a prompt
#[async_trait]
pub trait Transport: Send + Sync {
    async fn open(&self, prompt: &str) -> Result<ChunkStream, TransportError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Streams the response body of `POST {endpoint}` with `{"prompt": ...}`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open(&self, prompt: &str) -> Result<ChunkStream, TransportError> {
        debug!(endpoint = %self.endpoint, "Opening generation stream");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|err| TransportError::Connect(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|parsed| parsed.error)
                .unwrap_or(body);
            return Err(if status.as_u16() == 400 {
                TransportError::Rejected(message)
            } else {
                TransportError::Status {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|err| TransportError::Stream(err.to_string()))
            })
            .boxed())
    }
}

/// In-memory transport replaying fixed chunks for any prompt
#[derive(Debug, Clone, Default)]
pub struct StaticTransport {
    chunks: Vec<Vec<u8>>,
}

impl StaticTransport {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }

    /// Split `text` into chunks of at most `chunk_size` bytes
    pub fn chunked(text: &str, chunk_size: usize) -> Self {
        Self::new(text.as_bytes().chunks(chunk_size.max(1)).map(<[u8]>::to_vec))
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn open(&self, _prompt: &str) -> Result<ChunkStream, TransportError> {
        Ok(futures::stream::iter(self.chunks.clone().into_iter().map(Ok)).boxed())
    }
}
