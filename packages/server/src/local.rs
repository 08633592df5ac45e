use crate::error::RequestError;
use crate::service::GenerationService;
use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use streamui_session::{ChunkStream, Transport, TransportError};

/// In-process transport: runs the generation service directly, with the
/// same validation and error mapping the HTTP route applies.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    service: GenerationService,
}

impl LocalTransport {
    pub fn new(service: GenerationService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn open(&self, prompt: &str) -> Result<ChunkStream, TransportError> {
        let prompt = GenerationService::validate(&json!({ "prompt": prompt }))
            .map_err(|err| TransportError::Rejected(err.to_string()))?;

        let stream = self.service.generate(prompt).await.map_err(|err| match err {
            RequestError::Generator(err) => TransportError::Status {
                status: 500,
                message: err.to_string(),
            },
            other => TransportError::Rejected(other.to_string()),
        })?;

        Ok(stream
            .map(|chunk| chunk.map_err(|err| TransportError::Stream(err.to_string())))
            .boxed())
    }
}
