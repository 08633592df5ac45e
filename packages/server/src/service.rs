use crate::error::RequestError;
use crate::generator::{GenerationRequest, Generator, TextStream};
use futures::StreamExt;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use streamui_catalog::{instructions, Catalog};
use streamui_session::DEFAULT_MAX_DURATION;
use tracing::{info, warn};

/// Validates prompts and runs the generator with the catalog's
/// instructions. Shared by the HTTP routes and [`LocalTransport`](crate::LocalTransport).
#[derive(Clone)]
pub struct GenerationService {
    generator: Arc<dyn Generator>,
    catalog: Arc<Catalog>,
    system_prompt: Arc<str>,
    max_duration: Duration,
}

impl GenerationService {
    pub fn new(generator: Arc<dyn Generator>, catalog: Arc<Catalog>) -> Self {
        let system_prompt = Arc::from(instructions::system_prompt(&catalog, None));
        Self {
            generator,
            catalog,
            system_prompt,
            max_duration: DEFAULT_MAX_DURATION,
        }
    }

    /// Append a worked example to the system prompt
    pub fn with_example(mut self, example: &str) -> Self {
        self.system_prompt = Arc::from(instructions::system_prompt(&self.catalog, Some(example)));
        self
    }

    /// Upper bound on how long a single response may stream
    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = max_duration;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }

    /// Extract the prompt from a request body
    pub fn validate(body: &Value) -> Result<String, RequestError> {
        match body.get("prompt") {
            Some(Value::String(prompt)) if !prompt.trim().is_empty() => Ok(prompt.clone()),
            _ => Err(RequestError::MissingPrompt),
        }
    }

    /// Parse and validate a raw request body
    pub fn parse_body(body: &[u8]) -> Result<String, RequestError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|err| RequestError::InvalidBody(err.to_string()))?;
        Self::validate(&value)
    }

    /// Start generating for `prompt`. The returned stream ends on its own
    /// once `max_duration` has elapsed.
    pub async fn generate(&self, prompt: String) -> Result<TextStream, RequestError> {
        if prompt.trim().is_empty() {
            return Err(RequestError::MissingPrompt);
        }

        let request = GenerationRequest {
            system_prompt: self.system_prompt.clone(),
            prompt,
        };
        info!(prompt_len = request.prompt.len(), "Generating UI");

        let stream = self.generator.generate(&request).await.map_err(|err| {
            warn!(error = %err, "Generator failed to start");
            err
        })?;

        let deadline = tokio::time::sleep(self.max_duration);
        Ok(stream
            .take_until(deadline)
            .inspect(|chunk| {
                if let Err(err) = chunk {
                    warn!(error = %err, "Generation interrupted");
                }
            })
            .boxed())
    }
}

impl std::fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationService")
            .field("catalog", &self.catalog.name)
            .field("max_duration", &self.max_duration)
            .finish_non_exhaustive()
    }
}
