use crate::error::GeneratorError;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use streamui_protocol::Operation;
use streamui_tree::UiTree;
use tracing::info;

/// Raw protocol text as the model emits it
pub type TextStream = BoxStream<'static, Result<Vec<u8>, GeneratorError>>;

/// Input handed to a generator
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: Arc<str>,
    pub prompt: String,
}

/// The model call
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<TextStream, GeneratorError>;
}

/// Replays a fixed protocol script in fixed-size chunks, whatever the prompt
#[derive(Debug, Clone)]
pub struct ScriptedGenerator {
    script: String,
    chunk_size: usize,
    delay: Duration,
}

impl ScriptedGenerator {
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            chunk_size: 64,
            delay: Duration::ZERO,
        }
    }

    /// Script rebuilding `tree`, parents first
    pub fn from_tree(tree: &UiTree) -> Self {
        let mut script = String::new();
        for operation in tree.to_operations() {
            script.push_str(&operation.to_line());
            script.push('\n');
        }
        Self::new(script)
    }

    /// Script of the built-in demo page
    pub fn demo() -> Self {
        Self::from_tree(&crate::demo::demo_tree())
    }

    /// Chunk size in bytes; chunks may end inside a multi-byte character
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Pause before every chunk
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.script
            .lines()
            .filter_map(|line| Operation::parse(line).ok())
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<TextStream, GeneratorError> {
        info!(
            prompt_len = request.prompt.len(),
            bytes = self.script.len(),
            chunk_size = self.chunk_size,
            "Replaying scripted generation"
        );

        let chunks: Vec<Vec<u8>> = self
            .script
            .as_bytes()
            .chunks(self.chunk_size)
            .map(<[u8]>::to_vec)
            .collect();
        let delay = self.delay;

        Ok(stream::iter(chunks)
            .then(move |chunk| async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok::<_, GeneratorError>(chunk)
            })
            .boxed())
    }
}
