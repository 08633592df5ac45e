//! Prompt-level controller: at most one live generation at a time.

use crate::session::{SessionConfig, SessionState, SessionStatus, StreamSession};
use crate::transport::Transport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use streamui_catalog::Catalog;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::info;

struct Running {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the published UI state across prompts.
///
/// `send` abandons whatever is in flight before starting over; states
/// carry a generation number and a session never overwrites a newer one.
pub struct UiStream {
    transport: Arc<dyn Transport>,
    catalog: Arc<Catalog>,
    config: SessionConfig,
    state: Arc<watch::Sender<SessionState>>,
    generation: AtomicU64,
    running: Mutex<Option<Running>>,
}

impl UiStream {
    pub fn new(transport: Arc<dyn Transport>, catalog: Arc<Catalog>) -> Self {
        let (sender, _) = watch::channel(SessionState::idle(0));
        Self {
            transport,
            catalog,
            config: SessionConfig::default(),
            state: Arc::new(sender),
            generation: AtomicU64::new(0),
            running: Mutex::new(None),
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Start a generation for `prompt`. Must be called inside a tokio
    /// runtime. Returns the new generation number.
    pub fn send(&self, prompt: impl Into<String>) -> u64 {
        let prompt = prompt.into();
        let cancel = CancellationToken::new();

        // Allocated under the lock so generations and `running` advance together
        let mut running = self.lock_running();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = running.take() {
            previous.cancel.cancel();
        }

        self.state
            .send_replace(SessionState::empty(generation, SessionStatus::Streaming));
        info!(generation, "Starting generation");

        let mut session = StreamSession::attached(
            self.catalog.clone(),
            self.config,
            generation,
            self.state.clone(),
        );
        let transport = self.transport.clone();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            session.run(transport.as_ref(), &prompt, token).await;
        });

        *running = Some(Running { cancel, handle });
        generation
    }

    /// Abandon any generation and publish an empty idle state
    pub fn clear(&self) {
        let mut running = self.lock_running();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = running.take() {
            previous.cancel.cancel();
        }
        self.state.send_replace(SessionState::idle(generation));
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Every published state from now on, starting with the current one
    pub fn updates(&self) -> WatchStream<SessionState> {
        WatchStream::new(self.subscribe())
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_streaming(&self) -> bool {
        self.state.borrow().is_streaming()
    }

    /// Wait until the current generation stops streaming
    pub async fn finished(&self) -> SessionState {
        let mut receiver = self.subscribe();
        let state = match receiver.wait_for(|state| !state.is_streaming()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        state
    }

    /// Whether the task of the current generation has exited
    pub fn is_idle(&self) -> bool {
        self.lock_running()
            .as_ref()
            .map_or(true, |running| running.handle.is_finished())
    }

    fn lock_running(&self) -> std::sync::MutexGuard<'_, Option<Running>> {
        self.running
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for UiStream {
    fn drop(&mut self) {
        if let Some(running) = self.lock_running().take() {
            running.cancel.cancel();
        }
    }
}
