//! One generation: a chunk stream driven into an interpreter.

use crate::transport::{Transport, TransportError};
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use streamui_catalog::Catalog;
use streamui_protocol::LineAssembler;
use streamui_tree::{Diagnostic, Interpreter, Snapshot};
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Default cap on a single generation
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_duration: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_duration: DEFAULT_MAX_DURATION,
        }
    }
}

/// Lifecycle of the published state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "camelCase")]
pub enum SessionStatus {
    Idle,
    Streaming,
    Completed,
    Cancelled,
    TimedOut,
    Failed(String),
}

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Completed,
    /// Abandoned by the caller; buffered input and the tree are discarded
    Cancelled,
    /// Cut at the maximum duration; the partial tree is kept
    TimedOut,
    /// Transport broke; the partial tree is kept
    Failed(TransportError),
}

impl SessionOutcome {
    fn status(&self) -> SessionStatus {
        match self {
            SessionOutcome::Completed => SessionStatus::Completed,
            SessionOutcome::Cancelled => SessionStatus::Cancelled,
            SessionOutcome::TimedOut => SessionStatus::TimedOut,
            SessionOutcome::Failed(err) => SessionStatus::Failed(err.to_string()),
        }
    }
}

/// What subscribers see after every applied change
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub generation: u64,
    pub snapshot: Snapshot,
    #[serde(flatten)]
    pub status: SessionStatus,
    pub diagnostics: Vec<Diagnostic>,
}

impl SessionState {
    pub fn idle(generation: u64) -> Self {
        Self::empty(generation, SessionStatus::Idle)
    }

    pub(crate) fn empty(generation: u64, status: SessionStatus) -> Self {
        Self {
            generation,
            snapshot: Snapshot::default(),
            status,
            diagnostics: Vec::new(),
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.status == SessionStatus::Streaming
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SessionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Drives one generation
pub struct StreamSession {
    generation: u64,
    config: SessionConfig,
    assembler: LineAssembler,
    interpreter: Interpreter,
    publisher: Arc<watch::Sender<SessionState>>,
}

impl StreamSession {
    /// Standalone session with its own state channel
    pub fn new(catalog: Arc<Catalog>, config: SessionConfig) -> (Self, watch::Receiver<SessionState>) {
        let (sender, receiver) = watch::channel(SessionState::idle(0));
        (Self::attached(catalog, config, 0, Arc::new(sender)), receiver)
    }

    /// Session publishing into a shared channel. States are only written
    /// while no newer generation has published.
    pub(crate) fn attached(
        catalog: Arc<Catalog>,
        config: SessionConfig,
        generation: u64,
        publisher: Arc<watch::Sender<SessionState>>,
    ) -> Self {
        Self {
            generation,
            config,
            assembler: LineAssembler::new(),
            interpreter: Interpreter::new(catalog),
            publisher,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> Snapshot {
        self.interpreter.snapshot()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.interpreter.diagnostics()
    }

    /// Open the transport for `prompt` and consume its stream
    pub async fn run(
        &mut self,
        transport: &dyn Transport,
        prompt: &str,
        cancel: CancellationToken,
    ) -> SessionOutcome {
        self.publish(SessionStatus::Streaming);
        let deadline = Instant::now() + self.config.max_duration;

        let opened = tokio::select! {
            _ = cancel.cancelled() => return self.finish(SessionOutcome::Cancelled),
            opened = tokio::time::timeout_at(deadline, transport.open(prompt)) => opened,
        };

        match opened {
            Ok(Ok(stream)) => self.consume_until(stream, cancel, deadline).await,
            Ok(Err(err)) => self.finish(SessionOutcome::Failed(err)),
            Err(_) => self.finish(SessionOutcome::TimedOut),
        }
    }

    /// Apply chunks as they arrive until the stream ends, `max_duration`
    /// passes, or `cancel` fires
    pub async fn consume<S>(&mut self, stream: S, cancel: CancellationToken) -> SessionOutcome
    where
        S: Stream<Item = Result<Vec<u8>, TransportError>> + Send,
    {
        let deadline = Instant::now() + self.config.max_duration;
        self.consume_until(stream, cancel, deadline).await
    }

    /// Like [`consume`](Self::consume), against a fixed deadline shared
    /// with whatever ran before
    #[instrument(skip_all, fields(generation = self.generation))]
    pub async fn consume_until<S>(
        &mut self,
        stream: S,
        cancel: CancellationToken,
        deadline: Instant,
    ) -> SessionOutcome
    where
        S: Stream<Item = Result<Vec<u8>, TransportError>> + Send,
    {
        info!("Session started");
        self.publish(SessionStatus::Streaming);

        let deadline = tokio::time::sleep_until(deadline);
        tokio::pin!(deadline);
        tokio::pin!(stream);

        let outcome = loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break SessionOutcome::Cancelled,
                _ = &mut deadline => break SessionOutcome::TimedOut,
                next = stream.next() => match next {
                    Some(Ok(chunk)) => {
                        let lines = self.assembler.feed_bytes(&chunk);
                        self.apply_lines(lines);
                    }
                    Some(Err(err)) => break SessionOutcome::Failed(err),
                    None => {
                        let trailing = self.assembler.finish();
                        self.apply_lines(trailing);
                        break SessionOutcome::Completed;
                    }
                },
            }
        };

        self.finish(outcome)
    }

    fn apply_lines(&mut self, lines: impl IntoIterator<Item = String>) {
        let mut dirty = false;
        for line in lines {
            let outcome = self.interpreter.apply(&line);
            dirty |= outcome.changed() || matches!(outcome, streamui_tree::ApplyOutcome::Rejected(_));
        }
        if dirty {
            self.publish(SessionStatus::Streaming);
        }
    }

    fn finish(&mut self, outcome: SessionOutcome) -> SessionOutcome {
        match &outcome {
            SessionOutcome::Completed => {
                info!(elements = self.interpreter.store().len(), "Session completed");
            }
            SessionOutcome::Cancelled => {
                debug!("Session cancelled");
                self.assembler.reset();
                self.interpreter.reset();
            }
            SessionOutcome::TimedOut => {
                warn!(max_duration = ?self.config.max_duration, "Session timed out");
                self.assembler.reset();
            }
            SessionOutcome::Failed(err) => {
                warn!(error = %err, "Session failed");
                self.assembler.reset();
            }
        }

        self.publish(outcome.status());
        outcome
    }

    fn publish(&self, status: SessionStatus) -> bool {
        let generation = self.generation;
        let state = SessionState {
            generation,
            snapshot: self.interpreter.snapshot(),
            status,
            diagnostics: self.interpreter.diagnostics().to_vec(),
        };

        self.publisher.send_if_modified(move |current| {
            if current.generation > generation {
                return false;
            }
            *current = state;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use streamui_catalog::space_mission;

    fn chunks(parts: &[&str]) -> impl Stream<Item = Result<Vec<u8>, TransportError>> + Send {
        let owned: Vec<_> = parts.iter().map(|part| Ok(part.as_bytes().to_vec())).collect();
        stream::iter(owned)
    }

    #[tokio::test]
    async fn test_consume_to_completion() {
        let (mut session, receiver) = StreamSession::new(Arc::new(space_mission()), SessionConfig::default());

        let outcome = session
            .consume(
                chunks(&[
                    "{\"op\":\"set\",\"path\":\"/ro",
                    "ot\",\"value\":\"a\"}\n{\"op\":\"add\",\"path\":\"/elements/a\",",
                    "\"value\":{\"key\":\"a\",\"type\":\"Divider\"}}",
                ]),
                CancellationToken::new(),
            )
            .await;

        assert_eq!(outcome, SessionOutcome::Completed);
        let state = receiver.borrow().clone();
        assert_eq!(state.status, SessionStatus::Completed);
        assert_eq!(state.snapshot.resolve_root().unwrap().component_type, "Divider");
    }

    #[tokio::test]
    async fn test_transport_error_keeps_partial_tree() {
        let (mut session, receiver) = StreamSession::new(Arc::new(space_mission()), SessionConfig::default());
        let items = vec![
            Ok(b"{\"op\":\"set\",\"path\":\"/root\",\"value\":\"a\"}\n{\"op\":".to_vec()),
            Err(TransportError::Stream("connection reset".to_string())),
        ];

        let outcome = session.consume(stream::iter(items), CancellationToken::new()).await;

        assert!(matches!(outcome, SessionOutcome::Failed(_)));
        let state = receiver.borrow().clone();
        assert_eq!(state.snapshot.root(), Some("a"));
        assert_eq!(state.error(), Some("Stream interrupted: connection reset"));
        assert!(state.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_discards_partial_line() {
        let config = SessionConfig {
            max_duration: Duration::from_millis(50),
        };
        let (mut session, receiver) = StreamSession::new(Arc::new(space_mission()), config);
        let slow = chunks(&["{\"op\":\"set\",\"path\":\"/root\",\"value\":\"a\"}\n{\"op\""])
            .chain(stream::pending());

        let outcome = session.consume(slow, CancellationToken::new()).await;

        assert_eq!(outcome, SessionOutcome::TimedOut);
        assert_eq!(receiver.borrow().status, SessionStatus::TimedOut);
        assert_eq!(session.snapshot().root(), Some("a"));
        assert!(session.diagnostics().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_resets_tree() {
        let (mut session, receiver) = StreamSession::new(Arc::new(space_mission()), SessionConfig::default());
        let cancel = CancellationToken::new();
        let pending = chunks(&["{\"op\":\"set\",\"path\":\"/root\",\"value\":\"a\"}\n"]).chain(stream::pending());

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        assert_eq!(session.consume(pending, cancel).await, SessionOutcome::Cancelled);
        let state = receiver.borrow().clone();
        assert_eq!(state.status, SessionStatus::Cancelled);
        assert!(state.snapshot.is_empty());
    }

    /// Opens slowly, then never sends anything
    struct SlowOpen {
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl Transport for SlowOpen {
        async fn open(&self, _prompt: &str) -> Result<crate::ChunkStream, TransportError> {
            tokio::time::sleep(self.delay).await;
            Ok(stream::pending().boxed())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_duration_covers_open_and_stream() {
        let config = SessionConfig {
            max_duration: Duration::from_millis(50),
        };
        let (mut session, _receiver) = StreamSession::new(Arc::new(space_mission()), config);
        let transport = SlowOpen {
            delay: Duration::from_millis(40),
        };

        let started = Instant::now();
        let outcome = session.run(&transport, "page", CancellationToken::new()).await;

        assert_eq!(outcome, SessionOutcome::TimedOut);
        assert!(started.elapsed() <= Duration::from_millis(50), "ran {:?}", started.elapsed());
    }

    #[test]
    fn test_state_serialization() {
        let mut state = SessionState::idle(3);
        state.status = SessionStatus::Failed("boom".to_string());
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["generation"], 3);
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "boom");
        assert_eq!(json["snapshot"], serde_json::json!({"root": null, "elements": {}}));
    }
}
