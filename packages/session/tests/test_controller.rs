//! UiStream behaviour across prompts

use async_trait::async_trait;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use streamui_catalog::{space_mission, SPACE_MISSION_EXAMPLE};
use streamui_session::{
    ChunkStream, SessionConfig, SessionStatus, StaticTransport, Transport, TransportError, UiStream,
};

/// Replays a script per prompt, sleeping before every chunk
struct ScriptTransport {
    scripts: HashMap<String, (Vec<String>, Duration)>,
}

impl ScriptTransport {
    fn new() -> Self {
        Self {
            scripts: HashMap::new(),
        }
    }

    fn script(mut self, prompt: &str, text: &str, chunk_size: usize, delay: Duration) -> Self {
        let chunks = text
            .as_bytes()
            .chunks(chunk_size)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect();
        self.scripts.insert(prompt.to_string(), (chunks, delay));
        self
    }
}

#[async_trait]
impl Transport for ScriptTransport {
    async fn open(&self, prompt: &str) -> Result<ChunkStream, TransportError> {
        let Some((chunks, delay)) = self.scripts.get(prompt).cloned() else {
            return Err(TransportError::Rejected("Prompt is required".to_string()));
        };
        Ok(futures::stream::iter(chunks)
            .then(move |chunk| async move {
                tokio::time::sleep(delay).await;
                Ok(chunk.into_bytes())
            })
            .boxed())
    }
}

const SLOW_TREE: &str = concat!(
    r#"{"op":"set","path":"/root","value":"slow"}"#,
    "\n",
    r#"{"op":"add","path":"/elements/slow","value":{"key":"slow","type":"Text","props":{"content":"stale"}}}"#,
    "\n",
);

#[tokio::test]
async fn test_send_runs_to_completion() {
    let stream = UiStream::new(
        Arc::new(StaticTransport::chunked(SPACE_MISSION_EXAMPLE, 7)),
        Arc::new(space_mission()),
    );

    let generation = stream.send("pricing page");
    let state = stream.finished().await;

    assert_eq!(state.generation, generation);
    assert_eq!(state.status, SessionStatus::Completed);
    assert_eq!(state.snapshot.len(), 8);
    assert!(!stream.is_streaming());
}

#[tokio::test]
async fn test_new_prompt_abandons_previous_generation() {
    let transport = ScriptTransport::new()
        .script("slow", SLOW_TREE, 10, Duration::from_millis(20))
        .script("fast", SPACE_MISSION_EXAMPLE, 64, Duration::ZERO);
    let stream = UiStream::new(Arc::new(transport), Arc::new(space_mission()));

    stream.send("slow");
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = stream.send("fast");

    let state = stream.finished().await;
    assert_eq!(state.generation, second);
    assert_eq!(state.snapshot.root(), Some("page"));

    tokio::time::sleep(Duration::from_millis(200)).await;
    let later = stream.state();
    assert_eq!(later.generation, second);
    assert!(later.snapshot.element("slow").is_none());
}

#[tokio::test]
async fn test_clear_publishes_idle_state() {
    let transport = ScriptTransport::new().script("slow", SLOW_TREE, 5, Duration::from_millis(20));
    let stream = UiStream::new(Arc::new(transport), Arc::new(space_mission()));

    stream.send("slow");
    tokio::time::sleep(Duration::from_millis(30)).await;
    stream.clear();

    let state = stream.state();
    assert_eq!(state.status, SessionStatus::Idle);
    assert!(state.snapshot.is_empty());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(stream.state().status, SessionStatus::Idle);
}

#[tokio::test]
async fn test_rejected_prompt_reports_error() {
    let stream = UiStream::new(Arc::new(ScriptTransport::new()), Arc::new(space_mission()));

    stream.send("unknown");
    let state = stream.finished().await;

    assert_eq!(state.error(), Some("Request rejected: Prompt is required"));
    assert!(!state.is_streaming());
}

#[tokio::test]
async fn test_timeout_keeps_partial_tree() {
    let transport = ScriptTransport::new().script("slow", SLOW_TREE, 50, Duration::from_millis(40));
    let stream = UiStream::new(Arc::new(transport), Arc::new(space_mission())).with_config(SessionConfig {
        max_duration: Duration::from_millis(100),
    });

    stream.send("slow");
    let state = stream.finished().await;

    assert_eq!(state.status, SessionStatus::TimedOut);
    assert_eq!(state.snapshot.root(), Some("slow"));
}

#[tokio::test]
async fn test_updates_only_move_forward() {
    let stream = UiStream::new(
        Arc::new(StaticTransport::chunked(SPACE_MISSION_EXAMPLE, 16)),
        Arc::new(space_mission()),
    );
    let mut updates = stream.updates();

    stream.send("pricing page");
    stream.finished().await;

    let mut last_version = 0;
    while let Ok(Some(state)) = tokio::time::timeout(Duration::from_millis(20), updates.next()).await {
        assert!(state.snapshot.version() >= last_version);
        last_version = state.snapshot.version();
    }
    assert!(last_version > 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sends_settle_on_newest_generation() {
    let stream = Arc::new(UiStream::new(
        Arc::new(StaticTransport::chunked(SPACE_MISSION_EXAMPLE, 32)),
        Arc::new(space_mission()),
    ));

    let senders: Vec<_> = (0..16)
        .map(|i| {
            let stream = stream.clone();
            tokio::spawn(async move { stream.send(format!("prompt {i}")) })
        })
        .collect();
    let mut newest = 0;
    for sender in senders {
        newest = newest.max(sender.await.unwrap());
    }
    assert_eq!(newest, 16);

    let state = stream.finished().await;
    assert_eq!(state.generation, newest);
    assert_eq!(state.status, SessionStatus::Completed);
    assert_eq!(state.snapshot.len(), 8);

    stream.clear();
    assert_eq!(stream.state().generation, newest + 1);
    assert_eq!(stream.state().status, SessionStatus::Idle);
}
