//! # StreamUI Session
//!
//! Asynchronous consumption of a generation stream.
//!
//! A [`StreamSession`] reads chunks from a [`Transport`], assembles lines,
//! applies them in order and publishes a [`SessionState`] through a
//! `tokio::sync::watch` channel after every change. Readers on their own
//! tick therefore always see a fully applied snapshot.
//!
//! [`UiStream`] sits on top: one prompt at a time, abandoning the previous
//! generation whenever a new prompt is sent or the stream is cleared.
//!
//! ```rust,ignore
//! let stream = UiStream::new(Arc::new(HttpTransport::new(url)), Arc::new(space_mission()));
//! stream.send("A lunar mission landing page");
//! let state = stream.finished().await;
//! println!("{} elements", state.snapshot.len());
//! ```

mod controller;
mod session;
mod transport;

pub use controller::UiStream;
pub use session::{
    SessionConfig, SessionOutcome, SessionState, SessionStatus, StreamSession, DEFAULT_MAX_DURATION,
};
pub use transport::{ChunkStream, HttpTransport, StaticTransport, Transport, TransportError};
pub use tokio_util::sync::CancellationToken;
