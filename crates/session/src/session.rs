//! StreamSession — append chunk, re-parse, re-render, publish.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tagstream_core::error::{RenderError, SessionError};
use tagstream_core::{MessageStore, TextRenderer, Theme};
use tagstream_engine::{ArtifactRegistry, ArtifactRenderer};
use tokio::sync::watch;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

/// Fixed user-visible notice substituted for message content when the
/// upstream stream or the render collaborator fails.
pub const STREAM_ERROR_NOTICE: &str =
    "I apologize, but I encountered an error while processing your request. Please try again.";

/// Lifecycle of one in-flight response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No chunk has arrived yet.
    Empty,
    /// Chunks are arriving; every append republishes a fresh render.
    Streaming,
    /// Upstream signaled end-of-stream; the raw buffer was finalized.
    Complete,
    /// Upstream reported an error; the fixed notice was published and no
    /// further updates follow.
    Failed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Empty => "empty",
            SessionState::Streaming => "streaming",
            SessionState::Complete => "complete",
            SessionState::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// The published snapshot. Publication is latest-wins: a subscriber that
/// misses intermediate updates only ever needs the most recent one, which
/// is exactly `tokio::sync::watch` semantics.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedUpdate {
    pub state: SessionState,
    pub html: String,
    pub updated_at: DateTime<Utc>,
}

/// Orchestrates one streaming response: owns the accumulating buffer,
/// re-parses and re-renders it on every chunk, and publishes the latest
/// snapshot. Single writer per session; independent sessions share nothing
/// mutable (the registry is read-only after start-up).
pub struct StreamSession {
    registry: Arc<ArtifactRegistry>,
    text: Arc<dyn TextRenderer>,
    theme: Theme,
    buffer: String,
    state: SessionState,
    updates: watch::Sender<RenderedUpdate>,
}

impl StreamSession {
    pub fn new(registry: Arc<ArtifactRegistry>, text: Arc<dyn TextRenderer>, theme: Theme) -> Self {
        let (updates, _) = watch::channel(RenderedUpdate {
            state: SessionState::Empty,
            html: String::new(),
            updated_at: Utc::now(),
        });
        Self {
            registry,
            text,
            theme,
            buffer: String::new(),
            state: SessionState::Empty,
            updates,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The raw accumulated buffer. This, not rendered markup, is what gets
    /// persisted on completion.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Subscribe to rendered snapshots.
    pub fn subscribe(&self) -> watch::Receiver<RenderedUpdate> {
        self.updates.subscribe()
    }

    /// Append one chunk: grow the buffer, re-parse the whole thing,
    /// re-render, publish.
    ///
    /// A render failure moves the session to `Failed`, publishes the fixed
    /// error notice, and surfaces the error to the caller.
    pub fn push_chunk(&mut self, chunk: &str) -> Result<(), SessionError> {
        match self.state {
            SessionState::Complete | SessionState::Failed => {
                return Err(SessionError::Closed {
                    state: self.state.to_string(),
                });
            }
            SessionState::Empty => {
                debug!("First chunk arrived, session streaming");
                self.state = SessionState::Streaming;
            }
            SessionState::Streaming => {}
        }

        self.buffer.push_str(chunk);
        match self.render_snapshot() {
            Ok(html) => {
                self.publish(html);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Render failed mid-stream, failing session");
                self.fail();
                Err(SessionError::Render(err))
            }
        }
    }

    /// End-of-stream: persist the raw buffer through the external store and
    /// move to `Complete`.
    pub async fn finish(&mut self, store: &dyn MessageStore) -> Result<(), SessionError> {
        match self.state {
            SessionState::Streaming => {
                store.persist(&self.buffer).await?;
                self.state = SessionState::Complete;
                info!(buffer_len = self.buffer.len(), "Session complete, buffer persisted");
                // Final snapshot carries the Complete state.
                match self.render_snapshot() {
                    Ok(html) => self.publish(html),
                    Err(err) => warn!(error = %err, "Final render failed after persist"),
                }
                Ok(())
            }
            // A stream that ended before any chunk has nothing to persist.
            SessionState::Empty => {
                self.state = SessionState::Complete;
                Ok(())
            }
            _ => Err(SessionError::Closed {
                state: self.state.to_string(),
            }),
        }
    }

    /// Upstream error: replace the buffer with the fixed human-readable
    /// notice, render and publish it once, and stop accepting updates.
    pub fn fail(&mut self) {
        if matches!(self.state, SessionState::Complete | SessionState::Failed) {
            return;
        }
        self.state = SessionState::Failed;
        self.buffer = STREAM_ERROR_NOTICE.to_string();
        // The notice is plain ASCII; if even the collaborator refuses it,
        // publish it unrendered rather than publish nothing.
        let html = self
            .render_snapshot()
            .unwrap_or_else(|_| STREAM_ERROR_NOTICE.to_string());
        self.publish(html);
    }

    /// Drive the session from a chunk stream to its terminal state.
    ///
    /// Successful exhaustion finishes and persists; an error item fails the
    /// session and returns the upstream error.
    pub async fn run<S>(&mut self, stream: S, store: &dyn MessageStore) -> Result<(), SessionError>
    where
        S: Stream<Item = Result<String, SessionError>> + Unpin,
    {
        let mut stream = stream;
        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => self.push_chunk(&chunk)?,
                Err(err) => {
                    warn!(error = %err, "Upstream stream error");
                    self.fail();
                    return Err(err);
                }
            }
        }
        self.finish(store).await
    }

    fn render_snapshot(&self) -> Result<String, RenderError> {
        ArtifactRenderer::new(&self.registry, &self.buffer).render(self.theme, self.text.as_ref())
    }

    fn publish(&self, html: String) {
        self.updates.send_replace(RenderedUpdate {
            state: self.state,
            html,
            updated_at: Utc::now(),
        });
    }
}
