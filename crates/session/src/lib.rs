//! # Tagstream Session
//!
//! The streaming session state machine: one assistant response being
//! incrementally produced, repeatedly re-parsed, re-rendered, and published
//! to subscribers as chunks arrive.
//!
//! State machine: `Empty → Streaming → {Complete | Failed}`. No parser
//! state survives between chunks — every transition re-derives everything
//! from the full accumulated buffer, so partial tags mid-chunk can never
//! corrupt later parses.

mod session;

pub use session::{RenderedUpdate, SessionState, StreamSession, STREAM_ERROR_NOTICE};

// Re-export the session error for callers that only depend on this crate.
pub use tagstream_core::error::SessionError;
