//! # Tagstream Engine
//!
//! The artifact extraction & rendering engine: an ordered registry of
//! artifact-kind descriptors, the full-buffer scan that turns a (possibly
//! still-growing) response buffer into typed artifacts, the three built-in
//! kinds, and the [`ArtifactRenderer`] facade.
//!
//! The scan is a pure, stateless function of the buffer: streaming callers
//! re-parse the whole accumulated buffer on every chunk instead of carrying
//! incremental parser state, which keeps behavior under partial and
//! malformed tags trivially correct.

pub mod attrs;
pub mod code;
pub mod escape;
pub mod registry;
pub mod renderer;
pub mod thinking;
pub mod tool_use;

pub use code::CodeKind;
pub use registry::ArtifactRegistry;
pub use renderer::ArtifactRenderer;
pub use thinking::ThinkingKind;
pub use tool_use::ToolUseKind;
