//! External collaborator seams.
//!
//! The engine deliberately does not own markdown conversion or message
//! persistence. Both are defined as traits here so the surrounding
//! application (or a test) can plug in its own implementation.

use async_trait::async_trait;

use crate::artifact::Theme;
use crate::error::{RenderError, StoreError};

/// Renders plain/markdown text to sanitized presentation markup.
///
/// Implementations are expected to escape unsafe markup themselves; the
/// engine never performs its own HTML escaping for markdown-bound text
/// (it does escape raw tool-use content, which bypasses this seam).
pub trait TextRenderer: Send + Sync {
    fn render(&self, text: &str, theme: Theme) -> std::result::Result<String, RenderError>;
}

/// Persists the raw buffer of a finished response.
///
/// Only the accumulated buffer is ever persisted — rendered markup is
/// recomputed from it on demand.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn persist(&self, buffer: &str) -> std::result::Result<(), StoreError>;
}
