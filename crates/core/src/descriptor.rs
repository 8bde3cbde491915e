//! ArtifactType trait — the descriptor contract for artifact kinds.
//!
//! Each artifact kind (thinking, code, tool_use, ...) implements this trait
//! and is registered with the engine's registry at process start-up. The
//! registry dispatches through an explicit ordered table of descriptors
//! rather than an open class hierarchy, so adding a kind never touches the
//! scan loop.

use regex_lite::Regex;
use std::collections::HashMap;

use crate::artifact::{Artifact, Theme};
use crate::collaborator::TextRenderer;
use crate::error::RenderError;

/// The descriptor contract implemented by every artifact kind.
///
/// A descriptor supplies five capabilities on top of its identity:
/// an opening-pattern matcher, a tag-name extractor, a closing-pattern
/// builder, an attribute extractor, and a renderer.
pub trait ArtifactType: Send + Sync {
    /// Stable identifier for this kind (e.g. "thinking", "code").
    fn kind(&self) -> &str;

    /// Tie-break rank when multiple kinds match at the same buffer offset.
    /// Lower wins. Fixed at registration time for the process lifetime.
    fn priority(&self) -> u32;

    /// Pattern that matches this kind's opening tag anywhere in a buffer.
    fn opening_pattern(&self) -> &Regex;

    /// Extract the tag name from the matched opening-tag text.
    fn tag_name(&self, opening_tag: &str) -> String;

    /// Build the closing pattern for the captured tag name.
    fn closing_pattern(&self, tag_name: &str) -> Regex;

    /// Scan the raw opening-tag text for `key="value"` / `key='value'`
    /// pairs. Later duplicate keys overwrite earlier ones; text that does
    /// not match the attribute syntax is ignored.
    fn parse_attributes(&self, opening_tag: &str) -> HashMap<String, String>;

    /// Render one extracted artifact to presentation markup.
    ///
    /// Markdown-bearing kinds delegate their inner content to `text`, the
    /// external plain-text collaborator; a collaborator failure propagates.
    fn render(
        &self,
        artifact: &Artifact,
        theme: Theme,
        text: &dyn TextRenderer,
    ) -> std::result::Result<String, RenderError>;
}
