//! ArtifactRenderer — the parse-once rendering facade.
//!
//! Constructed from a full buffer; the scan runs immediately and the result
//! is cached for the instance's lifetime. Rendering is a pure function of
//! `(buffer, theme)` plus the external text collaborator.

use tagstream_core::error::RenderError;
use tagstream_core::{Artifact, ParsedMessage, TextRenderer, Theme};

use crate::registry::ArtifactRegistry;
use crate::thinking::ThinkingKind;

/// Facade over one parsed buffer: structured accessors plus the final
/// concatenated render.
pub struct ArtifactRenderer<'a> {
    registry: &'a ArtifactRegistry,
    parsed: ParsedMessage,
}

impl<'a> ArtifactRenderer<'a> {
    /// Parse `buffer` once against `registry` and cache the result.
    pub fn new(registry: &'a ArtifactRegistry, buffer: &str) -> Self {
        Self {
            registry,
            parsed: registry.parse(buffer),
        }
    }

    pub fn has_artifacts(&self) -> bool {
        self.parsed.has_artifacts()
    }

    /// Whether any extracted artifact is a thinking block.
    pub fn has_thinking(&self) -> bool {
        self.parsed.has_kind(ThinkingKind::KIND)
    }

    /// Extracted artifacts, in buffer order of their opening tags.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.parsed.artifacts
    }

    /// All non-artifact text, concatenated in encounter order and trimmed.
    pub fn remaining_content(&self) -> &str {
        &self.parsed.remaining_content
    }

    /// The cached parse result.
    pub fn parsed(&self) -> &ParsedMessage {
        &self.parsed
    }

    /// Render every artifact in detection order, then the external render
    /// of the remaining content (when non-empty), concatenated.
    ///
    /// A collaborator failure propagates — the caller decides what to show
    /// in place of the message.
    pub fn render(&self, theme: Theme, text: &dyn TextRenderer) -> Result<String, RenderError> {
        let mut parts = Vec::with_capacity(self.parsed.artifacts.len() + 1);

        for artifact in &self.parsed.artifacts {
            let descriptor = self
                .registry
                .descriptor(&artifact.kind)
                .ok_or_else(|| RenderError::UnknownKind(artifact.kind.clone()))?;
            parts.push(descriptor.render(artifact, theme, text)?);
        }

        if !self.parsed.remaining_content.is_empty() {
            parts.push(text.render(&self.parsed.remaining_content, theme)?);
        }

        Ok(parts.concat())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fake collaborator that returns its input unchanged, so tests can
    /// assert on exact engine output.
    pub(crate) struct EchoText;

    impl TextRenderer for EchoText {
        fn render(&self, text: &str, _theme: Theme) -> Result<String, RenderError> {
            Ok(text.to_string())
        }
    }

    /// Fake collaborator that always fails.
    struct BrokenText;

    impl TextRenderer for BrokenText {
        fn render(&self, _text: &str, _theme: Theme) -> Result<String, RenderError> {
            Err(RenderError::Collaborator("markdown backend down".into()))
        }
    }

    fn registry() -> ArtifactRegistry {
        ArtifactRegistry::builtin().unwrap()
    }

    #[test]
    fn mixed_content_renders_artifacts_then_remainder() {
        let registry = registry();
        let renderer = ArtifactRenderer::new(
            &registry,
            "Starting text<thinking>My thoughts</thinking>Middle text<code>some code</code>End text",
        );

        assert!(renderer.has_artifacts());
        assert!(renderer.has_thinking());
        assert_eq!(renderer.artifacts().len(), 2);

        let html = renderer.render(Theme::Light, &EchoText).unwrap();
        assert!(html.contains("My thoughts"));
        assert!(html.contains("some code"));
        // Gap texts render once, after all artifacts.
        let remainder_at = html.find("Starting textMiddle textEnd text").unwrap();
        let thinking_at = html.find("My thoughts").unwrap();
        assert!(thinking_at < remainder_at);
    }

    #[test]
    fn plain_text_passes_through_collaborator() {
        let registry = registry();
        let renderer = ArtifactRenderer::new(&registry, "plain text");

        assert!(!renderer.has_artifacts());
        assert!(!renderer.has_thinking());
        assert_eq!(renderer.remaining_content(), "plain text");

        let html = renderer.render(Theme::Light, &EchoText).unwrap();
        assert_eq!(html, EchoText.render("plain text", Theme::Light).unwrap());
    }

    #[test]
    fn empty_remainder_is_not_rendered() {
        let registry = registry();
        let renderer = ArtifactRenderer::new(&registry, "<tool_use name=\"search\">query</tool_use>");
        let html = renderer.render(Theme::Light, &EchoText).unwrap();
        assert!(html.contains("Tool Use: search"));
        assert_eq!(renderer.remaining_content(), "");
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let registry = registry();
        let renderer = ArtifactRenderer::new(&registry, "<thinking>A</thinking>mid<code>B</code>end");
        let first = renderer.render(Theme::Dark, &EchoText).unwrap();
        let second = renderer.render(Theme::Dark, &EchoText).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn collaborator_failure_propagates() {
        let registry = registry();
        let renderer = ArtifactRenderer::new(&registry, "<thinking>A</thinking>rest");
        let err = renderer.render(Theme::Light, &BrokenText).unwrap_err();
        assert!(matches!(err, RenderError::Collaborator(_)));
    }

    #[test]
    fn tool_use_render_is_escaped_not_markdown() {
        let registry = registry();
        let renderer =
            ArtifactRenderer::new(&registry, "<tool_use name=\"search\"># not a heading</tool_use>");
        // EchoText would pass markdown through unchanged; the engine must
        // never send tool payloads to the collaborator at all.
        let html = renderer.render(Theme::Light, &BrokenText).unwrap();
        assert!(html.contains("# not a heading"));
    }
}
