//! # Tagstream Markdown
//!
//! The default [`TextRenderer`] collaborator: CommonMark (GFM) to HTML via
//! the `markdown` crate. Raw HTML in the input is escaped by default — the
//! dangerous-HTML compile options stay off — so output is safe to embed
//! without a separate sanitization pass.

use markdown::{Options, to_html_with_options};

use tagstream_core::error::RenderError;
use tagstream_core::{TextRenderer, Theme};

/// CommonMark/GFM implementation of the text-render seam.
///
/// Output is wrapped in a container `<div>` carrying theme-dependent
/// typography classes, mirroring how the chat UI styles message prose.
#[derive(Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    fn container_classes(theme: Theme) -> &'static str {
        if theme.is_dark() {
            "prose prose-sm prose-invert max-w-none"
        } else {
            "prose prose-sm max-w-none"
        }
    }
}

impl TextRenderer for MarkdownRenderer {
    fn render(&self, text: &str, theme: Theme) -> Result<String, RenderError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        // Options hold non-Sync parse hooks, so they are built per call
        // rather than stored on the renderer.
        let html = to_html_with_options(text, &Options::gfm())
            .map_err(|message| RenderError::Collaborator(message.to_string()))?;

        Ok(format!(
            r#"<div class="{classes}">{html}</div>"#,
            classes = Self::container_classes(theme),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = MarkdownRenderer::new().render("**bold** text", Theme::Light).unwrap();
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("prose"));
        assert!(!html.contains("prose-invert"));
    }

    #[test]
    fn dark_theme_switches_container_classes() {
        let html = MarkdownRenderer::new().render("hi", Theme::Dark).unwrap();
        assert!(html.contains("prose-invert"));
    }

    #[test]
    fn escapes_raw_html_input() {
        let html = MarkdownRenderer::new()
            .render("<script>alert(1)</script>", Theme::Light)
            .unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn renders_fenced_code_blocks() {
        let html = MarkdownRenderer::new()
            .render("```python\nprint(1)\n```", Theme::Light)
            .unwrap();
        assert!(html.contains("<code"));
        assert!(html.contains("print(1)"));
    }

    #[test]
    fn blank_input_renders_nothing() {
        assert_eq!(MarkdownRenderer::new().render("  \n ", Theme::Light).unwrap(), "");
    }
}
