//! Tool-use artifact kind — bordered callouts for tool invocations.
//!
//! Tool payloads are machine output, not prose: the content is shown
//! verbatim and HTML-escaped by the engine itself, never markdown-rendered.

use regex_lite::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use tagstream_core::error::RenderError;
use tagstream_core::{Artifact, ArtifactType, TextRenderer, Theme};

use crate::attrs::extract_attributes;
use crate::escape::html_escape;

static OPENING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<tool_use(?:\s[^>]*)?>").expect("valid tool_use pattern"));

/// Tool-invocation records.
pub struct ToolUseKind;

impl ToolUseKind {
    pub const KIND: &'static str = "tool_use";
    pub const UNKNOWN_TOOL: &'static str = "Unknown Tool";
}

impl ArtifactType for ToolUseKind {
    fn kind(&self) -> &str {
        Self::KIND
    }

    // Lowest precedence among the built-ins.
    fn priority(&self) -> u32 {
        30
    }

    fn opening_pattern(&self) -> &Regex {
        &OPENING
    }

    fn tag_name(&self, _opening_tag: &str) -> String {
        Self::KIND.to_string()
    }

    fn closing_pattern(&self, _tag_name: &str) -> Regex {
        Regex::new(r"</tool_use>").expect("valid tool_use closing pattern")
    }

    fn parse_attributes(&self, opening_tag: &str) -> HashMap<String, String> {
        extract_attributes(opening_tag)
    }

    fn render(
        &self,
        artifact: &Artifact,
        _theme: Theme,
        _text: &dyn TextRenderer,
    ) -> Result<String, RenderError> {
        let tool_name = html_escape(artifact.attribute_or("name", Self::UNKNOWN_TOOL));
        let payload = html_escape(&artifact.content);

        let status = if artifact.complete {
            ""
        } else {
            r#"<div class="text-xs text-blue-600 mt-1">Tool executing...</div>"#
        };

        Ok(format!(
            r#"<div class="artifact-tool-use mb-3 bg-blue-50 border border-blue-200 rounded-lg p-3">
  <div class="flex items-center mb-2">
    <span class="text-sm font-medium text-blue-800">Tool Use: {tool_name}</span>
  </div>
  <pre class="text-xs text-blue-700 bg-blue-100 p-2 rounded overflow-x-auto whitespace-pre-wrap">{payload}</pre>
  {status}
</div>"#
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::tests::EchoText;

    fn artifact(content: &str, name: Option<&str>, complete: bool) -> Artifact {
        let mut attributes = HashMap::new();
        if let Some(name) = name {
            attributes.insert("name".to_string(), name.to_string());
        }
        Artifact {
            kind: ToolUseKind::KIND.into(),
            tag_name: "tool_use".into(),
            content: content.into(),
            attributes,
            complete,
        }
    }

    #[test]
    fn renders_tool_name_and_payload() {
        let html = ToolUseKind
            .render(&artifact("query", Some("search"), true), Theme::Light, &EchoText)
            .unwrap();
        assert!(html.contains("Tool Use: search"));
        assert!(html.contains("<pre"));
        assert!(html.contains("query"));
        assert!(!html.contains("executing"));
    }

    #[test]
    fn defaults_missing_name() {
        let html = ToolUseKind
            .render(&artifact("{}", None, true), Theme::Light, &EchoText)
            .unwrap();
        assert!(html.contains("Unknown Tool"));
    }

    #[test]
    fn escapes_content_and_name() {
        let html = ToolUseKind
            .render(
                &artifact("<script>alert(1)</script>", Some("a<b>"), true),
                Theme::Light,
                &EchoText,
            )
            .unwrap();
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Tool Use: a&lt;b&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn shows_executing_indicator_while_incomplete() {
        let html = ToolUseKind
            .render(&artifact("partial", Some("search"), false), Theme::Light, &EchoText)
            .unwrap();
        assert!(html.contains("Tool executing..."));
    }
}
