//! Code artifact kind — fenced code blocks with a language header.

use regex_lite::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use tagstream_core::error::RenderError;
use tagstream_core::{Artifact, ArtifactType, TextRenderer, Theme};

use crate::attrs::extract_attributes;

static OPENING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<code(?:\s[^>]*)?>").expect("valid code pattern"));

/// Code blocks. The inner content is wrapped as a markdown fenced block
/// tagged with the `language` attribute (default `"text"`) and handed to
/// the external renderer for highlighting and escaping.
pub struct CodeKind;

impl CodeKind {
    pub const KIND: &'static str = "code";
    pub const DEFAULT_LANGUAGE: &'static str = "text";
}

impl ArtifactType for CodeKind {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn priority(&self) -> u32 {
        20
    }

    fn opening_pattern(&self) -> &Regex {
        &OPENING
    }

    fn tag_name(&self, _opening_tag: &str) -> String {
        Self::KIND.to_string()
    }

    fn closing_pattern(&self, _tag_name: &str) -> Regex {
        Regex::new(r"</code>").expect("valid code closing pattern")
    }

    fn parse_attributes(&self, opening_tag: &str) -> HashMap<String, String> {
        extract_attributes(opening_tag)
    }

    fn render(
        &self,
        artifact: &Artifact,
        theme: Theme,
        text: &dyn TextRenderer,
    ) -> Result<String, RenderError> {
        let language = artifact.attribute_or("language", Self::DEFAULT_LANGUAGE);

        // Markdown fencing delegates highlighting and escaping to the
        // external collaborator.
        let fenced = format!("```{language}\n{}\n```", artifact.content);
        let body = text.render(&fenced, theme)?;

        let status = if artifact.complete {
            ""
        } else {
            r#"<div class="text-xs text-gray-500 mt-1">Code streaming...</div>"#
        };

        Ok(format!(
            r#"<div class="artifact-code mb-3">
  <div class="bg-gray-900 text-gray-100 rounded-lg overflow-hidden">
    <div class="flex items-center justify-between px-4 py-2 bg-gray-800 border-b border-gray-700">
      <span class="text-xs font-medium text-gray-300">{label}</span>
      <button class="text-xs text-gray-400 hover:text-gray-200 transition-colors" onclick="copyCode(this)">Copy</button>
    </div>
    <div class="p-4 text-sm font-mono overflow-x-auto">{body}</div>
  </div>
  {status}
</div>"#,
            label = language.to_uppercase(),
        ))
    }
}
