//! Thinking artifact kind — collapsible reasoning blocks.
//!
//! Matches `<thinking>` and the `<think>` synonym. Either closing spelling
//! closes either opener: models switch spellings mid-stream, so the
//! tolerance is deliberate.

use regex_lite::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use tagstream_core::error::RenderError;
use tagstream_core::{Artifact, ArtifactType, TextRenderer, Theme};

use crate::attrs::extract_attributes;

static OPENING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(thinking|think)(?:\s[^>]*)?>").expect("valid thinking pattern"));

/// Reasoning blocks, rendered as a collapsible disclosure. Expanded while
/// still streaming, collapsed once complete.
pub struct ThinkingKind;

impl ThinkingKind {
    pub const KIND: &'static str = "thinking";
}

impl ArtifactType for ThinkingKind {
    fn kind(&self) -> &str {
        Self::KIND
    }

    // Highest precedence among the built-ins.
    fn priority(&self) -> u32 {
        10
    }

    fn opening_pattern(&self) -> &Regex {
        &OPENING
    }

    /// The captured synonym — "thinking" or "think".
    fn tag_name(&self, opening_tag: &str) -> String {
        OPENING
            .captures(opening_tag)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| Self::KIND.to_string())
    }

    // Either synonym closes either opener, regardless of which one matched.
    fn closing_pattern(&self, _tag_name: &str) -> Regex {
        Regex::new(r"</(thinking|think)>").expect("valid thinking closing pattern")
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
        let body = text.render(&artifact.content, theme)?;
        let status = if artifact.complete { "Thinking..." } else { "Thinking... (ongoing)" };
        let open_state = if artifact.complete { "" } else { " open" };
        let pulse = if artifact.complete {
            ""
        } else {
            r#"<span class="inline-block w-2 h-4 bg-gray-400 animate-pulse ml-1"></span>"#
        };

        Ok(format!(
            r#"<details class="mb-3 artifact-thinking"{open_state}>
  <summary class="cursor-pointer text-sm text-gray-600 hover:text-gray-800 flex items-center">
    <svg class="w-4 h-4 mr-1 transition-transform duration-200" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 5l7 7-7 7"></path></svg>
    {status}
  </summary>
  <div class="mt-2 pl-5 text-sm text-gray-700 bg-gray-50 rounded-lg p-3 border-l-4 border-gray-300">{body}{pulse}</div>
</details>"#
        ))
    }
}
