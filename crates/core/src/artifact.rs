//! Artifact and parse-result value objects.
//!
//! These are the core value objects that flow through the engine:
//! a buffer is scanned → typed [`Artifact`]s are extracted → everything
//! left over is aggregated into [`ParsedMessage::remaining_content`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Presentation theme, threaded through every render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

/// A typed, delimited span extracted from a response buffer.
///
/// Completeness semantics:
/// - `complete == true`: `content` spans from the end of the opening tag to
///   the start of the matched closing tag, trimmed of surrounding whitespace.
/// - `complete == false`: no closing tag was found yet; `content` spans to
///   the end of the current buffer. Incomplete artifacts are not errors —
///   they drive the live "still streaming" affordances in the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Which registered artifact kind produced this (e.g. "thinking").
    pub kind: String,

    /// The tag name as captured from the opening tag. Usually equals `kind`,
    /// but the thinking kind also accepts the `think` synonym.
    pub tag_name: String,

    /// The inner text of the artifact, trimmed.
    pub content: String,

    /// `key="value"` pairs scanned out of the opening tag.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    /// Whether a closing tag was found within the current buffer.
    pub complete: bool,
}

impl Artifact {
    /// Whether this artifact belongs to the given kind.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Attribute lookup with a fallback default.
    pub fn attribute_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.attributes.get(key).map(String::as_str).unwrap_or(default)
    }
}

/// The result of one full-buffer scan.
///
/// Artifacts appear in buffer order of their opening tags. All text spans
/// that lie between, before, or after detected artifacts are concatenated
/// in encounter order into one `remaining_content` string, trimmed once at
/// the end. The render-order contract is: artifacts first (detection order),
/// then the aggregated remainder — not positional interleaving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub artifacts: Vec<Artifact>,
    pub remaining_content: String,
}

impl ParsedMessage {
    pub fn has_artifacts(&self) -> bool {
        !self.artifacts.is_empty()
    }

    /// Whether any extracted artifact belongs to the given kind.
    pub fn has_kind(&self, kind: &str) -> bool {
        self.artifacts.iter().any(|a| a.is_kind(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_serializes_with_attributes() {
        let mut attributes = HashMap::new();
        attributes.insert("language".to_string(), "python".to_string());
        let artifact = Artifact {
            kind: "code".into(),
            tag_name: "code".into(),
            content: "print(1)".into(),
            attributes,
            complete: true,
        };

        let json = serde_json::to_string(&artifact).unwrap();
        assert!(json.contains(r#""kind":"code""#));
        assert!(json.contains(r#""language":"python""#));

        let back: Artifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, artifact);
    }

    #[test]
    fn artifact_attribute_fallback() {
        let artifact = Artifact {
            kind: "code".into(),
            tag_name: "code".into(),
            content: String::new(),
            attributes: HashMap::new(),
            complete: false,
        };
        assert_eq!(artifact.attribute_or("language", "text"), "text");
    }

    #[test]
    fn parsed_message_kind_queries() {
        let parsed = ParsedMessage {
            artifacts: vec![Artifact {
                kind: "thinking".into(),
                tag_name: "think".into(),
                content: "hmm".into(),
                attributes: HashMap::new(),
                complete: true,
            }],
            remaining_content: "rest".into(),
        };
        assert!(parsed.has_artifacts());
        assert!(parsed.has_kind("thinking"));
        assert!(!parsed.has_kind("code"));
    }

    #[test]
    fn theme_defaults_to_light() {
        assert_eq!(Theme::default(), Theme::Light);
        assert!(!Theme::Light.is_dark());
        assert!(Theme::Dark.is_dark());
    }
}
