//! HTML escaping for content the engine emits verbatim.
//!
//! Markdown-bound text goes through the external [`TextRenderer`]
//! collaborator, which does its own sanitization. Tool-use content bypasses
//! markdown entirely and is escaped here.
//!
//! [`TextRenderer`]: tagstream_core::TextRenderer

/// Escape HTML special characters for safe embedding in HTML documents.
pub fn html_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            html_escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn passes_plain_text_through() {
        assert_eq!(html_escape("query terms"), "query terms");
    }
}
