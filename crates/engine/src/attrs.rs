//! Opening-tag attribute scanning.
//!
//! Attributes are `key="value"` or `key='value'` pairs appearing anywhere
//! inside the opening-tag text, in any order. Later duplicate keys
//! overwrite earlier ones. Anything that does not match the attribute
//! syntax is ignored — never an error.

use regex_lite::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// Values are non-empty and may use either quote style. This exact grammar
// is a compatibility contract with upstream tag emitters.
static ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)=["']([^"']+)["']"#).expect("valid attribute pattern"));

/// Scan the raw opening-tag text for attribute pairs.
pub fn extract_attributes(opening_tag: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for caps in ATTR.captures_iter(opening_tag) {
        if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
            attrs.insert(key.as_str().to_string(), value.as_str().to_string());
        }
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_and_single_quotes() {
        let attrs = extract_attributes(r#"<code language="python" title='demo'>"#);
        assert_eq!(attrs.get("language").map(String::as_str), Some("python"));
        assert_eq!(attrs.get("title").map(String::as_str), Some("demo"));
    }

    #[test]
    fn later_duplicates_overwrite() {
        let attrs = extract_attributes(r#"<code language="ruby" language="rust">"#);
        assert_eq!(attrs.get("language").map(String::as_str), Some("rust"));
    }

    #[test]
    fn malformed_attribute_text_is_ignored() {
        let attrs = extract_attributes(r#"<tool_use name= bare =oops name="search">"#);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("name").map(String::as_str), Some("search"));
    }

    #[test]
    fn no_attributes() {
        assert!(extract_attributes("<thinking>").is_empty());
    }
}
