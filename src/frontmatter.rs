//! Parse leading `---`-delimited YAML frontmatter blocks.
//!
//! Used by asset detection to sniff agent definitions (markdown files whose
//! metadata header carries `tools` or `model`) and by display code to pull
//! descriptions out of asset files.

use serde_yaml::Value;

/// Parse content into optional YAML frontmatter (between first `---` and
/// second `---`) and body. Returns `None` if no valid frontmatter
/// (missing delimiters, empty, or not a mapping/null).
pub fn parse_frontmatter_and_body(content: &str) -> Option<(Value, String)> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 3 || lines[0].trim() != "---" {
        return None;
    }
    let end_idx = lines[1..].iter().position(|l| l.trim() == "---")?;
    let end_idx = end_idx + 1;
    let frontmatter_str = lines[1..end_idx].join("\n");
    let body = lines[end_idx + 1..].join("\n");
    let value: Value = serde_yaml::from_str(&frontmatter_str).ok()?;
    if value.as_mapping().is_none() && !value.is_null() {
        return None;
    }
    Some((value, body))
}

/// True if the frontmatter mapping has any of the given top-level keys,
/// compared case-insensitively.
pub fn has_any_key(frontmatter: &Value, keys: &[&str]) -> bool {
    let Some(mapping) = frontmatter.as_mapping() else {
        return false;
    };
    mapping.keys().any(|k| {
        k.as_str()
            .map(|s| keys.iter().any(|key| s.eq_ignore_ascii_case(key)))
            .unwrap_or(false)
    })
}

/// Get a string value from a frontmatter mapping by key (top-level).
pub fn get_str(value: &Value, key: &str) -> Option<String> {
    let mapping = value.as_mapping()?;
    let v = mapping.get(Value::String(key.to_string()))?;
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
