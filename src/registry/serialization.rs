//! Registry document (de)serialization
//!
//! The on-disk document is normalized here, in one place, before any
//! business logic sees it: missing lists default to empty, unknown fields
//! are ignored, and source records written by old versions (which carried a
//! bare `url` field instead of the tagged `origin` object) are rewritten to
//! the current tagged shape by inspecting which fields are present.

use serde_json::{Map, Value, json};

use super::StoreData;

/// Parse the registry document text, tolerating legacy record shapes.
///
/// Returns `None` when the text is not valid JSON; callers treat that as an
/// empty-but-valid store.
pub fn parse_store(text: &str) -> Option<StoreData> {
    let mut value: Value = serde_json::from_str(text).ok()?;

    if let Some(sources) = value.get_mut("sources").and_then(Value::as_array_mut) {
        for source in sources.iter_mut() {
            normalize_source(source);
        }
    }

    serde_json::from_value(value).ok()
}

/// Serialize the store for writing (pretty-printed, current shape only)
pub fn store_to_json(data: &StoreData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

/// Rewrite one source record to the current tagged-origin shape.
///
/// Current records carry an `origin` object with a `kind` discriminant.
/// Legacy records lack `origin`; a non-empty `url` string marks a remote
/// source, anything else is local.
fn normalize_source(source: &mut Value) {
    let Some(record) = source.as_object_mut() else {
        return;
    };
    if record.contains_key("origin") {
        return;
    }

    let url = record
        .remove("url")
        .and_then(|v| v.as_str().map(str::to_string))
        .filter(|s| !s.is_empty());

    let origin = match url {
        Some(url) => {
            let (owner, repo) = owner_repo_from_url(&url);
            json!({ "kind": "remote", "url": url, "owner": owner, "repo": repo })
        }
        None => json!({ "kind": "local" }),
    };
    record.insert("origin".to_string(), origin);

    rename_field(record, "updatedAt", &["lastUpdated", "refreshedAt"]);
}

/// Keep the first present legacy field under the current name
fn rename_field(record: &mut Map<String, Value>, current: &str, legacy: &[&str]) {
    if record.contains_key(current) {
        return;
    }
    for name in legacy {
        if let Some(value) = record.remove(*name) {
            record.insert(current.to_string(), value);
            return;
        }
    }
}

/// Derive owner/repo from the trailing path segments of a git URL
pub fn owner_repo_from_url(url: &str) -> (String, String) {
    let trimmed = url.trim_end_matches('/').trim_end_matches(".git");
    let path = match trimmed.rfind(':') {
        Some(idx) if !trimmed[idx..].starts_with(":/") => &trimmed[idx + 1..],
        _ => trimmed,
    };
    let mut parts = path.split('/').filter(|s| !s.is_empty()).rev();
    let repo = parts.next().unwrap_or("unknown").to_string();
    let owner = parts.next().unwrap_or("unknown").to_string();
    (owner, repo)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::registry::SourceOrigin;

    #[test]
    fn test_parse_invalid_json_is_none() {
        assert!(parse_store("{not json").is_none());
    }

    #[test]
    fn test_parse_empty_object_defaults() {
        let data = parse_store("{}").expect("parse");
        assert!(data.sources.is_empty());
        assert!(data.selections.is_empty());
        assert!(data.staged_entries.is_empty());
    }

    #[test]
    fn test_parse_tolerates_unknown_fields() {
        let data = parse_store(r#"{"sources": [], "futureField": 42}"#).expect("parse");
        assert!(data.sources.is_empty());
    }

    #[test]
    fn test_legacy_remote_source_normalized() {
        let text = r#"{
            "sources": [{
                "alias": "abcd",
                "url": "https://github.com/octo/spoon.git",
                "path": "/cache/abcd",
                "lastUpdated": 99
            }]
        }"#;
        let data = parse_store(text).expect("parse");
        assert_eq!(data.sources.len(), 1);
        let source = &data.sources[0];
        assert_eq!(source.updated_at, 99);
        match &source.origin {
            SourceOrigin::Remote { owner, repo, .. } => {
                assert_eq!(owner, "octo");
                assert_eq!(repo, "spoon");
            }
            SourceOrigin::Local => panic!("expected remote origin"),
        }
    }

    #[test]
    fn test_legacy_local_source_normalized() {
        let text = r#"{"sources": [{"alias": "xy", "path": "/cache/xy"}]}"#;
        let data = parse_store(text).expect("parse");
        assert_eq!(data.sources[0].origin, SourceOrigin::Local);
    }

    #[test]
    fn test_current_shape_passes_through() {
        let text = r#"{
            "sources": [{
                "alias": "octo.spoon",
                "origin": {"kind": "remote", "url": "u", "owner": "octo", "repo": "spoon"},
                "path": "/cache/octo.spoon",
                "assets": [],
                "updatedAt": 1
            }],
            "selections": [],
            "stagedEntries": []
        }"#;
        let data = parse_store(text).expect("parse");
        assert_eq!(data.sources[0].alias, "octo.spoon");
        assert!(data.sources[0].origin.is_remote());
    }

    #[test]
    fn test_owner_repo_from_url() {
        assert_eq!(
            owner_repo_from_url("https://github.com/octo/spoon.git"),
            ("octo".to_string(), "spoon".to_string())
        );
        assert_eq!(
            owner_repo_from_url("git@github.com:octo/spoon.git"),
            ("octo".to_string(), "spoon".to_string())
        );
        assert_eq!(
            owner_repo_from_url("https://github.com/octo/spoon/"),
            ("octo".to_string(), "spoon".to_string())
        );
    }

    #[test]
    fn test_round_trip_current_shape() {
        let text = r#"{"sources": [{"alias": "a.b", "origin": {"kind": "local"}, "path": "/p"}]}"#;
        let data = parse_store(text).expect("parse");
        let json = store_to_json(&data).expect("serialize");
        let back = parse_store(&json).expect("reparse");
        assert_eq!(back.sources[0].alias, "a.b");
    }
}
