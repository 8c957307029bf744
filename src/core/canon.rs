//! Purpose: Deterministic JSON canonicalization and in-place file rewrite.
//! Exports: `canonical_json`, `parse_document`, `canonicalize_file`.
//! Invariants: Object keys are emitted in ascending lexicographic order at every depth.
//! Invariants: Indentation is 4 spaces per nesting level; array order is preserved.
//! Invariants: The rewrite is destructive: same path, full replacement, no backup.
use std::fs;
use std::path::Path;

use serde_json::Value;

use super::error::{Error, ErrorKind};

const INDENT: &str = "    ";

/// Render a parsed document in canonical form: sorted keys, 4-space
/// indentation, no trailing whitespace, no trailing newline.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, 0, &mut out);
    out
}

/// Parse UTF-8 text as a single JSON document.
pub fn parse_document(text: &str) -> Result<Value, Error> {
    serde_json::from_str(text).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message(format!(
                "invalid JSON at line {} column {}",
                err.line(),
                err.column()
            ))
            .with_source(err)
    })
}

/// Read `path`, parse it as JSON, and overwrite it with the canonical
/// rendering. Read and parse failures leave the file untouched; once the
/// write starts there is no rollback.
pub fn canonicalize_file(path: &Path) -> Result<(), Error> {
    let text = fs::read_to_string(path).map_err(|err| map_io_error(err, "read", path))?;
    let document = parse_document(&text).map_err(|err| err.with_path(path))?;
    let canonical = canonical_json(&document);
    fs::write(path, canonical).map_err(|err| map_io_error(err, "write", path))
}

fn map_io_error(err: std::io::Error, action: &str, path: &Path) -> Error {
    let kind = match err.kind() {
        std::io::ErrorKind::NotFound => ErrorKind::NotFound,
        std::io::ErrorKind::PermissionDenied => ErrorKind::Permission,
        _ => ErrorKind::Io,
    };
    Error::new(kind)
        .with_message(format!("failed to {action} file"))
        .with_path(path)
        .with_source(err)
}

fn write_value(value: &Value, indent: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(val) => out.push_str(if *val { "true" } else { "false" }),
        Value::Number(num) => out.push_str(&num.to_string()),
        Value::String(text) => {
            let encoded = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
            out.push_str(&encoded);
        }
        Value::Array(items) => write_array(items, indent, out),
        Value::Object(map) => write_object(map, indent, out),
    }
}

fn write_array(items: &[Value], indent: usize, out: &mut String) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    out.push('\n');
    for (idx, item) in items.iter().enumerate() {
        push_indent(indent + 1, out);
        write_value(item, indent + 1, out);
        if idx + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(indent, out);
    out.push(']');
}

fn write_object(map: &serde_json::Map<String, Value>, indent: usize, out: &mut String) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    // Map iteration order depends on serde_json's preserve_order feature;
    // sort explicitly.
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    out.push('{');
    out.push('\n');
    let len = entries.len();
    for (idx, (key, value)) in entries.into_iter().enumerate() {
        push_indent(indent + 1, out);
        let encoded = serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
        out.push_str(&encoded);
        out.push(':');
        out.push(' ');
        write_value(value, indent + 1, out);
        if idx + 1 < len {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(indent, out);
    out.push('}');
}

fn push_indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::{canonical_json, canonicalize_file, parse_document};
    use crate::core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn object_keys_sort_at_every_depth() {
        let value = json!({
            "zeta": {"b": 1, "a": 2},
            "alpha": [{"y": true, "x": false}]
        });
        let text = canonical_json(&value);
        let expected = "{\n    \"alpha\": [\n        {\n            \"x\": false,\n            \"y\": true\n        }\n    ],\n    \"zeta\": {\n        \"a\": 2,\n        \"b\": 1\n    }\n}";
        assert_eq!(text, expected);
    }

    #[test]
    fn flat_object_matches_reference_rendering() {
        let value = parse_document("{\"b\": 2, \"a\": 1}").expect("parse");
        assert_eq!(canonical_json(&value), "{\n    \"a\": 1,\n    \"b\": 2\n}");
    }

    #[test]
    fn array_order_is_preserved() {
        let value = parse_document("[3,1,2]").expect("parse");
        assert_eq!(canonical_json(&value), "[\n    3,\n    1,\n    2\n]");
    }

    #[test]
    fn empty_containers_stay_inline() {
        assert_eq!(canonical_json(&json!({})), "{}");
        assert_eq!(canonical_json(&json!([])), "[]");
        assert_eq!(
            canonical_json(&json!({"a": {}, "b": []})),
            "{\n    \"a\": {},\n    \"b\": []\n}"
        );
    }

    #[test]
    fn scalars_render_bare() {
        assert_eq!(canonical_json(&json!(null)), "null");
        assert_eq!(canonical_json(&json!(true)), "true");
        assert_eq!(canonical_json(&json!(42)), "42");
        assert_eq!(canonical_json(&json!("hi")), "\"hi\"");
    }

    #[test]
    fn strings_keep_json_escapes() {
        let value = json!({"msg": "line1\nline2 \"quoted\""});
        let text = canonical_json(&value);
        assert!(text.contains("\"line1\\nline2 \\\"quoted\\\"\""));
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let value = json!({"c": [1, {"z": null, "a": "x"}], "a": true});
        let once = canonical_json(&value);
        let reparsed = parse_document(&once).expect("canonical output parses");
        assert_eq!(canonical_json(&reparsed), once);
    }

    #[test]
    fn canonicalization_preserves_semantics() {
        let original = parse_document(
            "{\"outer\": {\"b\": [1, 2, 3], \"a\": {\"nested\": false}}, \"top\": null}",
        )
        .expect("parse");
        let reparsed = parse_document(&canonical_json(&original)).expect("reparse");
        assert_eq!(original, reparsed);
    }

    #[test]
    fn no_line_carries_trailing_whitespace() {
        let value = json!({"a": [1, {"b": 2}], "c": "d"});
        let text = canonical_json(&value);
        for line in text.lines() {
            assert_eq!(line, line.trim_end());
        }
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn parse_error_reports_position() {
        let err = parse_document("{not valid json}").expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.message().unwrap().contains("line 1"));
    }

    #[test]
    fn file_rewrite_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{\"b\": 2, \"a\": 1}").expect("seed");
        canonicalize_file(&path).expect("canonicalize");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, "{\n    \"a\": 1,\n    \"b\": 2\n}");
    }

    #[test]
    fn missing_file_maps_to_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        let err = canonicalize_file(&path).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!path.exists());
    }

    #[test]
    fn invalid_json_leaves_file_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not valid json}").expect("seed");
        let err = canonicalize_file(&path).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Parse);
        let content = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "{not valid json}");
    }
}
