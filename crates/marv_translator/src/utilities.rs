//! Helpers for reading fields of untyped ESTree nodes.

use marv_core::text::{Position, SourceLocation, TextRange};
use serde_json::Value;
use std::sync::Arc;

/// The `type` tag of a raw node, if it is an object with one.
pub fn node_type(raw: &Value) -> Option<&str> {
    raw.get("type").and_then(Value::as_str)
}

/// A field that is absent or explicitly `null`.
pub fn is_absent(raw: &Value, field: &str) -> bool {
    raw.get(field).map_or(true, Value::is_null)
}

pub fn get_str<'v>(raw: &'v Value, field: &str) -> Option<&'v str> {
    raw.get(field).and_then(Value::as_str)
}

/// A boolean field, `false` when absent.
pub fn get_flag(raw: &Value, field: &str) -> bool {
    raw.get(field).and_then(Value::as_bool).unwrap_or(false)
}

fn position(raw: &Value) -> Option<Position> {
    let line = raw.get("line")?.as_u64()?;
    let column = raw.get("column")?.as_u64()?;
    Some(Position::new(line as u32, column as u32))
}

/// Read a `loc` object. The file name given by the caller wins over the
/// `source` field some parsers put in `loc`.
pub fn location(raw: &Value, file_name: Option<&Arc<str>>) -> Option<SourceLocation> {
    let loc = raw.get("loc")?;
    let start = position(loc.get("start")?)?;
    let end = position(loc.get("end")?)?;
    let source = file_name
        .cloned()
        .or_else(|| get_str(loc, "source").map(Arc::from));
    Some(SourceLocation::new(source, start, end))
}

/// Read a `range: [start, end]` pair.
pub fn range(raw: &Value) -> Option<TextRange> {
    let pair = raw.get("range")?.as_array()?;
    match pair.as_slice() {
        [start, end] => Some(TextRange::new(start.as_u64()? as u32, end.as_u64()? as u32)),
        _ => None,
    }
}

/// Split a regular expression literal's source text into pattern and flags.
pub fn split_regex(raw: &str) -> Option<(String, String)> {
    let body = raw.strip_prefix('/')?;
    let close = body.rfind('/')?;
    Some((body[..close].to_string(), body[close + 1..].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_and_range() {
        let raw = json!({
            "type": "Identifier",
            "loc": { "start": { "line": 2, "column": 4 }, "end": { "line": 2, "column": 7 } },
            "range": [10, 13]
        });
        let file: Arc<str> = Arc::from("main.js");
        let loc = location(&raw, Some(&file)).unwrap();
        assert_eq!(loc.to_string(), "main.js [2:4-2:7]");
        assert_eq!(range(&raw), Some(TextRange::new(10, 13)));
        assert_eq!(node_type(&raw), Some("Identifier"));
    }

    #[test]
    fn test_missing_location() {
        let raw = json!({ "type": "Identifier", "loc": null, "range": [1] });
        assert!(location(&raw, None).is_none());
        assert!(range(&raw).is_none());
        assert!(is_absent(&raw, "loc"));
        assert!(is_absent(&raw, "init"));
        assert!(!get_flag(&raw, "computed"));
    }

    #[test]
    fn test_split_regex() {
        assert_eq!(
            split_regex("/a\\/b+/gi"),
            Some(("a\\/b+".to_string(), "gi".to_string()))
        );
        assert_eq!(split_regex("abc"), None);
    }
}
