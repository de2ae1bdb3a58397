//! Field extraction from flat JSON request bodies.
//!
//! Two strategies live here:
//!
//! - [`flat_object`] parses the body as a real JSON object and renders each
//!   top-level scalar as text. Escapes are resolved and keys nested inside
//!   objects or arrays are never matched.
//! - [`extract_json_value`] is the forgiving `"key":` scanner used for bodies
//!   that are not a JSON object at all (truncated, sloppy, or plain garbage).
//!   It has no escape handling: `"likes \"modern\" style"` yields `likes \`.
//!
//! Neither function fails. Anything unusable degrades to an empty string.

use serde_json::value::RawValue;
use std::collections::HashMap;

/// Scans `json` for `"<key>":` and returns the value text that follows.
///
/// A quoted value runs to the next `"`. A bare token (number, boolean, null)
/// runs to the next `,` or `}` and is trimmed. Returns `""` when the key is
/// absent or the value is cut short.
pub fn extract_json_value(json: &str, key: &str) -> String {
    let search_key = format!("\"{}\":", key);
    let Some(found) = json.find(&search_key) else {
        return String::new();
    };

    let Some(rest) = json.get(found + search_key.len()..) else {
        return String::new();
    };
    let rest = rest.trim_start_matches([' ', ':']);

    if let Some(quoted) = rest.strip_prefix('"') {
        return match quoted.find('"') {
            Some(end) => quoted.get(..end).unwrap_or_default().to_string(),
            None => String::new(),
        };
    }

    if rest.is_empty() {
        return String::new();
    }

    let end = rest.find([',', '}']).unwrap_or(rest.len());
    rest.get(..end).unwrap_or_default().trim().to_string()
}

/// Parses `body` as a single-level JSON object.
///
/// Returns `None` when the body is not a JSON object. Strings are unescaped.
/// Numbers, booleans and `null` keep their exact source text, so `5000000.00`
/// and `1e2` are not re-rendered. Nested objects and arrays render as `""`.
pub fn flat_object(body: &str) -> Option<HashMap<String, String>> {
    let map: HashMap<String, Box<RawValue>> = serde_json::from_str(body).ok()?;
    Some(
        map.into_iter()
            .map(|(key, raw)| (key, scalar_text(&raw)))
            .collect(),
    )
}

fn scalar_text(raw: &RawValue) -> String {
    let text = raw.get();
    match text.as_bytes().first() {
        Some(b'"') => serde_json::from_str::<String>(text).unwrap_or_default(),
        Some(b'{') | Some(b'[') | None => String::new(),
        Some(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_value() {
        let body = r#"{"chatId":"c1","name":"Ana"}"#;
        assert_eq!(extract_json_value(body, "chatId"), "c1");
        assert_eq!(extract_json_value(body, "name"), "Ana");
    }

    #[test]
    fn test_spaces_after_colon() {
        let body = r#"{"chatId":   "c1", "name": "Ana"}"#;
        assert_eq!(extract_json_value(body, "chatId"), "c1");
        assert_eq!(extract_json_value(body, "name"), "Ana");
    }

    #[test]
    fn test_bare_tokens() {
        let body = r#"{"heatScore": 87 ,"budget":5000000,"call":true,"summary":null}"#;
        assert_eq!(extract_json_value(body, "heatScore"), "87");
        assert_eq!(extract_json_value(body, "budget"), "5000000");
        assert_eq!(extract_json_value(body, "call"), "true");
        assert_eq!(extract_json_value(body, "summary"), "null");
    }

    #[test]
    fn test_bare_token_at_end_of_input() {
        assert_eq!(extract_json_value(r#"{"heatScore":42"#, "heatScore"), "42");
    }

    #[test]
    fn test_missing_key_is_empty() {
        assert_eq!(extract_json_value(r#"{"name":"Ana"}"#, "phone"), "");
        assert_eq!(extract_json_value("", "phone"), "");
        assert_eq!(extract_json_value("not json at all", "phone"), "");
    }

    #[test]
    fn test_key_without_value_is_empty() {
        assert_eq!(extract_json_value(r#""name":"#, "name"), "");
        assert_eq!(extract_json_value(r#""name":   "#, "name"), "");
    }

    #[test]
    fn test_unterminated_quote_is_empty() {
        assert_eq!(extract_json_value(r#"{"name":"Ana"#, "name"), "");
    }

    #[test]
    fn test_escaped_quote_truncates() {
        let body = r#"{"summary":"likes \"modern\" style"}"#;
        assert_eq!(extract_json_value(body, "summary"), r"likes \");
    }

    #[test]
    fn test_multibyte_values_survive() {
        let body = r#"{"name":"João","area":"São Paulo"}"#;
        assert_eq!(extract_json_value(body, "name"), "João");
        assert_eq!(extract_json_value(body, "area"), "São Paulo");
    }

    #[test]
    fn test_flat_object_resolves_escapes() {
        let fields = flat_object(r#"{"summary":"likes \"modern\" style"}"#).unwrap();
        assert_eq!(fields["summary"], r#"likes "modern" style"#);
    }

    #[test]
    fn test_flat_object_renders_scalars() {
        let fields =
            flat_object(r#"{"a":1.5,"b":false,"c":null,"d":{"chatId":"x"},"e":[1]}"#).unwrap();
        assert_eq!(fields["a"], "1.5");
        assert_eq!(fields["b"], "false");
        assert_eq!(fields["c"], "null");
        assert_eq!(fields["d"], "");
        assert_eq!(fields["e"], "");
        assert!(!fields.contains_key("chatId"));
    }

    #[test]
    fn test_flat_object_keeps_number_text() {
        let fields = flat_object(
            r#"{"budget":5000000.00,"phone":201001234567890123456,"heatScore":1e2,"area":-0.0}"#,
        )
        .unwrap();
        assert_eq!(fields["budget"], "5000000.00");
        assert_eq!(fields["phone"], "201001234567890123456");
        assert_eq!(fields["heatScore"], "1e2");
        assert_eq!(fields["area"], "-0.0");
    }

    #[test]
    fn test_flat_object_rejects_non_objects() {
        assert!(flat_object("").is_none());
        assert!(flat_object("garbage").is_none());
        assert!(flat_object("[1,2]").is_none());
        assert!(flat_object(r#""chatId""#).is_none());
        assert!(flat_object(r#"{"chatId":"c1""#).is_none());
    }
}
