//! Cleaning and normalizing model output.
//!
//! The model is asked for JSON but often wraps it in a markdown fence, and
//! the three fields come back as strings, lists or objects depending on the
//! model's mood. Everything is flattened to display strings here.

use serde_json::{Map, Value};

/// Strip markdown code-fence markers (```json and bare ```), then trim.
///
/// Pure string surgery; does not look at the JSON. Idempotent: after one pass
/// no run of three backticks remains.
pub fn clean_model_output(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Render one expected key of the parsed object. Absent or `null` keys get a
/// placeholder sentence.
pub fn normalize_field(parsed: &Map<String, Value>, field: &str) -> String {
    match parsed.get(field) {
        None | Some(Value::Null) => format!("No {} provided.", field),
        Some(value) => format_value(value),
    }
}

/// Flatten a JSON value to a display string.
///
/// - objects: one `Title Cased Key: value` line per entry, in document order
/// - arrays: one line per element
/// - anything else: its plain string form
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, v)| format!("{}: {}", title_case(&key.replace('_', " ")), display(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join("\n"),
        other => display(other),
    }
}

/// Strings bare, everything else inline.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => inline(other),
    }
}

/// Compact one-line rendering for nested values.
fn inline(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(inline).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", quote(k), inline(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Quote a nested string. Single quotes unless the text contains a single
/// quote and no double quote; control characters are escaped.
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

/// Uppercase the first letter of every word and lowercase the rest. A word
/// starts after any non-alphabetic character.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_strips_fences() {
        assert_eq!(clean_model_output("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(clean_model_output("```\n{\"a\": 1}\n```  "), "{\"a\": 1}");
        assert_eq!(clean_model_output("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "```json\n{\"a\":\"b\"}\n```",
            "``````json```",
            "`````` ```` `",
            "prefix ```json {} ``` suffix",
            "````json\n[]\n````",
            "",
            "   ",
        ];
        for raw in samples {
            let once = clean_model_output(raw);
            assert_eq!(clean_model_output(&once), once, "input: {raw:?}");
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("keyword ideas"), "Keyword Ideas");
        assert_eq!(title_case("SEO score"), "Seo Score");
        assert_eq!(title_case("calls-to-action"), "Calls-To-Action");
    }

    #[test]
    fn test_mapping_renders_title_cased_lines() {
        let value = json!({"keyword_ideas": ["x", "y"]});
        assert_eq!(format_value(&value), "Keyword Ideas: ['x', 'y']");

        let value = json!({
            "tone": "friendly",
            "call_to_action": "Sign up today",
            "hashtags": ["#rust", "#seo"],
            "score": 7
        });
        assert_eq!(
            format_value(&value),
            "Tone: friendly\nCall To Action: Sign up today\nHashtags: ['#rust', '#seo']\nScore: 7"
        );
    }

    #[test]
    fn test_sequence_renders_one_line_per_item() {
        let value = json!(["Add hashtags", "Shorten the intro", 3, {"cta": "Buy"}]);
        assert_eq!(
            format_value(&value),
            "Add hashtags\nShorten the intro\n3\n{'cta': 'Buy'}"
        );
    }

    #[test]
    fn test_scalars() {
        assert_eq!(format_value(&json!("plain")), "plain");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(true)), "true");
    }

    #[test]
    fn test_missing_and_null_fields_get_placeholder() {
        let parsed = json!({"analysis": null});
        let map = parsed.as_object().unwrap();
        assert_eq!(normalize_field(map, "analysis"), "No analysis provided.");
        assert_eq!(normalize_field(map, "rewrite"), "No rewrite provided.");
    }

    #[test]
    fn test_nested_string_quoting() {
        assert_eq!(format_value(&json!([["it's"]])), r#"["it's"]"#);
        assert_eq!(format_value(&json!([["plain"]])), "['plain']");
        assert_eq!(
            format_value(&json!([["both ' and \""]])),
            r#"['both \' and "']"#
        );
        assert_eq!(format_value(&json!([["a\nb"]])), r"['a\nb']");
        assert_eq!(
            format_value(&json!({"notes": {"it's": "ok"}})),
            r#"Notes: {"it's": 'ok'}"#
        );
    }
}
