use serde_json::Value;

use crate::models::NormalizedResult;

// text fields: plain generation, then conversational models
const TEXT_FIELDS: [&str; 2] = ["generated_text", "generated_response"];

// any payload -> {generated_text}, never fails; blank text fields count as missing
pub fn normalize(payload: &Value) -> NormalizedResult {
    let generated_text = match payload {
        Value::Array(items) if !items.is_empty() => {
            text_field(&items[0]).unwrap_or_else(|| to_text(&items[0]))
        }
        other => text_field(other).unwrap_or_else(|| to_text(other)),
    };
    NormalizedResult { generated_text }
}

fn text_field(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    TEXT_FIELDS
        .iter()
        .filter_map(|name| obj.get(*name).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
        .map(str::to_string)
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(v: Value) -> String {
        normalize(&v).generated_text
    }

    #[test]
    fn array_of_objects_uses_first_element() {
        assert_eq!(text(json!([{ "generated_text": "x" }, { "generated_text": "z" }])), "x");
    }

    #[test]
    fn object_with_field() {
        assert_eq!(text(json!({ "generated_text": "y" })), "y");
    }

    #[test]
    fn generated_response_is_recognized() {
        assert_eq!(text(json!({ "generated_response": "hi" })), "hi");
        assert_eq!(text(json!([{ "generated_response": "hey" }])), "hey");
    }

    #[test]
    fn unknown_object_is_serialized() {
        assert_eq!(text(json!({ "foo": "bar" })), r#"{"foo":"bar"}"#);
    }

    #[test]
    fn first_element_without_field_is_serialized() {
        assert_eq!(text(json!([{ "label": "POSITIVE" }])), r#"{"label":"POSITIVE"}"#);
    }

    #[test]
    fn empty_text_field_counts_as_missing() {
        assert_eq!(text(json!([{ "generated_text": "" }])), r#"{"generated_text":""}"#);
        assert_eq!(text(json!({ "generated_text": "  " })), r#"{"generated_text":"  "}"#);
        assert_eq!(
            text(json!({ "generated_text": "", "generated_response": "fallback" })),
            "fallback"
        );
    }

    #[test]
    fn odd_shapes_never_fail() {
        assert_eq!(text(json!([])), "[]");
        assert_eq!(text(Value::Null), "null");
        assert_eq!(text(json!(42)), "42");
        assert_eq!(text(json!("plain")), "plain");
        // non-string text field falls back to serialization
        assert_eq!(text(json!({ "generated_text": 1 })), r#"{"generated_text":1}"#);
    }
}
