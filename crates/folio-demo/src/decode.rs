//! Percent-encoding of demo payloads.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde_json::{Map, Value};

/// Characters escaped by URI component encoding.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A payload value that is not a valid encoded URI component.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// `%` not followed by two hex digits.
    #[error("Malformed escape at byte {offset} in {value:?}")]
    MalformedEscape { value: String, offset: usize },

    /// Escapes decode to bytes that are not UTF-8.
    #[error("Decoded value is not valid UTF-8: {value:?}")]
    InvalidUtf8 { value: String },
}

/// Decode a URI component.
///
/// Every `%XX` escape is decoded; `+` is left as is.
///
/// # Errors
///
/// Returns [`DecodeError`] on a truncated or non-hex escape, or when the
/// decoded bytes are not valid UTF-8.
pub fn decode_component(value: &str) -> Result<String, DecodeError> {
    let bytes = value.as_bytes();
    for (offset, _) in value.match_indices('%') {
        let valid = bytes
            .get(offset + 1..offset + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(DecodeError::MalformedEscape {
                value: value.to_owned(),
                offset,
            });
        }
    }

    percent_decode_str(value)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| DecodeError::InvalidUtf8 {
            value: value.to_owned(),
        })
}

/// Encode text as a URI component.
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Decode every string leaf of a nested block.
///
/// Objects are decoded recursively. Leaves that are neither strings nor
/// objects are dropped. Key order is preserved.
///
/// # Errors
///
/// Returns the first [`DecodeError`] found.
pub fn decode_block(block: &Map<String, Value>) -> Result<Map<String, Value>, DecodeError> {
    let mut decoded = Map::new();
    for (key, value) in block {
        match value {
            Value::String(s) => {
                decoded.insert(key.clone(), Value::String(decode_component(s)?));
            }
            Value::Object(inner) => {
                decoded.insert(key.clone(), Value::Object(decode_block(inner)?));
            }
            _ => {}
        }
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_component() {
        assert_eq!(
            decode_component("%3Cdiv%20class%3D%22a%22%3E").unwrap(),
            r#"<div class="a">"#
        );
        assert_eq!(decode_component("caf%C3%A9").unwrap(), "café");
        assert_eq!(decode_component("a+b").unwrap(), "a+b");
        assert_eq!(decode_component("").unwrap(), "");
    }

    #[test]
    fn test_decode_component_malformed() {
        assert_eq!(
            decode_component("100%").unwrap_err(),
            DecodeError::MalformedEscape {
                value: "100%".to_owned(),
                offset: 3
            }
        );
        assert!(matches!(
            decode_component("%zz"),
            Err(DecodeError::MalformedEscape { offset: 0, .. })
        ));
        assert!(matches!(
            decode_component("%C3"),
            Err(DecodeError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b/c?d=é"), "a%20b%2Fc%3Fd%3D%C3%A9");
        assert_eq!(encode_component("keep-_.!~*'()"), "keep-_.!~*'()");

        let source = "<template>\n  <p>100% ✓</p>\n</template>";
        assert_eq!(decode_component(&encode_component(source)).unwrap(), source);
    }

    #[test]
    fn test_decode_block_nested() {
        let block = json!({
            "en-US": "Hello%20world",
            "nested": { "deep": "%3Cb%3E", "n": 1 },
            "flag": true,
            "none": null
        });

        let decoded = decode_block(block.as_object().unwrap()).unwrap();

        assert_eq!(
            Value::Object(decoded),
            json!({
                "en-US": "Hello world",
                "nested": { "deep": "<b>" }
            })
        );
    }

    #[test]
    fn test_decode_block_preserves_order() {
        let block = json!({ "zh": "a", "en": "b", "de": "c" });
        let decoded = decode_block(block.as_object().unwrap()).unwrap();
        let keys: Vec<&str> = decoded.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zh", "en", "de"]);
    }

    fn encode_leaves(block: &Map<String, Value>) -> Map<String, Value> {
        block
            .iter()
            .map(|(key, value)| {
                let encoded = match value {
                    Value::String(s) => Value::String(encode_component(s)),
                    Value::Object(inner) => Value::Object(encode_leaves(inner)),
                    other => other.clone(),
                };
                (key.clone(), encoded)
            })
            .collect()
    }

    #[test]
    fn test_decode_block_reencodes_to_original() {
        let plain = json!({
            "en-US": "Hello ✓!",
            "zh-CN": "a+b (c)",
            "nested": { "code": "<style lang=\"scss\">\n.a { color: red; }\n</style>" }
        });
        let encoded = encode_leaves(plain.as_object().unwrap());
        assert_eq!(encoded["en-US"], "Hello%20%E2%9C%93!");
        assert_eq!(encoded["zh-CN"], "a%2Bb%20(c)");

        let decoded = decode_block(&encoded).unwrap();

        assert_eq!(Value::Object(decoded.clone()), plain);
        assert_eq!(encode_leaves(&decoded), encoded);
    }

    #[test]
    fn test_decode_block_error() {
        let block = json!({ "a": { "b": "%E0%A4%A" } });
        assert!(decode_block(block.as_object().unwrap()).is_err());
    }
}
