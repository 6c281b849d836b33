//! Pretty-printed flat JSON object format.

use propgen_core::{Charset, Format, PropertySet, SortedProperties, json_value_to_string};
use serde_json::Value;

use crate::{Codec, CodecError, Result};

/// Codec for the `json` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn serialize(&self, properties: &SortedProperties, charset: Charset) -> Result<Vec<u8>> {
        let mut text = serde_json::to_string_pretty(properties)?;
        text.push('\n');
        Ok(encode_escaping(&text, charset))
    }

    fn deserialize(&self, bytes: &[u8], charset: Charset) -> Result<PropertySet> {
        let text = charset.decode(bytes)?;
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map
                .iter()
                .map(|(key, value)| (key.as_str(), json_value_to_string(value)))
                .collect()),
            other => Err(CodecError::NotAnObject {
                found: kind(&other),
            }),
        }
    }
}

/// Encode JSON text, escaping characters the charset cannot represent.
///
/// serde_json only emits non-ASCII characters inside string literals, so a
/// `\uXXXX` escape in their place keeps the document valid.
fn encode_escaping(text: &str, charset: Charset) -> Vec<u8> {
    if charset == Charset::Utf8 {
        return text.as_bytes().to_vec();
    }

    let mut out = Vec::with_capacity(text.len());
    let mut units = [0u16; 2];
    for ch in text.chars() {
        if charset.can_encode(ch) {
            out.push(ch as u32 as u8);
        } else {
            for unit in ch.encode_utf16(&mut units) {
                out.extend_from_slice(format!("\\u{:04x}", unit).as_bytes());
            }
        }
    }
    out
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(entries: &[(&str, &str)]) -> SortedProperties {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_serialize_is_pretty_and_sorted() {
        let props = sorted(&[("git.commit.id", "abc123"), ("git.branch", "main")]);
        let bytes = JsonCodec.serialize(&props, Charset::Utf8).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        insta::assert_snapshot!(text.trim_end(), @r#"
        {
          "git.branch": "main",
          "git.commit.id": "abc123"
        }
        "#);
    }

    #[test]
    fn test_serialize_empty() {
        let bytes = JsonCodec
            .serialize(&SortedProperties::new(), Charset::Utf8)
            .unwrap();
        assert_eq!(bytes, b"{}\n");
    }

    #[test]
    fn test_serialize_utf8_keeps_characters() {
        let props = sorted(&[("git.commit.user.name", "Zoë")]);
        let bytes = JsonCodec.serialize(&props, Charset::Utf8).unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("\"Zoë\""));
    }

    #[test]
    fn test_serialize_latin1_escapes_unmappable() {
        let props = sorted(&[("name", "é€")]);
        let bytes = JsonCodec.serialize(&props, Charset::Latin1).unwrap();

        assert!(bytes.contains(&0xE9));
        let text = Charset::Latin1.decode(&bytes).unwrap();
        assert!(text.contains(r"\u20ac"));

        let parsed = JsonCodec.deserialize(&bytes, Charset::Latin1).unwrap();
        assert_eq!(parsed.get("name"), Some("é€"));
    }

    #[test]
    fn test_serialize_ascii_escapes_surrogate_pairs() {
        let props = sorted(&[("emoji", "😀")]);
        let bytes = JsonCodec.serialize(&props, Charset::UsAscii).unwrap();

        assert!(bytes.is_ascii());
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains(r"\ud83d\ude00"));
        let parsed = JsonCodec.deserialize(&bytes, Charset::UsAscii).unwrap();
        assert_eq!(parsed.get("emoji"), Some("😀"));
    }

    #[test]
    fn test_deserialize_stringifies_scalars() {
        let parsed = JsonCodec
            .deserialize(
                br#"{"count": 3, "dirty": true, "ratio": 0.5, "tag": null}"#,
                Charset::Utf8,
            )
            .unwrap();

        assert_eq!(parsed.get("count"), Some("3"));
        assert_eq!(parsed.get("dirty"), Some("true"));
        assert_eq!(parsed.get("ratio"), Some("0.5"));
        assert_eq!(parsed.get("tag"), Some("null"));
    }

    #[test]
    fn test_deserialize_rejects_non_object() {
        let err = JsonCodec.deserialize(b"[1, 2]", Charset::Utf8).unwrap_err();
        assert!(matches!(err, CodecError::NotAnObject { found: "an array" }));
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let err = JsonCodec
            .deserialize(b"git.commit.id=abc123", Charset::Utf8)
            .unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn test_deserialize_rejects_invalid_utf8() {
        let err = JsonCodec
            .deserialize(&[b'{', 0xFF, b'}'], Charset::Utf8)
            .unwrap_err();
        assert!(matches!(err, CodecError::Charset(_)));
    }
}
