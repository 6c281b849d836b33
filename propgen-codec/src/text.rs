//! Line-oriented `key=value` properties format.
//!
//! Files are written as pure ASCII: every character outside the printable
//! ASCII range is stored as a `\uXXXX` escape, so the bytes on disk do not
//! depend on the configured charset. Reading decodes with the charset first
//! and then resolves escapes.

use std::fmt::Write as _;

use propgen_core::{Charset, Format, PropertySet, SortedProperties};

use crate::{Codec, CodecError, Result};

/// Comment line written at the top of every generated file.
pub const HEADER: &str = "#Generated by propgen";

/// Codec for the `properties` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPropertiesCodec;

impl Codec for TextPropertiesCodec {
    fn format(&self) -> Format {
        Format::TextProperties
    }

    fn serialize(&self, properties: &SortedProperties, _charset: Charset) -> Result<Vec<u8>> {
        let mut out = String::new();
        out.push_str(HEADER);
        out.push('\n');
        for (key, value) in properties {
            out.push_str(&escape(key, true));
            out.push('=');
            out.push_str(&escape(value, false));
            out.push('\n');
        }
        Ok(out.into_bytes())
    }

    fn deserialize(&self, bytes: &[u8], charset: Charset) -> Result<PropertySet> {
        let text = charset.decode(bytes)?;
        let mut properties = PropertySet::new();
        for line in logical_lines(&text) {
            let (key, value) = split_entry(&line.content);
            properties.insert(unescape(key, line.number)?, unescape(value, line.number)?);
        }
        Ok(properties)
    }
}

fn escape(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut units = [0u16; 2];
    for (i, ch) in s.chars().enumerate() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            _ => {
                for unit in ch.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04X}", unit);
                }
            }
        }
    }
    out
}

/// A key/value line with continuations joined.
struct LogicalLine {
    /// 1-based number of the first natural line
    number: usize,
    content: String,
}

fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\x0c')
}

fn trim_leading(s: &str) -> &str {
    s.trim_start_matches(is_blank)
}

/// Odd number of trailing backslashes: the last one escapes the line break.
fn continues(s: &str) -> bool {
    s.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let normalized = text.replace("\r\n", "\n");
    let mut natural = normalized.split(['\n', '\r']).enumerate();
    let mut lines = Vec::new();

    while let Some((index, raw)) = natural.next() {
        let mut current = trim_leading(raw);
        if current.is_empty() || current.starts_with(['#', '!']) {
            continue;
        }

        let mut content = String::new();
        while continues(current) {
            content.push_str(&current[..current.len() - 1]);
            match natural.next() {
                Some((_, next)) => current = trim_leading(next),
                None => {
                    current = "";
                    break;
                }
            }
        }
        content.push_str(current);

        lines.push(LogicalLine {
            number: index + 1,
            content,
        });
    }
    lines
}

/// Split a logical line into its raw (still escaped) key and value.
///
/// The key ends at the first unescaped `=`, `:` or blank. Blanks around the
/// separator and at most one separator character are skipped.
fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (i, ch) in line.char_indices() {
        if !escaped {
            if ch == '=' || ch == ':' {
                key_end = i;
                value_start = i + 1;
                has_separator = true;
                break;
            }
            if is_blank(ch) {
                key_end = i;
                value_start = i + 1;
                break;
            }
        }
        escaped = ch == '\\' && !escaped;
    }

    let rest = &line[value_start..];
    let mut offset = rest.len();
    for (i, ch) in rest.char_indices() {
        if is_blank(ch) {
            continue;
        }
        if !has_separator && (ch == '=' || ch == ':') {
            has_separator = true;
            continue;
        }
        offset = i;
        break;
    }

    (&line[..key_end], &rest[offset..])
}

fn unescape(raw: &str, line: usize) -> Result<String> {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut buf = [0u16; 2];
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            units.extend_from_slice(ch.encode_utf16(&mut buf));
            continue;
        }
        let decoded = match chars.next() {
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(CodecError::Malformed {
                        line,
                        message: format!("malformed \\uxxxx escape '\\u{}'", hex),
                    });
                }
                units.push(u16::from_str_radix(&hex, 16).map_err(|e| {
                    CodecError::Malformed {
                        line,
                        message: e.to_string(),
                    }
                })?);
                continue;
            }
            Some('t') => '\t',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\x0c',
            Some(other) => other,
            None => break,
        };
        units.extend_from_slice(decoded.encode_utf16(&mut buf));
    }

    String::from_utf16(&units).map_err(|_| CodecError::Malformed {
        line,
        message: "unpaired UTF-16 surrogate in \\u escape".to_string(),
    })
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

    fn parse(text: &str) -> PropertySet {
        TextPropertiesCodec
            .deserialize(text.as_bytes(), Charset::Utf8)
            .unwrap()
    }

    #[test]
    fn test_serialize_sorted_with_header() {
        let props = sorted(&[
            ("git.commit.id", "abc123"),
            ("git.build.time", "2024-01-01T00:00:00Z"),
        ]);
        let bytes = TextPropertiesCodec.serialize(&props, Charset::Utf8).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        insta::assert_snapshot!(text.trim_end(), @r"
        #Generated by propgen
        git.build.time=2024-01-01T00\:00\:00Z
        git.commit.id=abc123
        ");
    }

    #[test]
    fn test_serialize_escapes_non_ascii_regardless_of_charset() {
        let props = sorted(&[("git.commit.user.name", "Zoë 😀")]);
        let utf8 = TextPropertiesCodec.serialize(&props, Charset::Utf8).unwrap();
        let latin1 = TextPropertiesCodec
            .serialize(&props, Charset::Latin1)
            .unwrap();

        assert_eq!(utf8, latin1);
        assert!(utf8.is_ascii());
        let text = String::from_utf8(utf8).unwrap();
        assert!(text.contains(r"git.commit.user.name=Zo\u00EB \uD83D\uDE00"));
    }

    #[test]
    fn test_escape_key_and_value() {
        assert_eq!(escape("a key", true), r"a\ key");
        assert_eq!(escape(" lead trail ", false), r"\ lead trail ");
        assert_eq!(escape("a=b:c#d!e", false), r"a\=b\:c\#d\!e");
        assert_eq!(escape("tab\there\nnew", false), r"tab\there\nnew");
        assert_eq!(escape(r"C:\path", false), r"C\:\\path");
    }

    #[test]
    fn test_deserialize_separators() {
        let props = parse("a=1\nb:2\nc 3\nd = 4\ne\t:\t5\nf\n");
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("4"));
        assert_eq!(props.get("e"), Some("5"));
        assert_eq!(props.get("f"), Some(""));
        assert_eq!(props.len(), 6);
    }

    #[test]
    fn test_deserialize_skips_comments_and_blank_lines() {
        let props = parse("#Generated by propgen\n! bang comment\n\n   \n  key=value\n");
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("key"), Some("value"));
    }

    #[test]
    fn test_deserialize_continuation_lines() {
        let props = parse("list=one, \\\n    two, \\\n    three\nnext=1\n");
        assert_eq!(props.get("list"), Some("one, two, three"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn test_deserialize_escaped_backslash_is_not_continuation() {
        let props = parse("path=C\\:\\\\\nnext=1\n");
        assert_eq!(props.get("path"), Some("C:\\"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn test_deserialize_crlf_line_endings() {
        let props = parse("a=1\r\nb=2\r\n");
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
    }

    #[test]
    fn test_deserialize_escapes() {
        let props = parse(r"key\ with\ space=tab\tnl\nuni\u00EB\uD83D\uDE00");
        assert_eq!(
            props.get("key with space"),
            Some("tab\tnl\nuni\u{eb}\u{1F600}")
        );
    }

    #[test]
    fn test_deserialize_malformed_unicode_escape() {
        let err = TextPropertiesCodec
            .deserialize(b"ok=1\nbad=\\u12G4\n", Charset::Utf8)
            .unwrap_err();
        assert!(matches!(err, CodecError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_deserialize_truncated_unicode_escape() {
        let err = TextPropertiesCodec
            .deserialize(b"bad=\\u12", Charset::Utf8)
            .unwrap_err();
        assert!(matches!(err, CodecError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_deserialize_unpaired_surrogate() {
        let err = TextPropertiesCodec
            .deserialize(b"bad=\\uD83D", Charset::Utf8)
            .unwrap_err();
        assert!(matches!(err, CodecError::Malformed { .. }));
    }

    #[test]
    fn test_deserialize_with_latin1_charset() {
        let props = TextPropertiesCodec
            .deserialize(&[b'n', b'=', 0xE9], Charset::Latin1)
            .unwrap();
        assert_eq!(props.get("n"), Some("é"));
    }

    #[test]
    fn test_deserialize_invalid_utf8() {
        let err = TextPropertiesCodec
            .deserialize(&[b'n', b'=', 0xE9], Charset::Utf8)
            .unwrap_err();
        assert!(matches!(err, CodecError::Charset(_)));
    }
}
