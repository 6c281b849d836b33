//! Character encodings for reading and writing generated files.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Character encoding used for text I/O.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    #[default]
    Utf8,
    /// ISO-8859-1, one byte per code point up to U+00FF
    Latin1,
    UsAscii,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharsetError {
    #[error("invalid {charset} byte sequence at offset {offset}")]
    Undecodable { charset: Charset, offset: usize },

    #[error("character {ch:?} cannot be encoded as {charset}")]
    Unmappable { charset: Charset, ch: char },
}

impl Charset {
    /// Returns the canonical charset name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::UsAscii => "US-ASCII",
        }
    }

    /// Whether `ch` has a representation in this charset.
    pub fn can_encode(&self, ch: char) -> bool {
        match self {
            Charset::Utf8 => true,
            Charset::Latin1 => (ch as u32) <= 0xFF,
            Charset::UsAscii => ch.is_ascii(),
        }
    }

    /// Decode `bytes` into a string, failing on any invalid sequence.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, CharsetError> {
        match self {
            Charset::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| {
                CharsetError::Undecodable {
                    charset: *self,
                    offset: e.utf8_error().valid_up_to(),
                }
            }),
            Charset::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            Charset::UsAscii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(CharsetError::Undecodable {
                    charset: *self,
                    offset,
                }),
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
        }
    }

    /// Encode `text`, failing on the first character this charset cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, CharsetError> {
        match self {
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::Latin1 | Charset::UsAscii => text
                .chars()
                .map(|ch| {
                    if self.can_encode(ch) {
                        Ok(ch as u32 as u8)
                    } else {
                        Err(CharsetError::Unmappable { charset: *self, ch })
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Charset::Latin1),
            "us-ascii" | "ascii" => Ok(Charset::UsAscii),
            _ => Err(format!(
                "unknown charset '{}', expected 'utf-8', 'iso-8859-1' or 'us-ascii'",
                s
            )),
        }
    }
}

impl TryFrom<String> for Charset {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Charset::from_str("UTF-8").unwrap(), Charset::Utf8);
        assert_eq!(Charset::from_str("utf8").unwrap(), Charset::Utf8);
        assert_eq!(Charset::from_str("latin1").unwrap(), Charset::Latin1);
        assert_eq!(Charset::from_str("ISO-8859-1").unwrap(), Charset::Latin1);
        assert_eq!(Charset::from_str("ascii").unwrap(), Charset::UsAscii);
        assert!(Charset::from_str("utf-16").is_err());
    }

    #[test]
    fn test_decode_utf8_rejects_invalid() {
        let err = Charset::Utf8.decode(&[b'a', 0xFF, b'b']).unwrap_err();
        assert_eq!(
            err,
            CharsetError::Undecodable {
                charset: Charset::Utf8,
                offset: 1
            }
        );
    }

    #[test]
    fn test_decode_latin1_maps_every_byte() {
        assert_eq!(Charset::Latin1.decode(&[b'z', 0xE9]).unwrap(), "zé");
    }

    #[test]
    fn test_decode_ascii_rejects_high_bytes() {
        assert!(Charset::UsAscii.decode(&[0xE9]).is_err());
        assert_eq!(Charset::UsAscii.decode(b"abc").unwrap(), "abc");
    }

    #[test]
    fn test_encode() {
        assert_eq!(Charset::Utf8.encode("é").unwrap(), vec![0xC3, 0xA9]);
        assert_eq!(Charset::Latin1.encode("é").unwrap(), vec![0xE9]);
        assert_eq!(
            Charset::UsAscii.encode("é").unwrap_err(),
            CharsetError::Unmappable {
                charset: Charset::UsAscii,
                ch: 'é'
            }
        );
        assert!(Charset::Latin1.encode("€").is_err());
    }
}
