//! Serialization codecs for generated properties files.
//!
//! Both formats implement [`Codec`]; [`codec_for`] picks the implementation
//! for a configured [`Format`].

mod error;
mod json;
mod text;

pub use error::{CodecError, Result};
pub use json::JsonCodec;
use propgen_core::{Charset, Format, PropertySet, SortedProperties};
pub use text::{HEADER, TextPropertiesCodec};

/// Reads and writes a property set in one on-disk format.
pub trait Codec: Send + Sync {
    /// The format this codec handles.
    fn format(&self) -> Format;

    /// Render sorted properties to the exact bytes written to disk.
    fn serialize(&self, properties: &SortedProperties, charset: Charset) -> Result<Vec<u8>>;

    /// Parse file contents previously written in this format.
    fn deserialize(&self, bytes: &[u8], charset: Charset) -> Result<PropertySet>;
}

/// Get the codec for a format.
pub fn codec_for(format: Format) -> &'static dyn Codec {
    match format {
        Format::TextProperties => &TextPropertiesCodec,
        Format::Json => &JsonCodec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_for_matches_format() {
        assert_eq!(
            codec_for(Format::TextProperties).format(),
            Format::TextProperties
        );
        assert_eq!(codec_for(Format::Json).format(), Format::Json);
    }
}
