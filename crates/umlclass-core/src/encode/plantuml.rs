//! PlantUML text encoding (the `~1`-less default form used in server URLs).
//!
//! The source is UTF-8 encoded, compressed with raw DEFLATE and written with a base64-like
//! alphabet `0-9A-Za-z-_`. Unlike standard base64, a trailing partial group is zero-filled and
//! always emitted as four characters, so the output length is a multiple of four and carries no
//! padding characters.

use crate::{Error, Result};
use base64::Engine as _;
use base64::alphabet::Alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use std::io::{Read, Write};

const PLANTUML_ALPHABET: Alphabet =
    match Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("PlantUML alphabet is not a valid base64 alphabet"),
    };

const PLANTUML_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &PLANTUML_ALPHABET,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true),
);

/// Encodes diagram source the way the PlantUML server expects it in `/<format>/<encoded>` URLs.
pub fn encode(source: &str) -> Result<String> {
    let mut deflater = DeflateEncoder::new(Vec::new(), Compression::best());
    deflater
        .write_all(source.as_bytes())
        .map_err(|e| Error::Encoding {
            message: format!("deflate failed: {e}"),
        })?;
    let mut compressed = deflater.finish().map_err(|e| Error::Encoding {
        message: format!("deflate failed: {e}"),
    })?;

    // Zero-fill to whole 3-byte groups; PlantUML never emits short trailing groups.
    let rem = compressed.len() % 3;
    if rem != 0 {
        compressed.resize(compressed.len() + (3 - rem), 0);
    }

    Ok(PLANTUML_ENGINE.encode(&compressed))
}

/// Reverses [`encode`], returning the original diagram source.
pub fn decode(encoded: &str) -> Result<String> {
    let encoded = encoded.trim();
    if encoded.len() % 4 != 0 {
        return Err(Error::Encoding {
            message: format!(
                "encoded text length {} is not a multiple of 4",
                encoded.len()
            ),
        });
    }

    let compressed = PLANTUML_ENGINE
        .decode(encoded)
        .map_err(|e| Error::Encoding {
            message: format!("invalid PlantUML text encoding: {e}"),
        })?;

    // The decoder stops at the final DEFLATE block, so the zero fill is never read.
    let mut inflated = Vec::new();
    DeflateDecoder::new(compressed.as_slice())
        .read_to_end(&mut inflated)
        .map_err(|e| Error::Encoding {
            message: format!("inflate failed: {e}"),
        })?;

    String::from_utf8(inflated).map_err(|e| Error::Encoding {
        message: format!("decoded diagram source is not UTF-8: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_matches_plantuml_reference_vector() {
        assert_eq!(
            encode("Bob -> Alice : hello").unwrap(),
            "SyfFKj2rKt3CoKnELR1Io4ZDoSa70000"
        );
    }

    #[test]
    fn encode_matches_zlib_output_for_class_diagrams() {
        // Both sources contain short repeats that zlib emits as 3-byte back-references.
        assert_eq!(
            encode("@startuml\nclass Foo\n@enduml").unwrap(),
            "SoWkIImgAStDuKhEIImkLd3Bp-ToICrB0Oe00000"
        );
        assert_eq!(
            encode("@startuml\nclass Foo\nclass Bar\nFoo <|-- Bar\n@enduml\n").unwrap(),
            "SoWkIImgAStDuKhEIImkLd3BpuUod1ABk80y1PiQNLqmno4rBmMa4000"
        );
    }

    #[test]
    fn encode_uses_only_url_safe_alphabet() {
        let source = "@startuml\nclass Foo<T> {\n  +bar(): Map<string, number[]>\n}\nFoo <|-- Baz\n@enduml\n";
        let encoded = encode(source).unwrap();
        assert_eq!(encoded.len() % 4, 0);
        assert!(
            encoded
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
            "{encoded}"
        );
    }

    #[test]
    fn decode_recovers_source() {
        let source = "@startuml\nclass Überklasse\nÜberklasse <|-- Kind\n@enduml";
        assert_eq!(decode(&encode(source).unwrap()).unwrap(), source);
        assert_eq!(
            decode("SyfFKj2rKt3CoKnELR1Io4ZDoSa70000").unwrap(),
            "Bob -> Alice : hello"
        );
    }

    #[test]
    fn decode_rejects_malformed_input() {
        assert!(matches!(decode("abc"), Err(Error::Encoding { .. })));
        assert!(matches!(decode("a+b/"), Err(Error::Encoding { .. })));
    }
}
