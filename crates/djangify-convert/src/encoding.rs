//! Text encoding selection and strict decoding.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::error::ConvertError;

/// Resolve a WHATWG encoding label, falling back to UTF-8.
///
/// Unknown labels are logged and replaced so a typo does not stop a batch.
pub fn resolve_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label_no_replacement(label.trim().as_bytes()).unwrap_or_else(|| {
        tracing::warn!(label, "Unknown encoding, falling back to UTF-8");
        UTF_8
    })
}

/// Decode file contents, failing on malformed input.
pub(crate) fn decode(
    bytes: &[u8],
    encoding: &'static Encoding,
    path: &Path,
) -> Result<String, ConvertError> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
        .ok_or_else(|| ConvertError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })
}

/// Encode text for writing.
///
/// UTF-16 encodings write UTF-8, as `encoding_rs` has no UTF-16 encoder.
pub(crate) fn encode(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, _) = encoding.encode(text);
    bytes.into_owned()
}

#[cfg(test)]
mod tests {
    use encoding_rs::WINDOWS_1252;

    use super::*;

    #[test]
    fn test_resolve_known_labels() {
        assert_eq!(resolve_encoding("utf-8"), UTF_8);
        assert_eq!(resolve_encoding("UTF8"), UTF_8);
        assert_eq!(resolve_encoding("latin1"), WINDOWS_1252);
        assert_eq!(resolve_encoding(" cp1252 "), WINDOWS_1252);
    }

    #[test]
    fn test_resolve_unknown_label_falls_back() {
        assert_eq!(resolve_encoding("klingon"), UTF_8);
        // The replacement encoding is never selected
        assert_eq!(resolve_encoding("iso-2022-kr"), UTF_8);
    }

    #[test]
    fn test_decode_strict_utf8() {
        let path = Path::new("index.html");
        assert_eq!(decode("héllo".as_bytes(), UTF_8, path).unwrap(), "héllo");

        let err = decode(&[0x68, 0xff, 0x69], UTF_8, path).unwrap_err();
        assert!(matches!(err, ConvertError::Decode { encoding: "UTF-8", .. }));
    }

    #[test]
    fn test_round_trip_windows_1252() {
        let path = Path::new("index.html");
        let text = decode(&[0x63, 0x61, 0x66, 0xe9], WINDOWS_1252, path).unwrap();
        assert_eq!(text, "café");
        assert_eq!(encode(&text, WINDOWS_1252), vec![0x63, 0x61, 0x66, 0xe9]);
    }
}
