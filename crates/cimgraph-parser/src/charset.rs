//! Declared charset handling.
//!
//! XMI exports from some UML tools declare a single-byte Western encoding.
//! `ISO-8859-1` and `windows-1252` are both read with the windows-1252 table,
//! which is a superset of ISO-8859-1 for printable characters. Documents
//! without a declaration, or declaring UTF-8, are read as UTF-8. Anything else
//! is rejected before element parsing starts.

use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;
use log::debug;
use quick_xml::{Reader, events::Event};

use crate::error::{ParseError, Result};

const SINGLE_BYTE_CHARSETS: &[&str] = &["ISO-8859-1", "windows-1252"];

/// Decode document bytes to text according to the declared charset.
///
/// # Errors
///
/// Returns [`ParseError::UnknownCharset`] with the declared name for any
/// charset other than UTF-8, ISO-8859-1 and windows-1252, and
/// [`ParseError::Xml`] if the declaration is malformed or UTF-8 input is invalid.
pub(crate) fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    match declared_charset(bytes)? {
        None => utf8(bytes),
        Some(label) if label.eq_ignore_ascii_case("utf-8") => utf8(bytes),
        Some(label) if is_single_byte(&label) => {
            debug!(charset = label; "Decoding with windows-1252 table");
            let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            Ok(text)
        }
        Some(label) => Err(ParseError::UnknownCharset(label)),
    }
}

/// Returns the `encoding` of the XML declaration, if the document has one.
pub(crate) fn declared_charset(bytes: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| ParseError::xml(reader.error_position() as u64, err.to_string()))?;

        match event {
            Event::Decl(decl) => {
                return match decl.encoding() {
                    Some(Ok(label)) => Ok(Some(String::from_utf8_lossy(&label).into_owned())),
                    Some(Err(err)) => Err(ParseError::xml(
                        reader.buffer_position() as u64,
                        format!("invalid XML declaration: {err}"),
                    )),
                    None => Ok(None),
                };
            }
            // A BOM or whitespace may precede the declaration
            Event::Text(_) | Event::Comment(_) => {}
            _ => return Ok(None),
        }
        buf.clear();
    }
}

fn is_single_byte(label: &str) -> bool {
    SINGLE_BYTE_CHARSETS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(label))
}

fn utf8(bytes: &[u8]) -> Result<Cow<'_, str>> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|err| ParseError::xml(err.valid_up_to() as u64, format!("invalid UTF-8: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_declaration_is_utf8() {
        let text = decode("<XMI>é</XMI>".as_bytes()).unwrap();
        assert_eq!(text, "<XMI>é</XMI>");
    }

    #[test]
    fn test_declared_charset() {
        let source = br#"<?xml version="1.0" encoding="windows-1252"?><XMI/>"#;
        assert_eq!(
            declared_charset(source).unwrap().as_deref(),
            Some("windows-1252")
        );
        assert_eq!(declared_charset(b"<?xml version=\"1.0\"?><XMI/>").unwrap(), None);
        assert_eq!(declared_charset(b"<XMI/>").unwrap(), None);
    }

    #[test]
    fn test_windows_1252_decodes_high_bytes() {
        let mut source = br#"<?xml version="1.0" encoding="windows-1252"?><XMI name=""#.to_vec();
        // 0xE9 = e-acute, 0x80 = euro sign in windows-1252
        source.extend_from_slice(&[0xE9, 0x80]);
        source.extend_from_slice(br#""/>"#);

        let text = decode(&source).unwrap();
        assert!(text.contains("name=\"é€\""));
    }

    #[test]
    fn test_iso_8859_1_uses_same_table() {
        let mut source = br#"<?xml version="1.0" encoding="ISO-8859-1"?><XMI name=""#.to_vec();
        source.push(0xFC);
        source.extend_from_slice(br#""/>"#);

        let text = decode(&source).unwrap();
        assert!(text.contains("name=\"ü\""));
    }

    #[test]
    fn test_utf16_is_unknown_charset() {
        let source = br#"<?xml version="1.0" encoding="utf-16"?><XMI/>"#;
        let err = decode(source).unwrap_err();
        assert!(matches!(err, ParseError::UnknownCharset(ref name) if name == "utf-16"));
        assert_eq!(err.to_string(), "unknown charset: utf-16");
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let err = decode(&[b'<', b'X', b'>', 0xFF, b'<', b'/', b'X', b'>']).unwrap_err();
        assert!(matches!(err, ParseError::Xml { position: 3, .. }));
    }
}
