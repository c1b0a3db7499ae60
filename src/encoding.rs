//! Character encoding detection and transcoding.
//!
//! Byte-level entry points sniff the charset from meta tags in the first
//! kilobyte and transcode to UTF-8 before parsing. Invalid sequences become
//! replacement characters rather than errors.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#)
        .expect("valid regex")
});

/// Detect the character encoding declared by an HTML document.
///
/// Checks `<meta charset="...">` first, then the `Content-Type` meta form,
/// and falls back to UTF-8. Only the first 1024 bytes are examined.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    for re in [&*CHARSET_META_RE, &*CONTENT_TYPE_CHARSET_RE] {
        if let Some(label) = re.captures(&head_str).and_then(|c| c.get(1)) {
            if let Some(encoding) = Encoding::for_label(label.as_str().as_bytes()) {
                return encoding;
            }
        }
    }
    UTF_8
}

/// Transcode HTML bytes to a UTF-8 string using the declared encoding.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (text, _, _) = encoding.decode(html);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_meta_charset() {
        let html = b"<html><head><meta charset=\"ISO-8859-1\"></head></html>";
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn detects_content_type_charset() {
        let html = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1251\">";
        assert_eq!(detect_encoding(html).name(), "windows-1251");
    }

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<html><body></body></html>").name(), "UTF-8");
    }

    #[test]
    fn transcodes_latin1_bytes() {
        let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
        let text = transcode_to_utf8(html);
        assert!(text.contains("Caf\u{e9}"));
    }

    #[test]
    fn unknown_charset_label_falls_back_to_utf8() {
        let html = b"<meta charset=\"no-such-charset\"><p>ok</p>";
        assert_eq!(detect_encoding(html).name(), "UTF-8");
    }
}
