//! Response body decoding.
//!
//! Fetchers hand over raw bytes; the analyzers work on UTF-8 text. The charset
//! is taken from the `Content-Type` header when the caller has one, then from
//! the document's own `<meta>` declarations, then defaults to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// `<meta charset="...">` or `<meta http-equiv="Content-Type" content="...; charset=...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+?charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("valid regex")
});

/// `charset=` parameter of a `Content-Type` header value.
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("valid regex")
});

/// Bytes of the document inspected for a `<meta>` charset declaration.
const SNIFF_LIMIT: usize = 1024;

/// Pick the encoding for a response body.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    let from_header = content_type
        .and_then(|ct| HEADER_CHARSET_RE.captures(ct))
        .and_then(|c| Encoding::for_label(c[1].as_bytes()));
    if let Some(encoding) = from_header {
        return encoding;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_LIMIT)]);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| Encoding::for_label(c[1].as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode a response body to UTF-8, replacing invalid sequences with U+FFFD.
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}
