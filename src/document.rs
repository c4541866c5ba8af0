//! The audit input: a fetched page plus its transport metadata.

use serde::{Deserialize, Serialize};

use crate::encoding;

/// A fetched HTML document as handed over by the caller's fetcher.
///
/// The engine never fetches, retries or follows redirects; `final_url` is the
/// URL after redirects and is used to resolve links and to decide SSL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditDocument {
    /// Response body as UTF-8.
    pub html: String,
    /// Final resolved URL.
    pub final_url: String,
    /// HTTP status code.
    pub status_code: u16,
    /// Size of the response body in bytes.
    pub byte_size: usize,
    /// Time taken by the fetch, in milliseconds.
    pub elapsed_ms: u64,
}

impl AuditDocument {
    /// Build a document from already-decoded HTML.
    ///
    /// `byte_size` is the UTF-8 length of `html`.
    #[must_use]
    pub fn new(html: impl Into<String>, final_url: impl Into<String>) -> Self {
        let html = html.into();
        Self {
            byte_size: html.len(),
            html,
            final_url: final_url.into(),
            status_code: 200,
            elapsed_ms: 0,
        }
    }

    /// Build a document from a raw response body.
    ///
    /// The charset comes from `content_type` (the response header, if any) or
    /// the document's `<meta>` declaration; `byte_size` is the raw length.
    #[must_use]
    pub fn from_bytes(
        body: &[u8],
        content_type: Option<&str>,
        final_url: impl Into<String>,
        status_code: u16,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            html: encoding::decode_body(body, content_type),
            final_url: final_url.into(),
            status_code,
            byte_size: body.len(),
            elapsed_ms,
        }
    }

    /// Set the HTTP status code.
    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Set the fetch time.
    #[must_use]
    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = elapsed_ms;
        self
    }

    /// Override the body size (e.g. compressed transfer size).
    #[must_use]
    pub fn with_byte_size(mut self, byte_size: usize) -> Self {
        self.byte_size = byte_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_measures_utf8_length() {
        let doc = AuditDocument::new("<p>é</p>", "https://example.com");
        assert_eq!(doc.byte_size, 9);
        assert_eq!(doc.status_code, 200);
    }

    #[test]
    fn test_from_bytes_keeps_raw_size() {
        let body = b"<meta charset=\"windows-1252\"><p>Caf\xE9</p>";
        let doc = AuditDocument::from_bytes(body, None, "https://example.com", 200, 120);
        assert_eq!(doc.byte_size, body.len());
        assert!(doc.html.contains("Café"));
        assert_eq!(doc.elapsed_ms, 120);
    }
}
