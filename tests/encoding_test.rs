mod common;

use common::fixed_time;
use llmo_audit::{audit, AuditDocument};

#[test]
fn utf8_body_is_kept_intact() {
    let body = "<html><head><meta charset=\"utf-8\"><title>Café 中文</title></head><body><h1>ü</h1></body></html>";
    let document = AuditDocument::from_bytes(body.as_bytes(), None, "https://example.com/", 200, 40);

    assert_eq!(document.byte_size, body.len());
    let result = audit(&document, fixed_time());
    assert_eq!(result.meta_tags.title.as_deref(), Some("Café 中文"));
}

#[test]
fn latin1_meta_charset_is_decoded() {
    let body = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9 M\xFCnchen</title></head>\
        <body><h1>Espa\xF1ol</h1></body></html>";
    let document = AuditDocument::from_bytes(body, None, "https://example.com/", 200, 40);

    assert!(document.html.contains("Café München"));
    assert_eq!(document.byte_size, body.len());
    let result = audit(&document, fixed_time());
    assert_eq!(result.meta_tags.title_length, 12);
}

#[test]
fn windows_1252_punctuation_is_decoded() {
    let body = b"<meta charset=\"windows-1252\"><title>\x93Quoted\x94 \x96 dash</title>";
    let document = AuditDocument::from_bytes(body, None, "https://example.com/", 200, 0);

    assert!(document.html.contains("\u{201C}Quoted\u{201D} \u{2013} dash"));
}

#[test]
fn content_type_header_takes_precedence() {
    // declares latin-1 but the header says UTF-8
    let body = "<meta charset=\"ISO-8859-1\"><title>Café</title>".as_bytes();
    let document = AuditDocument::from_bytes(body, Some("text/html; charset=UTF-8"), "https://example.com/", 200, 0);

    assert!(document.html.contains("Café"));
    assert!(!document.html.contains("CafÃ©"));
}

#[test]
fn header_charset_applies_without_meta() {
    let body = b"<title>Gr\xFC\xDFe</title>";
    let document = AuditDocument::from_bytes(body, Some("text/html; charset=iso-8859-1"), "https://example.com/", 200, 0);

    assert!(document.html.contains("Grüße"));
}

#[test]
fn invalid_utf8_is_replaced_not_fatal() {
    let body = b"<h1>Broken \xFF\xFE bytes</h1>";
    let document = AuditDocument::from_bytes(body, None, "https://example.com/", 503, 0);

    assert!(document.html.contains('\u{FFFD}'));
    let result = audit(&document, fixed_time());
    assert_eq!(result.technical.status_code, 503);
    assert_eq!(result.content.heading_count(1), 1);
}
