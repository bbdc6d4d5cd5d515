//! Tests for HTTP error body sanitization.

use tandem::providers::sanitize_http_error_body;

#[test]
fn collapses_whitespace() {
    let out = sanitize_http_error_body("line one\n\n  line   two\t end");
    assert_eq!(out, "line one line two end");
}

#[test]
fn redacts_anthropic_keys() {
    let out = sanitize_http_error_body("bad key: sk-ant-REDACTED was rejected");
    assert!(!out.contains("sk-ant-api03"));
    assert!(out.contains("[REDACTED]"));
}

#[test]
fn redacts_google_oauth_tokens() {
    let out =
        sanitize_http_error_body("token ya29.a0AbCdEfGhIjKlMnOpQrStUvWxYz123456 expired");
    assert!(!out.contains("ya29.a0"));
    assert!(out.contains("[REDACTED]"));
}

#[test]
fn truncates_long_bodies() {
    let long = "x".repeat(1000);
    let out = sanitize_http_error_body(&long);
    assert!(out.ends_with("...[truncated]"));
    assert!(out.len() < 300);
}

#[test]
fn short_clean_bodies_pass_through() {
    assert_eq!(sanitize_http_error_body("rate limited"), "rate limited");
}
