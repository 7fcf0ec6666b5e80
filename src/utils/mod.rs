//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Join the configured base URL and an absolute API path.
///
/// The base may carry its own path prefix (`https://host/backend`), which is
/// kept, unlike `Url::join` with a leading slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Percent-encode a single path segment.
pub fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Extract the origin (`scheme://host[:port]`) from a URL string.
pub fn origin(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .map(|u| u.origin().ascii_serialization())
        .filter(|o| o != "null")
}
