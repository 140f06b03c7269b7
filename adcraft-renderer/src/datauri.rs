//! `data:` URL parsing and encoding.
//!
//! Supports base64 payloads (`data:image/png;base64,iVBOR...`) and
//! percent-encoded payloads (`data:image/svg+xml,%3Csvg...`).

use base64::Engine;

use crate::error::{RenderError, RenderResult};

/// A decoded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// MIME type (defaults to `text/plain` when omitted).
    pub mime: String,
    /// Decoded payload.
    pub bytes: Vec<u8>,
}

impl DataUrl {
    /// Parse a `data:` URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a data URL, has no payload
    /// separator, or the payload cannot be decoded.
    pub fn parse(uri: &str) -> RenderResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| RenderError::InvalidDataUrl("not a data URL".to_string()))?;

        let (metadata, payload) = rest
            .split_once(',')
            .ok_or_else(|| RenderError::InvalidDataUrl("missing comma".to_string()))?;

        let mut parts = metadata.split(';');
        let mime = match parts.next().map(str::trim) {
            Some(m) if !m.is_empty() => m.to_ascii_lowercase(),
            _ => "text/plain".to_string(),
        };
        let is_base64 = parts.any(|p| p.eq_ignore_ascii_case("base64"));

        let bytes = if is_base64 {
            base64::engine::general_purpose::STANDARD
                .decode(payload.trim())
                .map_err(|e| RenderError::InvalidDataUrl(format!("bad base64: {e}")))?
        } else {
            percent_decode(payload)?
        };

        Ok(Self { mime, bytes })
    }

    /// Encode bytes as a base64 `data:` URL.
    #[must_use]
    pub fn encode(mime: &str, bytes: &[u8]) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        format!("data:{mime};base64,{encoded}")
    }
}

/// Percent-decoding for non-base64 payloads.
fn percent_decode(input: &str) -> RenderResult<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| RenderError::InvalidDataUrl("invalid percent encoding".to_string()))?;
            result.push(hex);
            i += 3;
        } else {
            result.push(bytes[i]);
            i += 1;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_base64_payload() {
        let url = DataUrl::parse("data:image/png;base64,AAEC").expect("parse");
        assert_eq!(url.mime, "image/png");
        assert_eq!(url.bytes, vec![0, 1, 2]);
    }

    #[test]
    fn parses_percent_encoded_payload() {
        let url = DataUrl::parse("data:text/plain,a%20b").expect("parse");
        assert_eq!(url.bytes, b"a b".to_vec());
    }

    #[test]
    fn missing_mime_defaults_to_text() {
        let url = DataUrl::parse("data:,hello").expect("parse");
        assert_eq!(url.mime, "text/plain");
        assert_eq!(url.bytes, b"hello".to_vec());
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(DataUrl::parse("not a data uri").is_err());
        assert!(DataUrl::parse("data:image/png").is_err());
        assert!(DataUrl::parse("data:image/png;base64,@@@").is_err());
        assert!(DataUrl::parse("data:text/plain,%zz").is_err());
        assert!(DataUrl::parse("data:text/plain,%4").is_err());
    }

    #[test]
    fn encode_then_parse() {
        let url = DataUrl::encode("image/jpeg", &[0xFF, 0xD8]);
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(DataUrl::parse(&url).expect("parse").bytes, vec![0xFF, 0xD8]);
    }
}
