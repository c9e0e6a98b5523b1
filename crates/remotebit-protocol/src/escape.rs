//! Escaping codec for embedding arbitrary text in a space-delimited token.
//!
//! Requests and replies are split on the literal space character, so any
//! free-form payload must first be transformed into a token free of spaces
//! and line terminators. The substitutions are:
//!
//! | character | marker |
//! |-----------|--------|
//! | `%`       | `%%`   |
//! | space     | `%20`  |
//! | CR        | `%10`  |
//! | LF        | `%13`  |
//!
//! Both directions run as a single left-to-right pass, which makes
//! `unescape(escape(s)) == s` hold for every string. [`unescape`] is only
//! meaningful on [`escape`] output: arbitrary text that happens to contain a
//! literal marker sequence (`%20`, `%10`, `%13`, `%%`) will have that marker
//! decoded.

use crate::error::{ProtocolError, ProtocolResult};

/// Escape a payload into a single space-safe, newline-safe token.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%%"),
            ' ' => out.push_str("%20"),
            '\r' => out.push_str("%10"),
            '\n' => out.push_str("%13"),
            c => out.push(c),
        }
    }
    out
}

/// Reverse [`escape`].
///
/// A `%` that is not followed by a recognized marker passes through
/// unchanged, so malformed input degrades instead of erroring.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if bytes[i + 1..].starts_with(b"%") {
                out.push('%');
                i += 2;
                continue;
            }
            if bytes[i + 1..].starts_with(b"20") {
                out.push(' ');
                i += 3;
                continue;
            }
            if bytes[i + 1..].starts_with(b"10") {
                out.push('\r');
                i += 3;
                continue;
            }
            if bytes[i + 1..].starts_with(b"13") {
                out.push('\n');
                i += 3;
                continue;
            }
        }
        // Multi-byte UTF-8 sequences never contain b'%', so copying the
        // char boundary-by-boundary stays valid.
        let c = s[i..].chars().next().unwrap_or('\u{FFFD}');
        out.push(c);
        i += c.len_utf8();
    }
    out
}

/// Encode a byte payload as an escaped token.
///
/// Bytes are rendered as space-separated decimals (`[1, 2, 255]` →
/// `"1 2 255"`) and the result is escaped (`"1%202%20255"`).
pub fn encode_bytes(bytes: &[u8]) -> String {
    let decimals = bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    escape(&decimals)
}

/// Reverse [`encode_bytes`].
pub fn decode_bytes(token: &str) -> ProtocolResult<Vec<u8>> {
    unescape(token)
        .split_whitespace()
        .map(|d| {
            d.parse::<u8>()
                .map_err(|_| ProtocolError::InvalidArgument(format!("invalid byte value: {d}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape("hello"), "hello");
    }

    #[test]
    fn test_escape_special() {
        assert_eq!(escape("a b"), "a%20b");
        assert_eq!(escape("a\r\nb"), "a%10%13b");
        assert_eq!(escape("50%"), "50%%");
        assert_eq!(escape("% 20"), "%%%2020");
    }

    #[test]
    fn test_unescape_round_trip() {
        for s in [
            "",
            "hello",
            "a b c",
            "line1\r\nline2",
            "100%",
            "%20",
            "%%",
            "%13%10",
            "müsic née",
        ] {
            assert_eq!(unescape(&escape(s)), s, "round trip failed for {s:?}");
        }
    }

    #[test]
    fn test_unescape_lone_percent() {
        // Not escape output, but must not panic or drop characters.
        assert_eq!(unescape("50%"), "50%");
        assert_eq!(unescape("%x"), "%x");
    }

    #[test]
    fn test_bytes_round_trip() {
        for bytes in [vec![], vec![0], vec![1, 2, 255], (0u8..=255).collect()] {
            assert_eq!(decode_bytes(&encode_bytes(&bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn test_encode_bytes_wire_form() {
        assert_eq!(encode_bytes(&[1, 2, 255]), "1%202%20255");
    }

    #[test]
    fn test_decode_bytes_rejects_overflow() {
        assert!(decode_bytes("256").is_err());
        assert!(decode_bytes("1%20abc").is_err());
    }
}
