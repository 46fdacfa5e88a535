//! Host Punycoding bridge.
//!
//! The canonicalizers hand a raw host here and keep it verbatim when this
//! module reports an error, so nothing in this file is allowed to panic.

use std::borrow::Cow;

use crate::bytestring::ByteString;
use crate::error::{Error, Result};

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if a host contains a Punycode label (xn-- prefix, case insensitive)
fn has_punycode(host: &[u8]) -> bool {
    if host.len() < 4 {
        return false;
    }
    if is_punycode_prefix(host) {
        return true;
    }
    memchr::memchr_iter(b'.', host).any(|pos| is_punycode_prefix(&host[pos + 1..]))
}

/// IDNA `ToASCII` for a raw host.
///
/// Fast path: plain ASCII hostnames are lowercased without touching the
/// IDNA machinery. Punycode labels skip the fast path because they need
/// validation. Everything else goes through the `idna` crate, reading the
/// bytes as UTF-8 when they are, Latin-1 otherwise.
pub fn to_ascii(host: &ByteString) -> Result<ByteString> {
    let bytes = host.as_bytes();

    if bytes.is_ascii() && !bytes.contains(&b'%') && !has_punycode(bytes) {
        let mut result = Vec::with_capacity(bytes.len());
        for &b in bytes {
            match b {
                b'A'..=b'Z' => result.push(b + 32),
                b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' => result.push(b),
                _ => return Err(Error::Idna),
            }
        }
        return Ok(ByteString::from(result));
    }

    let text: Cow<'_, str> = match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    };
    ::idna::domain_to_ascii(&text)
        .map(ByteString::from)
        .map_err(|_| Error::Idna)
}
