use std::net::Ipv6Addr;

use crate::error::{Error, Result};

/// Reformat a bracketed IPv6 literal into canonical compressed form,
/// e.g. `[2001:DB8:0:0:0:0:0:1]` becomes `[2001:db8::1]`.
///
/// The brackets are required; anything between them that is not a valid
/// IPv6 address is an error the caller absorbs by keeping the host
/// verbatim.
pub fn canonicalize_literal(host: &[u8]) -> Result<String> {
    let inner = host
        .strip_prefix(b"[")
        .and_then(|h| h.strip_suffix(b"]"))
        .ok_or(Error::InvalidIpv6)?;
    let text = std::str::from_utf8(inner).map_err(|_| Error::InvalidIpv6)?;

    // Zone ids are not allowed in URLs
    if text.contains('%') {
        return Err(Error::InvalidIpv6);
    }

    let addr: Ipv6Addr = text.parse().map_err(|_| Error::InvalidIpv6)?;
    Ok(format!("[{addr}]"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_literal() {
        assert_eq!(canonicalize_literal(b"[::1]").unwrap(), "[::1]");
        assert_eq!(canonicalize_literal(b"[2001:DB8::1]").unwrap(), "[2001:db8::1]");
        assert_eq!(
            canonicalize_literal(b"[2001:db8:0:0:0:0:0:1]").unwrap(),
            "[2001:db8::1]"
        );
    }

    #[test]
    fn test_rejects() {
        assert_eq!(canonicalize_literal(b"::1"), Err(Error::InvalidIpv6));
        assert_eq!(canonicalize_literal(b"[::1%eth0]"), Err(Error::InvalidIpv6));
        assert_eq!(canonicalize_literal(b"[not-an-ip]"), Err(Error::InvalidIpv6));
        assert_eq!(canonicalize_literal(b"[::1"), Err(Error::InvalidIpv6));
    }
}
