//! IPv4 address parsing in the liberal WHATWG form: 1-4 dot-separated
//! parts, each decimal, octal (leading `0`) or hexadecimal (`0x`/`0X`).

use crate::error::{Error, Result};

/// Parse a host as a WHATWG IPv4 address into a u32.
/// Accepts:
/// - Decimal: 192.168.1.1
/// - Hex: 0xC0A80101
/// - Octal: 0300.0250.01.01
/// - Mixed: 192.0x00A80001
/// - Short forms: 1 part fills 32 bits, 2 parts 8.24, 3 parts 8.8.16
///
/// One trailing dot is tolerated and ignored. Overflow in any part means
/// the host is not an IPv4 address.
pub fn parse(input: &[u8]) -> Result<u32> {
    if input.is_empty() {
        return Err(Error::InvalidIpv4);
    }

    let input = input.strip_suffix(b".").unwrap_or(input);
    if input.is_empty() {
        return Err(Error::InvalidIpv4);
    }

    let parts: Vec<&[u8]> = input.split(|&b| b == b'.').collect();
    let part_count = parts.len();
    if part_count > 4 {
        return Err(Error::InvalidIpv4);
    }

    let numbers: Vec<u64> = parts.iter().map(|part| parse_number(part)).collect::<Result<Vec<_>>>()?;

    // The last number fills the remaining bytes, so its bound depends on
    // how many parts precede it
    let last = numbers[part_count - 1];
    let max = 256u64.pow((5 - part_count) as u32);
    if last >= max {
        return Err(Error::InvalidIpv4);
    }

    if numbers.iter().take(part_count - 1).any(|&n| n >= 256) {
        return Err(Error::InvalidIpv4);
    }

    let mut ipv4: u32 = 0;
    for (i, &number) in numbers.iter().enumerate().take(part_count - 1) {
        let byte_pos = 3 - i;
        ipv4 |= (number as u32) << (byte_pos * 8);
    }
    ipv4 |= last as u32;

    Ok(ipv4)
}

/// Parse a single part (decimal, hex, or octal).
fn parse_number(part: &[u8]) -> Result<u64> {
    if part.is_empty() {
        return Err(Error::InvalidIpv4);
    }
    let s = std::str::from_utf8(part).map_err(|_| Error::InvalidIpv4)?;

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        // Bare "0x" is zero per WHATWG
        return if hex.is_empty() {
            Ok(0)
        } else {
            u64::from_str_radix(hex, 16).map_err(|_| Error::InvalidIpv4)
        };
    }

    if s.len() >= 2 && s.starts_with('0') {
        return u64::from_str_radix(s, 8).map_err(|_| Error::InvalidIpv4);
    }

    s.parse::<u64>().map_err(|_| Error::InvalidIpv4)
}

/// Render an IPv4 address as dotted decimal.
pub fn serialize(ipv4: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (ipv4 >> 24) & 0xFF,
        (ipv4 >> 16) & 0xFF,
        (ipv4 >> 8) & 0xFF,
        ipv4 & 0xFF
    )
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse(b"192.168.1.1"), Ok(0xC0A80101));
        assert_eq!(parse(b"127.0.0.1"), Ok(0x7F000001));
        assert_eq!(parse(b"192.168.1.1."), Ok(0xC0A80101));
    }

    #[test]
    fn test_parse_hex_and_octal() {
        assert_eq!(parse(b"0xC0A80101"), Ok(0xC0A80101));
        assert_eq!(parse(b"192.0x00A80001"), Ok(0xC0A80001));
        assert_eq!(parse(b"0300.0250.01.01"), Ok(0xC0A80101));
        assert_eq!(parse(b"0x"), Ok(0));
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(parse(b"2130706433"), Ok(0x7F000001));
        assert_eq!(parse(b"127.1"), Ok(0x7F000001));
        assert_eq!(parse(b"127.0.1"), Ok(0x7F000001));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(parse(b""), Err(Error::InvalidIpv4));
        assert_eq!(parse(b"."), Err(Error::InvalidIpv4));
        assert_eq!(parse(b"example.com"), Err(Error::InvalidIpv4));
        assert_eq!(parse(b"1.2.3.4.5"), Err(Error::InvalidIpv4));
        assert_eq!(parse(b"256.1.1.1"), Err(Error::InvalidIpv4));
        assert_eq!(parse(b"4294967296"), Err(Error::InvalidIpv4));
        assert_eq!(parse(b"1..2"), Err(Error::InvalidIpv4));
        assert_eq!(parse(b"192.168.1.08"), Err(Error::InvalidIpv4));
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serialize(0xC0A80101), "192.168.1.1");
        assert_eq!(serialize(0x7F000001), "127.0.0.1");
    }
}
