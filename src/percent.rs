//! Percent-codec primitives shared by the canonicalizers.
//!
//! Encode sets live with the canonicalizers that own them; this module
//! only knows how to decode tolerantly and encode against a set.

use percent_encoding::{percent_decode, percent_encode, AsciiSet};

use crate::bytestring::ByteString;

/// Decode each valid `%HH` triple once. Malformed triples stay literal.
pub fn decode(input: &[u8]) -> ByteString {
    ByteString::from(percent_decode(input).collect::<Vec<u8>>())
}

/// Decode until the bytes stop changing, so nested encodings like
/// `%2561` collapse all the way down to `a`.
pub fn decode_fully(input: &[u8]) -> ByteString {
    let mut current = ByteString::from(input);
    loop {
        let decoded = decode(&current);
        if decoded == current {
            return decoded;
        }
        current = decoded;
    }
}

/// Percent-encode every byte in `set`, uppercase hex. Non-ASCII bytes are
/// always encoded, which is what every set in this crate wants.
pub fn encode(input: &[u8], set: &'static AsciiSet) -> ByteString {
    ByteString::from(percent_encode(input, set).collect::<String>())
}
