use std::fmt;

use crate::bytestring::ByteString;
use crate::parser;
use crate::ssurt;

/// A URL decomposed into 17 byte-string slots.
///
/// The slots partition the input: concatenating them in declaration order
/// reproduces the parsed bytes exactly until a canonicalizer mutates them.
/// Absent components are empty slots, never a distinguished null, so every
/// transform can operate compositionally without reparsing.
///
/// Slot layout: `<junk><scheme>:<slashes><user>:<pass>@<host>:<port><path>?<query>#<fragment><junk>`
///
/// # Examples
///
/// ```
/// use urlkey::ParsedUrl;
///
/// let url = ParsedUrl::parse("http://user:pw@example.com:8080/a?q#f");
/// assert_eq!(url.scheme, "http");
/// assert_eq!(url.host, "example.com");
/// assert_eq!(url.port, "8080");
/// assert_eq!(url.to_string(), "http://user:pw@example.com:8080/a?q#f");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    pub leading_junk: ByteString,
    pub scheme: ByteString,
    pub colon_after_scheme: ByteString,
    pub slashes: ByteString,
    pub username: ByteString,
    pub colon_before_password: ByteString,
    pub password: ByteString,
    pub at_sign: ByteString,
    pub host: ByteString,
    pub colon_before_port: ByteString,
    pub port: ByteString,
    pub path: ByteString,
    pub question_mark: ByteString,
    pub query: ByteString,
    pub hash_sign: ByteString,
    pub fragment: ByteString,
    pub trailing_junk: ByteString,
}

impl ParsedUrl {
    /// Parse URL text. Never fails: anything that is not URL shaped lands
    /// in the path or junk slots. The text's UTF-8 bytes are parsed; for
    /// byte-per-code-point input use [`ByteString::from_latin1`] with
    /// [`ParsedUrl::parse_bytes`].
    pub fn parse(input: &str) -> Self {
        parser::parse(input.as_bytes())
    }

    /// Parse raw URL bytes. Never fails.
    pub fn parse_bytes(input: &[u8]) -> Self {
        parser::parse(input)
    }

    /// All 17 slots in URL order.
    fn slots(&self) -> [&ByteString; 17] {
        [
            &self.leading_junk,
            &self.scheme,
            &self.colon_after_scheme,
            &self.slashes,
            &self.username,
            &self.colon_before_password,
            &self.password,
            &self.at_sign,
            &self.host,
            &self.colon_before_port,
            &self.port,
            &self.path,
            &self.question_mark,
            &self.query,
            &self.hash_sign,
            &self.fragment,
            &self.trailing_junk,
        ]
    }

    /// Concatenate the slots back into URL bytes.
    pub fn to_bytes(&self) -> ByteString {
        let slots = self.slots();
        let mut out = Vec::with_capacity(slots.iter().map(|s| s.len()).sum());
        for slot in slots {
            out.extend_from_slice(slot);
        }
        ByteString::from(out)
    }

    /// `host:port` as it appears in the URL (empty colon when no port).
    pub fn host_port(&self) -> ByteString {
        let mut out =
            Vec::with_capacity(self.host.len() + self.colon_before_port.len() + self.port.len());
        out.extend_from_slice(&self.host);
        out.extend_from_slice(&self.colon_before_port);
        out.extend_from_slice(&self.port);
        ByteString::from(out)
    }

    /// Serialize with the field order and reversed host that make SSURT
    /// keys sort hierarchically.
    ///
    /// ```
    /// use urlkey::ParsedUrl;
    ///
    /// let url = ParsedUrl::parse("http://www.example.com:80/foo");
    /// assert_eq!(url.ssurt(), "com,example,www,//80:http:/foo");
    /// ```
    pub fn ssurt(&self) -> ByteString {
        ssurt::format(self)
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_bytes(), f)
    }
}
