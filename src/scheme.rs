/// URL scheme classification.
///
/// Special schemes trigger authority-style parsing, backslash fixing and
/// default-port elision; everything else is opaque unless its pathish
/// starts with two slashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemeType {
    Ftp,
    Gopher,
    Http,
    Https,
    Ws,
    Wss,
    File,
    #[default]
    NotSpecial,
}

impl SchemeType {
    pub fn is_special(self) -> bool {
        self != Self::NotSpecial
    }

    /// The default port, elided during canonicalization. `file` is special
    /// but has no port.
    pub fn default_port(self) -> Option<u16> {
        match self {
            Self::Ftp => Some(21),
            Self::Gopher => Some(70),
            Self::Http | Self::Ws => Some(80),
            Self::Https | Self::Wss => Some(443),
            Self::File | Self::NotSpecial => None,
        }
    }
}

/// Classify a scheme by exact byte comparison.
/// Filters by length and first byte before the full comparison to keep the
/// common miss cheap.
pub fn scheme_type(scheme: &[u8]) -> SchemeType {
    match (scheme.len(), scheme.first()) {
        (2, Some(b'w')) if scheme == b"ws" => SchemeType::Ws,
        (3, Some(b'w')) if scheme == b"wss" => SchemeType::Wss,
        (3, Some(b'f')) if scheme == b"ftp" => SchemeType::Ftp,
        (4, Some(b'h')) if scheme == b"http" => SchemeType::Http,
        (4, Some(b'f')) if scheme == b"file" => SchemeType::File,
        (5, Some(b'h')) if scheme == b"https" => SchemeType::Https,
        (6, Some(b'g')) if scheme == b"gopher" => SchemeType::Gopher,
        _ => SchemeType::NotSpecial,
    }
}

/// The "clean scheme" the parser classifies by: ASCII-lowercased with
/// embedded CR/LF/TAB removed. The raw slot keeps its original bytes.
pub fn clean_scheme(raw: &[u8]) -> Vec<u8> {
    raw.iter()
        .copied()
        .filter(|&b| !matches!(b, b'\t' | b'\n' | b'\r'))
        .map(|b| b.to_ascii_lowercase())
        .collect()
}
