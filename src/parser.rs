//! The tolerant parser: three regex passes that accept anything.
//!
//! Pass 1 peels leading/trailing junk (bytes 0x00-0x20), pass 2 splits
//! scheme/pathish/query/fragment, pass 3 splits the pathish into slashes,
//! authority and path according to the cleaned scheme. No decoding and no
//! validation happen here; every byte lands in some slot.

use once_cell::sync::Lazy;
use regex::bytes::{Captures, Regex};

use crate::bytestring::ByteString;
use crate::parsed_url::ParsedUrl;
use crate::scheme::{self, SchemeType};

// All patterns run in (?s-u) mode: `.` matches any byte including newline,
// and classes span the full 0x00-0xFF range.
fn compile(pattern: &str) -> Regex {
    Regex::new(&format!("(?s-u){pattern}")).expect("parser regex must compile")
}

static LEADING_JUNK_RE: Lazy<Regex> = Lazy::new(|| compile(r"\A([\x00-\x20]*)(.*)\z"));

static TRAILING_JUNK_RE: Lazy<Regex> = Lazy::new(|| compile(r"\A(.*?)([\x00-\x20]*)\z"));

// Scheme and its colon share one optional group: a colonless input has no
// scheme, the whole text is pathish.
static URL_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"\A(?:([a-zA-Z][^:]*)(:))?([^?#]*)(?:(\?)([^#]*))?(?:(#)(.*))?\z")
});

// Slashes for special schemes swallow any run of / \ CR LF TAB; the
// authority then runs to the next / or \.
static SPECIAL_PATHISH_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"\A([/\\\r\n\t]*)([^/\\]*)([/\\].*)?\z"));

// Non-special schemes only take an authority after exactly two forward
// slashes (with embedded CR/LF/TAB tolerated).
static NONSPECIAL_PATHISH_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"\A([\r\n\t]*(?:/[\r\n\t]*){2})([^/]*)(/.*)?\z"));

// file: accepts backslashes in the two-slash prefix as well.
static FILE_PATHISH_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"\A([\r\n\t]*(?:[/\\][\r\n\t]*){2})([^/\\]*)([/\\].*)?\z"));

// Userinfo is optional as a block ending in @; the host is either a
// bracketed IPv6 literal or colonless; the port is whatever follows the
// next colon.
static AUTHORITY_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"\A(?:([^:]*)(?:(:)(.*))?(@))?(\[[^\]]*\]|[^:]*)(?:(:)(.*))?\z"));

fn group(caps: &Captures<'_>, i: usize) -> ByteString {
    caps.get(i)
        .map(|m| ByteString::from(m.as_bytes()))
        .unwrap_or_default()
}

// A parse regex failing to match means the regex set itself is wrong,
// which nothing downstream can recover from.
#[cold]
fn invariant_violation(name: &str, input: &[u8]) -> ! {
    panic!(
        "{name} regex failed to match {:?}; this is a parser bug",
        ByteString::from(input)
    );
}

/// Split raw bytes into the 17 slots. Total: every input produces a
/// ParsedUrl whose slots concatenate back to the input.
pub fn parse(input: &[u8]) -> ParsedUrl {
    let mut url = ParsedUrl::default();

    let caps = LEADING_JUNK_RE
        .captures(input)
        .unwrap_or_else(|| invariant_violation("leading-junk", input));
    url.leading_junk = group(&caps, 1);
    let core = caps.get(2).map_or(&input[..0], |m| m.as_bytes());

    let caps = TRAILING_JUNK_RE
        .captures(core)
        .unwrap_or_else(|| invariant_violation("trailing-junk", core));
    url.trailing_junk = group(&caps, 2);
    let core = caps.get(1).map_or(&core[..0], |m| m.as_bytes());

    let caps = URL_RE
        .captures(core)
        .unwrap_or_else(|| invariant_violation("url", core));
    url.scheme = group(&caps, 1);
    url.colon_after_scheme = group(&caps, 2);
    url.question_mark = group(&caps, 4);
    url.query = group(&caps, 5);
    url.hash_sign = group(&caps, 6);
    url.fragment = group(&caps, 7);

    // The authority and path stay fused as "pathish" until the scheme is
    // known, because file: boundaries differ from everything else.
    let pathish = caps.get(3).map_or(Vec::new(), |m| m.as_bytes().to_vec());
    parse_pathish(&mut url, &pathish);

    url
}

/// Split the pathish (everything between `scheme:` and `?`/`#`) into
/// slashes, authority and path, then split the authority.
///
/// Also reentered by canonicalization when a default scheme is assigned
/// and the old path may hide an authority.
pub(crate) fn parse_pathish(url: &mut ParsedUrl, pathish: &[u8]) {
    let clean = scheme::clean_scheme(&url.scheme);
    let kind = scheme::scheme_type(&clean);

    if kind == SchemeType::File {
        if let Some(caps) = FILE_PATHISH_RE.captures(pathish) {
            // file: with host
            url.slashes = group(&caps, 1);
            url.host = group(&caps, 2);
            url.path = group(&caps, 3);
        } else {
            // file: without host
            url.slashes = ByteString::new();
            url.host = ByteString::new();
            url.path = ByteString::from(pathish);
        }
        // file: urls never carry userinfo or a port
        url.username = ByteString::new();
        url.colon_before_password = ByteString::new();
        url.password = ByteString::new();
        url.at_sign = ByteString::new();
        url.colon_before_port = ByteString::new();
        url.port = ByteString::new();
    } else if kind.is_special() {
        let caps = SPECIAL_PATHISH_RE
            .captures(pathish)
            .unwrap_or_else(|| invariant_violation("special-pathish", pathish));
        url.slashes = group(&caps, 1);
        url.path = group(&caps, 3);
        let authority = caps.get(2).map_or(Vec::new(), |m| m.as_bytes().to_vec());
        parse_authority(url, &authority);
    } else if let Some(caps) = NONSPECIAL_PATHISH_RE.captures(pathish) {
        url.slashes = group(&caps, 1);
        url.path = group(&caps, 3);
        let authority = caps.get(2).map_or(Vec::new(), |m| m.as_bytes().to_vec());
        parse_authority(url, &authority);
    } else {
        // Not special and no leading //, so the whole pathish is opaque
        url.path = ByteString::from(pathish);
        url.slashes = ByteString::new();
        url.username = ByteString::new();
        url.colon_before_password = ByteString::new();
        url.password = ByteString::new();
        url.at_sign = ByteString::new();
        url.host = ByteString::new();
        url.colon_before_port = ByteString::new();
        url.port = ByteString::new();
    }
}

fn parse_authority(url: &mut ParsedUrl, authority: &[u8]) {
    let caps = AUTHORITY_RE
        .captures(authority)
        .unwrap_or_else(|| invariant_violation("authority", authority));
    url.username = group(&caps, 1);
    url.colon_before_password = group(&caps, 2);
    url.password = group(&caps, 3);
    url.at_sign = group(&caps, 4);
    url.host = group(&caps, 5);
    url.colon_before_port = group(&caps, 6);
    url.port = group(&caps, 7);
}
