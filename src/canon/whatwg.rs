//! The WHATWG operation set: the transforms a conforming browser applies
//! when it normalizes an address-bar URL.

use percent_encoding::{AsciiSet, CONTROLS};

use super::is_special;
use crate::bytestring::ByteString;
use crate::parsed_url::ParsedUrl;
use crate::scheme::{self, SchemeType};
use crate::{idna, ipv4, ipv6, percent};

// WHATWG percent-encode sets (https://url.spec.whatwg.org/#percent-encoded-bytes).
// Non-ASCII bytes are always encoded on top of these.
const FRAGMENT_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');
const PATH_SET: &AsciiSet = &FRAGMENT_SET.add(b'#').add(b'?').add(b'^').add(b'{').add(b'}');
const USERINFO_SET: &AsciiSet = &PATH_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');
const QUERY_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'<').add(b'>');
const SPECIAL_QUERY_SET: &AsciiSet = &QUERY_SET.add(b'\'');

pub fn remove_leading_trailing_junk(url: &mut ParsedUrl) {
    url.leading_junk.clear();
    url.trailing_junk.clear();
}

fn strip_tabs_and_newlines(slot: &mut ByteString) {
    if memchr::memchr3(b'\t', b'\n', b'\r', slot).is_none() {
        return;
    }
    let kept: Vec<u8> = slot
        .iter()
        .copied()
        .filter(|b| !matches!(b, b'\t' | b'\n' | b'\r'))
        .collect();
    *slot = ByteString::from(kept);
}

/// Strip CR/LF/TAB from every slot except the junk slots. The
/// single-character separator slots can never contain them.
pub fn remove_tabs_and_newlines(url: &mut ParsedUrl) {
    for slot in [
        &mut url.scheme,
        &mut url.slashes,
        &mut url.username,
        &mut url.password,
        &mut url.host,
        &mut url.port,
        &mut url.path,
        &mut url.query,
        &mut url.fragment,
    ] {
        strip_tabs_and_newlines(slot);
    }
}

pub fn lowercase_scheme(url: &mut ParsedUrl) {
    url.scheme = url.scheme.to_ascii_lowercase();
}

fn backslashes_to_slashes(slot: &mut ByteString) {
    if memchr::memchr(b'\\', slot).is_none() {
        return;
    }
    let fixed: Vec<u8> = slot
        .iter()
        .map(|&b| if b == b'\\' { b'/' } else { b })
        .collect();
    *slot = ByteString::from(fixed);
}

/// Special schemes treat `\` as `/` in the slashes and the path.
pub fn fix_backslashes(url: &mut ParsedUrl) {
    if is_special(url) {
        backslashes_to_slashes(&mut url.slashes);
        backslashes_to_slashes(&mut url.path);
    }
}

/// Numeric port value, tolerant of leading zeros. None when empty,
/// non-digit, or absurdly long.
fn port_number(port: &ByteString) -> Option<u32> {
    if port.is_empty() || !port.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let significant = match port.iter().position(|&b| b != b'0') {
        Some(i) => &port[i..],
        None => return Some(0),
    };
    std::str::from_utf8(significant).ok()?.parse().ok()
}

/// Drop the port when it equals the scheme's default, comparing
/// numerically so `:0080` elides too.
pub fn elide_default_port(url: &mut ParsedUrl) {
    let Some(default) = scheme::scheme_type(&url.scheme).default_port() else {
        return;
    };
    if port_number(&url.port) == Some(u32::from(default)) {
        url.port.clear();
        url.colon_before_port.clear();
    }
}

/// Userinfo subfields only exist when their separators do: no `@` means
/// no userinfo at all, no `:` means no password.
pub fn clean_up_userinfo(url: &mut ParsedUrl) {
    if url.at_sign.is_empty() {
        url.username.clear();
        url.colon_before_password.clear();
        url.password.clear();
    }
    if url.colon_before_password.is_empty() {
        url.password.clear();
    }
}

/// Any run of slashes collapses to exactly `//` for special schemes.
pub fn two_slashes(url: &mut ParsedUrl) {
    if !url.slashes.is_empty() && is_special(url) {
        url.slashes = ByteString::from("//");
    }
}

/// Rewrite hosts that parse as addresses: liberal IPv4 forms become
/// dotted decimal, bracketed IPv6 literals become canonical compressed
/// form. Anything that fails to parse is left verbatim.
pub fn normalize_ip_address(url: &mut ParsedUrl) {
    if url.host.is_empty() {
        return;
    }
    if url.host[0] == b'[' {
        if let Ok(canonical) = ipv6::canonicalize_literal(&url.host) {
            url.host = ByteString::from(canonical);
        }
        return;
    }
    if let Ok(addr) = ipv4::parse(&url.host) {
        url.host = ByteString::from(ipv4::serialize(addr));
    }
}

/// IDNA-encode the host for special schemes other than file. Failures
/// keep the host verbatim; bracketed literals are not domains.
pub fn punycode_special_host(url: &mut ParsedUrl) {
    if url.host.is_empty() || url.host[0] == b'[' {
        return;
    }
    let kind = scheme::scheme_type(&url.scheme);
    if kind.is_special() && kind != SchemeType::File {
        if let Ok(ascii) = idna::to_ascii(&url.host) {
            url.host = ascii;
        }
    }
}

/// Per-slot WHATWG percent-encoding. The host is only touched for
/// non-special schemes (special hosts went through IDNA instead).
pub fn pct_encode_slots(url: &mut ParsedUrl) {
    url.username = percent::encode(&url.username, USERINFO_SET);
    url.password = percent::encode(&url.password, USERINFO_SET);
    if !is_special(url) {
        url.host = percent::encode(&url.host, CONTROLS);
    }
    url.path = percent::encode(&url.path, PATH_SET);
    let query_set = if is_special(url) { SPECIAL_QUERY_SET } else { QUERY_SET };
    url.query = percent::encode(&url.query, query_set);
    url.fragment = percent::encode(&url.fragment, FRAGMENT_SET);
}

/// Special-scheme paths are rooted: prepend `/` when the path starts with
/// anything else.
pub fn leading_slash(url: &mut ParsedUrl) {
    if is_special(url) && !url.path.is_empty() && url.path[0] != b'/' {
        let mut path = Vec::with_capacity(url.path.len() + 1);
        path.push(b'/');
        path.extend_from_slice(&url.path);
        url.path = ByteString::from(path);
    }
}

fn pop_segment(output: &mut Vec<u8>) {
    let new_len = memchr::memrchr(b'/', output).unwrap_or(0);
    output.truncate(new_len);
}

// RFC 3986 remove_dot_segments, byte-oriented.
fn remove_dot_segments(path: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(path.len());
    let mut i = 0;
    while i < path.len() {
        let rest = &path[i..];
        if rest.starts_with(b"../") {
            i += 3;
        } else if rest.starts_with(b"./") {
            i += 2;
        } else if rest.starts_with(b"/./") {
            // keep the slash for the next round
            i += 2;
        } else if rest == b"/." {
            output.push(b'/');
            break;
        } else if rest.starts_with(b"/../") {
            pop_segment(&mut output);
            i += 3;
        } else if rest == b"/.." {
            pop_segment(&mut output);
            output.push(b'/');
            break;
        } else if rest == b"." || rest == b".." {
            break;
        } else {
            // move one segment, including its leading slash if any
            let start = i;
            let mut j = if rest[0] == b'/' { i + 1 } else { i };
            while j < path.len() && path[j] != b'/' {
                j += 1;
            }
            output.extend_from_slice(&path[start..j]);
            i = j;
        }
    }
    output
}

/// Resolve `.` and `..` segments in special-scheme paths.
pub fn normalize_path_dots(url: &mut ParsedUrl) {
    if !is_special(url) || memchr::memchr(b'.', &url.path).is_none() {
        return;
    }
    url.path = ByteString::from(remove_dot_segments(&url.path));
}

/// A special URL always has at least `/` as its path.
pub fn empty_path_to_slash(url: &mut ParsedUrl) {
    if is_special(url) && url.path.is_empty() {
        url.path = ByteString::from("/");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> ParsedUrl {
        ParsedUrl::parse(input)
    }

    #[test]
    fn test_remove_tabs_and_newlines() {
        let mut url = parsed("ht\ntp://exa\tmple.com/pa\rth");
        remove_tabs_and_newlines(&mut url);
        assert_eq!(url.scheme, "http");
        assert_eq!(url.host, "example.com");
        assert_eq!(url.path, "/path");
    }

    #[test]
    fn test_elide_default_port() {
        let mut url = parsed("http://example.com:80/");
        elide_default_port(&mut url);
        assert!(url.port.is_empty());
        assert!(url.colon_before_port.is_empty());

        let mut url = parsed("http://example.com:0080/");
        elide_default_port(&mut url);
        assert!(url.port.is_empty());

        let mut url = parsed("http://example.com:8080/");
        elide_default_port(&mut url);
        assert_eq!(url.port, "8080");

        let mut url = parsed("wss://example.com:443/");
        elide_default_port(&mut url);
        assert!(url.port.is_empty());

        // 443 is not the http default
        let mut url = parsed("http://example.com:443/");
        elide_default_port(&mut url);
        assert_eq!(url.port, "443");
    }

    #[test]
    fn test_clean_up_userinfo() {
        // Stray userinfo without @ is dropped
        let mut url = parsed("http://example.com/");
        url.username = ByteString::from("ghost");
        clean_up_userinfo(&mut url);
        assert!(url.username.is_empty());

        // Password without : is dropped
        let mut url = parsed("http://user@example.com/");
        url.password = ByteString::from("ghost");
        clean_up_userinfo(&mut url);
        assert_eq!(url.username, "user");
        assert!(url.password.is_empty());
    }

    #[test]
    fn test_two_slashes() {
        let mut url = parsed("http:////example.com/");
        two_slashes(&mut url);
        assert_eq!(url.slashes, "//");

        // No slashes stays no slashes
        let mut url = parsed("http:example.com");
        two_slashes(&mut url);
        assert!(url.slashes.is_empty());

        // Non-special schemes keep their slashes verbatim
        let mut url = parsed("git://example.com/");
        two_slashes(&mut url);
        assert_eq!(url.slashes, "//");
    }

    #[test]
    fn test_fix_backslashes() {
        let mut url = parsed("http:\\\\host\\path");
        two_slashes(&mut url);
        fix_backslashes(&mut url);
        assert_eq!(url.slashes, "//");
        assert_eq!(url.path, "/path");
    }

    #[test]
    fn test_normalize_ip_address() {
        let mut url = parsed("http://0300.0250.01.01/");
        normalize_ip_address(&mut url);
        assert_eq!(url.host, "192.168.1.1");

        let mut url = parsed("http://0xC0A80101/");
        normalize_ip_address(&mut url);
        assert_eq!(url.host, "192.168.1.1");

        let mut url = parsed("http://[2001:DB8:0:0:0:0:0:1]/");
        normalize_ip_address(&mut url);
        assert_eq!(url.host, "[2001:db8::1]");

        let mut url = parsed("http://example.com/");
        normalize_ip_address(&mut url);
        assert_eq!(url.host, "example.com");
    }

    #[test]
    fn test_punycode_special_host() {
        let mut url = parsed("http://Example.COM/");
        punycode_special_host(&mut url);
        assert_eq!(url.host, "example.com");

        // file hosts are not domains
        let mut url = parsed("file://SERVER/x");
        punycode_special_host(&mut url);
        assert_eq!(url.host, "SERVER");

        // opaque schemes keep their host
        let mut url = parsed("git://Example.COM/");
        punycode_special_host(&mut url);
        assert_eq!(url.host, "Example.COM");
    }

    #[test]
    fn test_pct_encode_slots() {
        let mut url = parsed("http://example.com/a b?c d#e f");
        pct_encode_slots(&mut url);
        assert_eq!(url.path, "/a%20b");
        assert_eq!(url.query, "c%20d");
        assert_eq!(url.fragment, "e%20f");
    }

    #[test]
    fn test_leading_slash() {
        let mut url = parsed("http:example.com");
        // host "example.com", empty path: nothing to root
        leading_slash(&mut url);
        assert!(url.path.is_empty());

        let mut url = parsed("http://example.com/x");
        url.path = ByteString::from("x");
        leading_slash(&mut url);
        assert_eq!(url.path, "/x");
    }

    #[test]
    fn test_remove_dot_segments() {
        assert_eq!(remove_dot_segments(b"/a/b/../c"), b"/a/c");
        assert_eq!(remove_dot_segments(b"/a/./b"), b"/a/b");
        assert_eq!(remove_dot_segments(b"/.."), b"/");
        assert_eq!(remove_dot_segments(b"/a/.."), b"/");
        assert_eq!(remove_dot_segments(b"/a/."), b"/a/");
        assert_eq!(remove_dot_segments(b"/a/../../b"), b"/b");
        assert_eq!(remove_dot_segments(b"a/../b"), b"/b");
        assert_eq!(remove_dot_segments(b"/plain/path"), b"/plain/path");
    }

    #[test]
    fn test_empty_path_to_slash() {
        let mut url = parsed("http://example.com");
        empty_path_to_slash(&mut url);
        assert_eq!(url.path, "/");

        let mut url = parsed("foo:");
        empty_path_to_slash(&mut url);
        assert!(url.path.is_empty());
    }
}
