//! The aggressive operation set: fuzzy-matching erasures on top of the
//! semantic steps, close to the rules Wayback-style replay uses. These
//! run after the semantic prefix, so hosts are already punycoded and the
//! query is already recoded.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use crate::bytestring::ByteString;
use crate::parsed_url::ParsedUrl;

pub fn https_to_http(url: &mut ParsedUrl) {
    if url.scheme.eq_ignore_ascii_case(b"https") {
        url.scheme = ByteString::from("http");
    }
}

static WWW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)^www[0-9]*\.").unwrap());

/// `www.`, `www2.`, `www39.` prefixes are hosting artifacts, not
/// identity.
pub fn strip_www(url: &mut ParsedUrl) {
    url.host = url.host.replace_all(&WWW_RE, b"");
}

pub fn lowercase_path(url: &mut ParsedUrl) {
    url.path = url.path.to_ascii_lowercase();
}

pub fn lowercase_query(url: &mut ParsedUrl) {
    url.query = url.query.to_ascii_lowercase();
}

// Session-id params, matched whole between `&` or string bounds. The
// leading delimiter is captured and restored; the trailing `&` is
// consumed. Replacement runs to a fixed point so adjacent session params
// all go.
static QUERY_SESSIONID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i-u)(^|&)(?:jsessionid=[0-9a-z$]{10,}|sessionid=[0-9a-z]{16,}|phpsessid=[0-9a-z]{16,}|sid=[0-9a-z]{16,}|aspsessionid[a-z]{8}=[0-9a-z]{16,}|cfid=[0-9]+&cftoken=[0-9a-z-]+)(?:&|$)",
    )
    .unwrap()
});

fn replace_to_fixed_point(input: &ByteString, re: &Regex, replacement: &[u8]) -> ByteString {
    let mut current = input.clone();
    loop {
        let next = current.replace_all(re, replacement);
        if next == current {
            return next;
        }
        current = next;
    }
}

pub fn strip_session_ids_from_query(url: &mut ParsedUrl) {
    url.query = replace_to_fixed_point(&url.query, &QUERY_SESSIONID_RE, b"${1}");
}

static ASPX_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i-u)\.aspx$").unwrap());

// ASP.NET cookieless sessions: "/(24chars)/" or "/((s(24chars))...)/"
// path segments, only meaningful on .aspx paths.
static ASPX_SESSIONID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)(/)(?:\([0-9a-z]{24}\)/|\((?:[a-z]\([0-9a-z]{24}\))+\)/)").unwrap()
});

static PATH_JSESSIONID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u);jsessionid=[0-9a-z]{32}$").unwrap());

pub fn strip_session_ids_from_path(url: &mut ParsedUrl) {
    if url.path.is_match(&ASPX_SUFFIX_RE) {
        url.path = replace_to_fixed_point(&url.path, &ASPX_SESSIONID_RE, b"${1}");
    }
    url.path = url.path.replace_all(&PATH_JSESSIONID_RE, b"");
}

static AMP_RUNS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)&&+").unwrap());

/// Collapse `&&` runs and trim `&` off both ends of the query.
pub fn remove_redundant_ampersands_from_query(url: &mut ParsedUrl) {
    let collapsed = url.query.replace_all(&AMP_RUNS_RE, b"&");
    let bytes = collapsed.as_bytes();
    let start = bytes.iter().position(|&b| b != b'&').unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|&b| b != b'&').map_or(start, |p| p + 1);
    url.query = ByteString::from(&bytes[start..end]);
}

pub fn strip_trailing_slash_unless_empty(url: &mut ParsedUrl) {
    if url.path.len() > 1 && url.path.last() == Some(&b'/') {
        let len = url.path.len() - 1;
        url.path.truncate(len);
    }
}

pub fn omit_question_mark_if_query_empty(url: &mut ParsedUrl) {
    if url.query.is_empty() {
        url.question_mark.clear();
    }
}
