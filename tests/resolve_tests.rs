//! Resolution through the public API: chained hops the way a crawler
//! follows redirects and hrefs off an already-parsed base.

use urlkey::{ParsedUrl, SEMANTIC_PRECISE};

fn parse(input: &str) -> ParsedUrl {
    ParsedUrl::parse(input)
}

#[test]
fn test_redirect_chain() {
    let start = parse("http://example.com/old/page.html");
    let hop1 = start.resolve(&parse("https://example.com/new/page.html"));
    assert_eq!(hop1.to_string(), "https://example.com/new/page.html");

    let hop2 = hop1.resolve(&parse("sibling.html"));
    assert_eq!(hop2.to_string(), "https:example.com/new/sibling.html");
}

#[test]
fn test_resolved_relative_canonicalizes_clean() {
    // A path-relative resolution leaves the slashes slot empty; the
    // canonical form still compares equal across spellings of the path
    let base = parse("http://example.com/a/b/c.html");
    let mut direct = base.resolve(&parse("../d.html"));
    let mut indirect = base.resolve(&parse("./../x/../d.html"));
    SEMANTIC_PRECISE.canonicalize(&mut direct);
    SEMANTIC_PRECISE.canonicalize(&mut indirect);
    assert_eq!(direct.to_string(), "http:example.com/a/d.html");
    assert_eq!(direct, indirect);
}

#[test]
fn test_resolve_does_not_mutate_inputs() {
    let base = parse("http://example.com/a");
    let relative = parse("b?q=1");
    let base_before = base.clone();
    let relative_before = relative.clone();
    let _ = base.resolve(&relative);
    assert_eq!(base, base_before);
    assert_eq!(relative, relative_before);
}

#[test]
fn test_resolve_keeps_base_userinfo_and_port() {
    let base = parse("ftp://user:pw@files.example.com:2121/pub/");
    let resolved = base.resolve(&parse("/incoming/file.bin"));
    assert_eq!(resolved.username, "user");
    assert_eq!(resolved.password, "pw");
    assert_eq!(resolved.port, "2121");
    assert_eq!(resolved.path, "/incoming/file.bin");
}

#[test]
fn test_opaque_base_dirname() {
    // An opaque base has no slash in its path, so there is no dirname to
    // prepend
    let base = parse("http://example.com/file");
    let mut base_no_slash = base.clone();
    base_no_slash.path = urlkey::ByteString::from("file");
    let resolved = base_no_slash.resolve(&parse("other"));
    assert_eq!(resolved.path, "other");
}
