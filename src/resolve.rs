//! Relative-to-base URL resolution.
//!
//! Resolution is a pure function of two parsed URLs: the base is never
//! mutated and the relative URL is cloned, then patched. Dot segments are
//! left alone; collapsing them is a canonicalization step. Note that the
//! slashes slot always comes from the relative URL, so a resolved
//! path-relative reference reads `http:host/path` until canonicalized.

use crate::bytestring::ByteString;
use crate::parsed_url::ParsedUrl;

impl ParsedUrl {
    /// Resolve `relative` against this base.
    ///
    /// ```
    /// use urlkey::ParsedUrl;
    ///
    /// let base = ParsedUrl::parse("http://example.com/a/b");
    /// let relative = ParsedUrl::parse("https://cdn.example.net/logo.png");
    /// assert_eq!(base.resolve(&relative).to_string(), "https://cdn.example.net/logo.png");
    /// ```
    pub fn resolve(&self, relative: &ParsedUrl) -> ParsedUrl {
        let base = self;
        let mut url = relative.clone();

        // Network-path references only take the base scheme; the colon
        // slot stays the relative's
        if !url.slashes.is_empty() {
            if url.scheme.is_empty() {
                url.scheme = base.scheme.clone();
            }
            return url;
        }

        if !url.scheme.is_empty() && !url.scheme.eq_ignore_ascii_case(&base.scheme) {
            return url;
        }

        url.scheme = base.scheme.clone();
        url.colon_after_scheme = base.colon_after_scheme.clone();
        url.username = base.username.clone();
        url.colon_before_password = base.colon_before_password.clone();
        url.password = base.password.clone();
        url.at_sign = base.at_sign.clone();
        url.host = base.host.clone();
        url.colon_before_port = base.colon_before_port.clone();
        url.port = base.port.clone();

        // A same-scheme relative like "http:other.com" parses its
        // would-be host into the host slot with an empty path; that host
        // is really the start of a relative path
        if url.path.is_empty() && !relative.host.is_empty() {
            url.path = relative.host.clone();
        }

        if url.path.is_empty() || url.path[0] == b'/' {
            return url;
        }

        let dirname = base.dirname();
        let mut path = Vec::with_capacity(dirname.len() + url.path.len());
        path.extend_from_slice(dirname);
        path.extend_from_slice(&url.path);
        url.path = ByteString::from(path);
        url
    }

    /// `path` up to and including its last `/`, or empty when it has none.
    fn dirname(&self) -> &[u8] {
        match memchr::memrchr(b'/', &self.path) {
            Some(i) => &self.path[..=i],
            None => b"",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(base: &str, relative: &str) -> String {
        ParsedUrl::parse(base)
            .resolve(&ParsedUrl::parse(relative))
            .to_string()
    }

    #[test]
    fn test_absolute_relative_wins() {
        assert_eq!(
            resolved("http://example.com/a", "https://other.com/b"),
            "https://other.com/b"
        );
    }

    #[test]
    fn test_network_path_takes_base_scheme() {
        // Only the scheme slot transfers; the schemeless relative had no
        // colon, so the result has none either
        assert_eq!(
            resolved("http://example.com/a", "//other.com/b"),
            "http//other.com/b"
        );
    }

    #[test]
    fn test_cross_scheme_untouched() {
        assert_eq!(
            resolved("http://example.com/", "mailto:someone@example.com"),
            "mailto:someone@example.com"
        );
    }

    // The slashes slot is not inherited, so resolved references read
    // "http:host/path" until a canonicalizer runs

    #[test]
    fn test_path_absolute() {
        assert_eq!(
            resolved("http://u:p@example.com:8080/a/b?x#y", "/c?q"),
            "http:u:p@example.com:8080/c?q"
        );
    }

    #[test]
    fn test_path_relative() {
        assert_eq!(resolved("http://example.com/a/b", "c/d"), "http:example.com/a/c/d");
        assert_eq!(resolved("http://example.com/a/b/", "c"), "http:example.com/a/b/c");
    }

    #[test]
    fn test_query_only() {
        assert_eq!(resolved("http://example.com/a/b", "?q=1"), "http:example.com?q=1");
    }

    #[test]
    fn test_fragment_only() {
        assert_eq!(resolved("http://example.com/a", "#frag"), "http:example.com#frag");
    }

    #[test]
    fn test_same_scheme_host_degenerates_into_path() {
        // "http:other.com" parses other.com into the host slot; resolution
        // folds it back into the path
        assert_eq!(
            resolved("http://example.com/dir/file", "http:other.com"),
            "http:example.com/dir/other.com"
        );
    }

    #[test]
    fn test_no_dot_normalization() {
        assert_eq!(
            resolved("http://example.com/a/b", "../c"),
            "http:example.com/a/../c"
        );
    }

    #[test]
    fn test_base_untouched() {
        let base = ParsedUrl::parse("http://example.com/a");
        let before = base.clone();
        base.resolve(&ParsedUrl::parse("b"));
        assert_eq!(base, before);
    }
}
