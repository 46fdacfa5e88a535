//! Canonicalization pipelines.
//!
//! Each operation is a total function on a mutable [`ParsedUrl`]; a
//! pipeline is a named, ordered list of operation references. Keeping the
//! steps as data means each transform stays testable in isolation and a
//! pipeline's composition is inspectable at runtime.

mod aggressive;
mod semantic;
mod whatwg;

use crate::parsed_url::ParsedUrl;
use crate::scheme;

/// A single canonicalization step.
pub type CanonOp = fn(&mut ParsedUrl);

/// A named ordered composition of canonicalization steps.
///
/// # Examples
///
/// ```
/// use urlkey::{ParsedUrl, SEMANTIC_PRECISE};
///
/// let mut url = ParsedUrl::parse("  HTTP://EXAMPLE.com:80/a/../b?x=1  ");
/// SEMANTIC_PRECISE.canonicalize(&mut url);
/// assert_eq!(url.to_string(), "http://example.com/b?x=1");
/// ```
pub struct Canonicalizer {
    name: &'static str,
    steps: &'static [CanonOp],
}

impl Canonicalizer {
    /// Run every step, in order, against `url`.
    pub fn canonicalize(&self, url: &mut ParsedUrl) {
        for step in self.steps {
            step(url);
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn steps(&self) -> &'static [CanonOp] {
        self.steps
    }
}

/// True when the scheme slot, as it currently reads, is a special scheme.
/// Pipelines lowercase the scheme before any step that calls this.
pub(crate) fn is_special(url: &ParsedUrl) -> bool {
    scheme::scheme_type(&url.scheme).is_special()
}

/// The WHATWG URL living standard steps, nothing more: what a browser
/// address bar would make of the input.
pub static WHATWG: Canonicalizer = Canonicalizer {
    name: "whatwg",
    steps: &[
        whatwg::remove_leading_trailing_junk,
        whatwg::remove_tabs_and_newlines,
        whatwg::lowercase_scheme,
        whatwg::elide_default_port,
        whatwg::clean_up_userinfo,
        whatwg::two_slashes,
        whatwg::normalize_ip_address,
        whatwg::punycode_special_host,
        whatwg::pct_encode_slots,
        whatwg::fix_backslashes,
        whatwg::leading_slash,
        whatwg::normalize_path_dots,
        whatwg::empty_path_to_slash,
    ],
};

const SEMANTIC_PRECISE_STEPS: &[CanonOp] = &[
    whatwg::remove_leading_trailing_junk,
    semantic::default_scheme_http,
    whatwg::remove_tabs_and_newlines,
    whatwg::lowercase_scheme,
    whatwg::elide_default_port,
    whatwg::clean_up_userinfo,
    whatwg::two_slashes,
    semantic::pct_decode_repeatedly_except_query,
    whatwg::normalize_ip_address,
    semantic::fix_host_dots,
    whatwg::punycode_special_host,
    semantic::remove_userinfo,
    semantic::less_dumb_pct_encode,
    semantic::less_dumb_pct_recode_query,
    whatwg::fix_backslashes,
    whatwg::leading_slash,
    whatwg::normalize_path_dots,
    semantic::collapse_consecutive_slashes,
    whatwg::empty_path_to_slash,
    semantic::alpha_reorder_query,
];

/// Everything WHATWG does plus the cleanups that make two URLs match when
/// they "mean" the same page: default http scheme, host dot repair,
/// percent-encoding standardization, query param sorting, userinfo
/// removal.
pub static SEMANTIC_PRECISE: Canonicalizer = Canonicalizer {
    name: "semantic-precise",
    steps: SEMANTIC_PRECISE_STEPS,
};

/// The composition aggressive builds on. Same steps as
/// [`SEMANTIC_PRECISE`] under the name the pipeline table uses.
pub static SEMANTIC: Canonicalizer = Canonicalizer {
    name: "semantic",
    steps: SEMANTIC_PRECISE_STEPS,
};

/// Fuzzy-matching canonicalization in the spirit of Wayback: everything
/// semantic does, then scheme/www/session-id erasure and lowercasing.
/// The query is re-sorted at the end because lowercasing can change the
/// param order.
pub static AGGRESSIVE: Canonicalizer = Canonicalizer {
    name: "aggressive",
    steps: &[
        // semantic-precise prefix
        whatwg::remove_leading_trailing_junk,
        semantic::default_scheme_http,
        whatwg::remove_tabs_and_newlines,
        whatwg::lowercase_scheme,
        whatwg::elide_default_port,
        whatwg::clean_up_userinfo,
        whatwg::two_slashes,
        semantic::pct_decode_repeatedly_except_query,
        whatwg::normalize_ip_address,
        semantic::fix_host_dots,
        whatwg::punycode_special_host,
        semantic::remove_userinfo,
        semantic::less_dumb_pct_encode,
        semantic::less_dumb_pct_recode_query,
        whatwg::fix_backslashes,
        whatwg::leading_slash,
        whatwg::normalize_path_dots,
        semantic::collapse_consecutive_slashes,
        whatwg::empty_path_to_slash,
        semantic::alpha_reorder_query,
        // aggressive extras
        aggressive::https_to_http,
        aggressive::strip_www,
        aggressive::lowercase_path,
        aggressive::lowercase_query,
        aggressive::strip_session_ids_from_query,
        aggressive::strip_session_ids_from_path,
        aggressive::strip_trailing_slash_unless_empty,
        aggressive::remove_redundant_ampersands_from_query,
        aggressive::omit_question_mark_if_query_empty,
        semantic::alpha_reorder_query,
    ],
};
