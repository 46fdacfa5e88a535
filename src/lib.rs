//! Byte-preserving URL parsing, canonicalization and SSURT serialization
//! for web-archival pipelines.
//!
//! Parsing never fails and never loses a byte: any input splits into 17
//! slots that concatenate back to the original. Canonicalizers then
//! mutate the slots in place, and the result reads back as a string or as
//! a sort-friendly SSURT key.

// Internal modules (not public API)
mod bytestring;
mod canon;
mod error;
mod idna;
mod ipv4;
mod ipv6;
mod parsed_url;
mod parser;
mod percent;
mod resolve;
mod scheme;
mod ssurt;

// Public API
pub use bytestring::ByteString;
pub use canon::{CanonOp, Canonicalizer, AGGRESSIVE, SEMANTIC, SEMANTIC_PRECISE, WHATWG};
pub use parsed_url::ParsedUrl;
