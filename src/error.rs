use thiserror::Error;

/// Errors from the fallible leaves of the crate.
///
/// None of these reach the public API: parsing never fails, and the
/// canonicalizers absorb every error by leaving the affected bytes
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid IPv4 address")]
    InvalidIpv4,
    #[error("invalid IPv6 address")]
    InvalidIpv6,
    #[error("IDNA processing error")]
    Idna,
}

pub type Result<T> = core::result::Result<T, Error>;
