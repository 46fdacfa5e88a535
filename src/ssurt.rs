//! SSURT: a sort-friendly URL serialization.
//!
//! The host is reversed into comma-delimited segments and moved to the
//! front, followed by port and scheme, so that keys for the same
//! registered domain (and then the same host, port and scheme) sort
//! together in an archival index.

use crate::bytestring::ByteString;
use crate::ipv4;
use crate::parsed_url::ParsedUrl;

/// Serialize with the SSURT field order.
pub(crate) fn format(url: &ParsedUrl) -> ByteString {
    let host = ssurt_host(&url.host);
    let fields: [&ByteString; 17] = [
        &url.leading_junk,
        &host,
        &url.slashes,
        &url.port,
        &url.colon_before_port,
        &url.scheme,
        &url.at_sign,
        &url.username,
        &url.colon_before_password,
        &url.password,
        &url.colon_after_scheme,
        &url.path,
        &url.question_mark,
        &url.query,
        &url.hash_sign,
        &url.fragment,
        &url.trailing_junk,
    ];
    let mut out = Vec::with_capacity(fields.iter().map(|f| f.len()).sum::<usize>() + 1);
    for field in fields {
        out.extend_from_slice(field);
    }
    ByteString::from(out)
}

/// Hosts that are empty, IPv6 literals or IPv4 addresses sort as-is;
/// everything else is reversed.
pub(crate) fn ssurt_host(host: &ByteString) -> ByteString {
    if host.is_empty() || host[0] == b'[' || ipv4::parse(host).is_ok() {
        host.clone()
    } else {
        reverse_host(host)
    }
}

/// Swap commas and dots, reverse the dot-delimited segments and append a
/// trailing comma: `x,y.b.c` becomes `c,b,x.y,`.
pub(crate) fn reverse_host(host: &ByteString) -> ByteString {
    let nocommas: Vec<u8> = host
        .iter()
        .map(|&b| if b == b',' { b'.' } else { b })
        .collect();
    let mut out = Vec::with_capacity(host.len() + 1);
    let mut end = host.len();
    for i in (0..host.len()).rev() {
        if host[i] == b'.' {
            out.extend_from_slice(&nocommas[i + 1..end]);
            out.push(b',');
            end = i;
        }
    }
    out.extend_from_slice(&nocommas[..end]);
    out.push(b',');
    ByteString::from(out)
}
