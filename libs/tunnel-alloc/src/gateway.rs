use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::Error;

/// Fails with [`Error::InvalidRange`] if `range` has no host bits (a `/32` or `/128`)
pub fn ensure_has_host_bits(range: IpNet) -> Result<(), Error> {
    if range.max_prefix_len() == range.prefix_len() {
        return Err(Error::InvalidRange(range));
    }
    Ok(())
}

/// Computes the gateway (first usable host) of a network range
pub fn compute_gateway(range: IpNet) -> Result<IpAddr, Error> {
    match range {
        IpNet::V4(range) => compute_gateway_v4(range).map(IpAddr::V4),
        IpNet::V6(range) => compute_gateway_v6(range).map(IpAddr::V6),
    }
}

/// Computes the gateway of an IPv4 network range
#[profiling::function]
pub fn compute_gateway_v4(range: Ipv4Net) -> Result<Ipv4Addr, Error> {
    ensure_has_host_bits(range.into())?;
    Ok(Ipv4Addr::from(with_lowest_bit_set(range.network().octets())))
}

/// Computes the gateway of an IPv6 network range
#[profiling::function]
pub fn compute_gateway_v6(range: Ipv6Net) -> Result<Ipv6Addr, Error> {
    ensure_has_host_bits(range.into())?;
    Ok(Ipv6Addr::from(with_lowest_bit_set(range.network().octets())))
}

/// Sets the least significant bit of the final octet. Takes the octets by value so the caller's copy is untouched.
fn with_lowest_bit_set<const N: usize>(mut octets: [u8; N]) -> [u8; N] {
    if let Some(last) = octets.last_mut() {
        *last |= 1;
    }
    octets
}
