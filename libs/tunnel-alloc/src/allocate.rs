use ipnet::{Ipv4Net, Ipv6Net};
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::{
    digits::decimal_digits_as_hex,
    error::Error,
    gateway::{compute_gateway_v4, compute_gateway_v6},
};

/// The pair of addresses issued to a single client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressPair {
    pub ipv4: Ipv4Addr,
    pub ipv6: Ipv6Addr,
}

/// Packs a client identifier into the host bits used for each address family.
///
/// The identifier is consumed one byte at a time, least significant first.
/// Each byte lands one octet further from the end of the IPv4 address, and two
/// octets further from the end of the IPv6 address after passing through
/// [`decimal_digits_as_hex`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn host_offsets(id: u32) -> (u32, u128) {
    let mut ipv4_offset = 0u32;
    let mut ipv6_offset = 0u128;

    let mut remaining = id;
    let mut position = 0;
    while remaining != 0 {
        let byte = (remaining & 0xff) as u8;
        ipv4_offset |= u32::from(byte) << (8 * position);
        ipv6_offset |= u128::from(decimal_digits_as_hex(byte)) << (16 * position);

        remaining >>= 8;
        position += 1;
    }

    (ipv4_offset, ipv6_offset)
}

/// Derives the IPv4 and IPv6 address of client `id`.
///
/// Both addresses are returned together or not at all. The result never
/// contains a range's network address, gateway or all-ones address, so
/// identifiers `0` and `1` always fail with [`Error::PoolExhausted`].
#[profiling::function]
pub fn allocate(ipv4_range: Ipv4Net, ipv6_range: Ipv6Net, id: u32) -> Result<AddressPair, Error> {
    // The gateways must be computed the same way the server derives its own addresses
    let ipv4_gateway = compute_gateway_v4(ipv4_range)?;
    let ipv6_gateway = compute_gateway_v6(ipv6_range)?;

    let (ipv4_offset, ipv6_offset) = host_offsets(id);
    log::trace!(
        "Client {} packs to host bits {:#x} (IPv4) and {:#x} (IPv6)",
        id,
        ipv4_offset,
        ipv6_offset
    );

    let ipv4 = place_ipv4(ipv4_range, ipv4_gateway, ipv4_offset).ok_or(Error::PoolExhausted {
        id,
        range: ipv4_range.into(),
    })?;
    let ipv6 = place_ipv6(ipv6_range, ipv6_gateway, ipv6_offset).ok_or(Error::PoolExhausted {
        id,
        range: ipv6_range.into(),
    })?;

    log::debug!("Allocated {} and {} to client {}", ipv4, ipv6, id);
    Ok(AddressPair { ipv4, ipv6 })
}

fn place_ipv4(range: Ipv4Net, gateway: Ipv4Addr, offset: u32) -> Option<Ipv4Addr> {
    let network = range.trunc();
    if offset & !u32::from(network.hostmask()) != 0 {
        log::debug!("Host bits {:#x} do not fit in {}", offset, network);
        return None;
    }

    let candidate = Ipv4Addr::from(u32::from(network.network()) | offset);
    if candidate == network.network() || candidate == gateway || candidate == network.broadcast() {
        log::debug!("{} is reserved in {}", candidate, network);
        return None;
    }
    Some(candidate)
}

fn place_ipv6(range: Ipv6Net, gateway: Ipv6Addr, offset: u128) -> Option<Ipv6Addr> {
    let network = range.trunc();
    if offset & !u128::from(network.hostmask()) != 0 {
        log::debug!("Host bits {:#x} do not fit in {}", offset, network);
        return None;
    }

    let candidate = Ipv6Addr::from(u128::from(network.network()) | offset);
    if candidate == network.network()
        || candidate == gateway
        || candidate == network.broadcast()
        || !is_unicast_v6(candidate)
    {
        log::debug!("{} is reserved in {}", candidate, network);
        return None;
    }
    Some(candidate)
}

/// Rejects unspecified, loopback and multicast addresses, including their IPv4-mapped forms
fn is_unicast_v6(addr: Ipv6Addr) -> bool {
    if addr.is_unspecified() || addr.is_loopback() || addr.is_multicast() {
        return false;
    }
    match addr.to_ipv4_mapped() {
        Some(mapped) => {
            !(mapped.is_unspecified()
                || mapped.is_loopback()
                || mapped.is_multicast()
                || mapped.is_broadcast())
        }
        None => true,
    }
}
