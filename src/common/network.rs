//! The network layout of a tunnel server, derived once from its configured ranges

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::{Ipv4Net, Ipv6Net};
use tunnel_alloc::{allocate, compute_gateway_v4, compute_gateway_v6, AddressPair};

/// Immutable view of the tunnel network. Both gateways are computed up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    network_ipv4: Ipv4Net,
    network_ipv6: Ipv6Net,
    gateway_ipv4: Ipv4Addr,
    gateway_ipv6: Ipv6Addr,
}

/// Addresses issued to one client
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Client {
    pub id: u32,
    pub ipv4: Ipv4Addr,
    pub ipv6: Ipv6Addr,
}

/// A client that could not be given addresses
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Refusal {
    pub id: u32,
    pub reason: String,
}

/// Values handed to whatever renders the firewall, interface and resolver setup
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RenderValues {
    pub nameserver: IpAddr,
    pub network_ipv4: Ipv4Net,
    pub network_ipv6: Ipv6Net,
    pub gateway_ipv4: Ipv4Addr,
    pub gateway_ipv6: Ipv6Addr,
    pub gateway_ipv4_with_cidr: String,
    pub gateway_ipv6_with_cidr: String,
    pub ipv6_nat_enabled: bool,
    pub dnsmasq_enabled: bool,
}

/// Everything the `wgaddr` binary reports
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Plan {
    pub network: RenderValues,
    pub clients: Vec<Client>,
    pub refused: Vec<Refusal>,
}

impl NetworkConfig {
    /// Derive the network layout from a pair of ranges.
    ///
    /// Fails if either range has no host bits.
    pub fn new(network_ipv4: Ipv4Net, network_ipv6: Ipv6Net) -> Result<Self, tunnel_alloc::Error> {
        let network_ipv4 = network_ipv4.trunc();
        let network_ipv6 = network_ipv6.trunc();
        Ok(Self {
            network_ipv4,
            network_ipv6,
            gateway_ipv4: compute_gateway_v4(network_ipv4)?,
            gateway_ipv6: compute_gateway_v6(network_ipv6)?,
        })
    }

    #[must_use]
    pub fn network_ipv4(&self) -> Ipv4Net {
        self.network_ipv4
    }

    #[must_use]
    pub fn network_ipv6(&self) -> Ipv6Net {
        self.network_ipv6
    }

    #[must_use]
    pub fn gateway_ipv4(&self) -> Ipv4Addr {
        self.gateway_ipv4
    }

    #[must_use]
    pub fn gateway_ipv6(&self) -> Ipv6Addr {
        self.gateway_ipv6
    }

    /// Derive the addresses of a single client
    pub fn allocate(&self, id: u32) -> Result<AddressPair, tunnel_alloc::Error> {
        allocate(self.network_ipv4, self.network_ipv6, id)
    }

    /// Allocate a batch of clients. Clients that do not fit are refused without affecting the rest.
    #[must_use]
    pub fn allocate_all(&self, ids: &[u32]) -> (Vec<Client>, Vec<Refusal>) {
        let mut clients = Vec::with_capacity(ids.len());
        let mut refused = Vec::new();

        for &id in ids {
            match self.allocate(id) {
                Ok(AddressPair { ipv4, ipv6 }) => clients.push(Client { id, ipv4, ipv6 }),
                Err(error) => {
                    log::warn!("Refusing client {}: {}", id, error);
                    refused.push(Refusal {
                        id,
                        reason: error.to_string(),
                    });
                }
            }
        }

        (clients, refused)
    }

    #[must_use]
    pub fn render_values(
        &self,
        nameserver: IpAddr,
        ipv6_nat_enabled: bool,
        dnsmasq_enabled: bool,
    ) -> RenderValues {
        RenderValues {
            nameserver,
            network_ipv4: self.network_ipv4,
            network_ipv6: self.network_ipv6,
            gateway_ipv4: self.gateway_ipv4,
            gateway_ipv6: self.gateway_ipv6,
            gateway_ipv4_with_cidr: format!(
                "{}/{}",
                self.gateway_ipv4,
                self.network_ipv4.prefix_len()
            ),
            gateway_ipv6_with_cidr: format!(
                "{}/{}",
                self.gateway_ipv6,
                self.network_ipv6.prefix_len()
            ),
            ipv6_nat_enabled,
            dnsmasq_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_network() -> NetworkConfig {
        NetworkConfig::new(
            "10.99.97.0/24".parse().unwrap(),
            "fd00::10:97:0/112".parse().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_gateways() {
        let network = default_network();
        assert_eq!(network.gateway_ipv4(), "10.99.97.1".parse::<Ipv4Addr>().unwrap());
        assert_eq!(network.gateway_ipv6(), "fd00::10:97:1".parse::<Ipv6Addr>().unwrap());
    }

    #[test]
    fn test_ranges_are_truncated() {
        let network = NetworkConfig::new(
            "10.99.97.42/24".parse().unwrap(),
            "fd00::10:97:42/112".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(network, default_network());
    }

    #[test]
    fn test_invalid_range() {
        let v4: Ipv4Net = "10.99.97.1/32".parse().unwrap();
        assert_eq!(
            NetworkConfig::new(v4, "fd00::10:97:0/112".parse().unwrap()),
            Err(tunnel_alloc::Error::InvalidRange(v4.into()))
        );
    }

    #[test]
    fn test_allocate_all_refuses_overflowing_clients() {
        let (clients, refused) = default_network().allocate_all(&[2, 100, 256, 3]);
        assert_eq!(
            clients,
            vec![
                Client {
                    id: 2,
                    ipv4: "10.99.97.2".parse().unwrap(),
                    ipv6: "fd00::10:97:2".parse().unwrap(),
                },
                Client {
                    id: 100,
                    ipv4: "10.99.97.100".parse().unwrap(),
                    ipv6: "fd00::10:97:100".parse().unwrap(),
                },
                Client {
                    id: 3,
                    ipv4: "10.99.97.3".parse().unwrap(),
                    ipv6: "fd00::10:97:3".parse().unwrap(),
                },
            ]
        );
        assert_eq!(refused.len(), 1);
        assert_eq!(refused[0].id, 256);
    }

    #[test]
    fn test_render_values() {
        let values = default_network().render_values("1.1.1.1".parse().unwrap(), true, false);
        assert_eq!(values.gateway_ipv4_with_cidr, "10.99.97.1/24");
        assert_eq!(values.gateway_ipv6_with_cidr, "fd00::10:97:1/112");
        assert!(values.ipv6_nat_enabled);
        assert!(!values.dnsmasq_enabled);

        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json["network_ipv4"], "10.99.97.0/24");
        assert_eq!(json["gateway_ipv6"], "fd00::10:97:1");
        assert_eq!(json["nameserver"], "1.1.1.1");
    }
}
