//! Error types for this library

use ipnet::IpNet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Given CIDR ({0}) does not represent a network")]
    InvalidRange(IpNet),
    #[error("Client {id} exceeds the limit of the {range} address pool")]
    PoolExhausted { id: u32, range: IpNet },
}
