use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

use ipnet::{Ipv4Net, Ipv6Net};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(clap::Parser)]
#[clap(author, version, about="Address planner for WireGuard tunnel networks", long_about = None)]
pub struct Args {
    #[command(flatten)]
    config_data: Config,

    /// Path to a config file to read
    #[clap(short = 'c', long = "config", conflicts_with = "Config")]
    config_file: Option<PathBuf>,

    /// Client identifiers to allocate addresses for
    pub ids: Vec<u32>,

    /// Enable verbose logging
    #[clap(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn data(&self) -> Result<Config, ConfigError> {
        match self.config_file {
            Some(ref path) => {
                // Read the data from the config file
                let file = std::fs::File::open(path).map_err(|error| match error.kind() {
                    std::io::ErrorKind::NotFound => ConfigError::NotFound(path.clone()),
                    _ => error.into(),
                })?;
                let data: Config = serde_json::from_reader(file)?;
                log::debug!("Loaded configuration from {}", path.display());
                Ok(data)
            }
            None => Ok(self.config_data.clone()),
        }
    }
}

/// Program configuration. Specifiable via either CLI args or a config file
#[derive(Debug, clap::Args, serde::Deserialize, Clone, PartialEq, Eq)]
#[group()]
pub struct Config {
    /// IPv4 range of the tunnel network
    #[clap(long, default_value = "10.99.97.0/24")]
    pub network_ipv4: Ipv4Net,

    /// IPv6 range of the tunnel network
    #[clap(long, default_value = "fd00::10:97:0/112")]
    pub network_ipv6: Ipv6Net,

    /// Nameserver clients should resolve through
    #[clap(long, default_value = "1.1.1.1")]
    #[serde(default = "default_nameserver")]
    pub nameserver: IpAddr,

    /// Masquerade client IPv6 traffic
    #[clap(long)]
    #[serde(default)]
    pub ipv6_nat: bool,

    /// Serve DNS to clients from the gateway addresses
    #[clap(long)]
    #[serde(default)]
    pub dnsmasq: bool,
}

fn default_nameserver() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1))
}
