//! Entrypoint for the `wgaddr` binary.
//!
//! Derives the gateway addresses of a tunnel network and the addresses of each
//! requested client, then prints them as a JSON document for the layer that
//! renders firewall rules, interface commands and resolver configuration.

use args::wgaddr::Args;
use clap::Parser;
use common::{
    logging::enable_logger,
    network::{NetworkConfig, Plan},
};

mod args {
    pub mod wgaddr;
}
mod common;

pub fn main() {
    // Parse CLI args
    let args = Args::parse();

    // Initialize logging
    if let Err(error) = enable_logger(args.verbose) {
        eprintln!("Failed to initialize logging: {error}");
        std::process::exit(1);
    }

    // Load the network layout
    let config = match args.data() {
        Ok(config) => config,
        Err(error) => {
            log::error!("{}", error);
            std::process::exit(1);
        }
    };
    let network = match NetworkConfig::new(config.network_ipv4, config.network_ipv6) {
        Ok(network) => network,
        Err(error) => {
            log::error!("{}", error);
            std::process::exit(1);
        }
    };
    log::info!(
        "Gateways for {} and {} are {} and {}",
        network.network_ipv4(),
        network.network_ipv6(),
        network.gateway_ipv4(),
        network.gateway_ipv6()
    );

    // Allocate every requested client
    let (clients, refused) = network.allocate_all(&args.ids);
    if !refused.is_empty() {
        log::warn!("Refused {} of {} clients", refused.len(), args.ids.len());
    }

    let plan = Plan {
        network: network.render_values(config.nameserver, config.ipv6_nat, config.dnsmasq),
        clients,
        refused,
    };
    match serde_json::to_string_pretty(&plan) {
        Ok(document) => println!("{document}"),
        Err(error) => {
            log::error!("Failed to serialize output: {}", error);
            std::process::exit(1);
        }
    }
}
