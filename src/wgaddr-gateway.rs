//! Entrypoint for the `wgaddr-gateway` binary.
//!
//! Prints the default gateway (first usable host) of a single network range.

use args::wgaddr_gateway::Args;
use clap::Parser;
use common::logging::enable_logger;

mod args {
    pub mod wgaddr_gateway;
}
mod common {
    pub mod logging;
}

pub fn main() {
    // Parse CLI args
    let args = Args::parse();

    // Initialize logging
    if let Err(error) = enable_logger(args.verbose) {
        eprintln!("Failed to initialize logging: {error}");
        std::process::exit(1);
    }

    match tunnel_alloc::compute_gateway(args.cidr) {
        Ok(gateway) => {
            log::debug!("Gateway of {} is {}", args.cidr, gateway);
            println!("{gateway}");
        }
        Err(error) => {
            log::error!("{}", error);
            std::process::exit(1);
        }
    }
}
