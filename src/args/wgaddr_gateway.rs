use ipnet::IpNet;

#[derive(clap::Parser)]
#[clap(author, version, about="Print the default gateway of a network range", long_about = None)]
pub struct Args {
    /// Network range in CIDR notation
    pub cidr: IpNet,

    /// Enable verbose logging
    #[clap(short, long)]
    pub verbose: bool,
}
