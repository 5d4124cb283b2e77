// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! RNS CLI application

use clap::{Parser, Subcommand};
use rns_cli::Network;

mod cli;

#[derive(Parser)]
#[command(name = "rns")]
#[command(about = "Rootstock Name Service CLI - register and manage .rsk domains", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register one or more domains (commit-reveal, two transactions each)
    Register {
        /// Domain name(s) to register, e.g. alice.rsk (repeatable)
        #[arg(short = 'd', long = "domain", required = true)]
        domains: Vec<String>,
        /// RSK network (mainnet or testnet)
        #[arg(short, long, default_value = "mainnet")]
        network: Network,
        /// Registration duration in years
        #[arg(short, long, default_value_t = 1)]
        years: u32,
    },
    /// Transfer ownership of a domain
    Transfer {
        /// Domain name to transfer
        #[arg(short = 'd', long = "domain")]
        domain: String,
        /// New owner address
        #[arg(short, long)]
        owner: String,
        /// RSK network (mainnet or testnet)
        #[arg(short, long, default_value = "mainnet")]
        network: Network,
    },
    /// Renew a domain
    Renew {
        /// Domain name to renew
        #[arg(short = 'd', long = "domain")]
        domain: String,
        /// RSK network (mainnet or testnet)
        #[arg(short, long, default_value = "mainnet")]
        network: Network,
        /// Renewal duration in years
        #[arg(short, long, default_value_t = 1)]
        years: u32,
    },
    /// Check if a domain is available
    Available {
        /// Domain name to check
        #[arg(short = 'd', long = "domain")]
        domain: String,
        /// RSK network (mainnet or testnet)
        #[arg(short, long, default_value = "mainnet")]
        network: Network,
    },
    /// Get the registration price for a domain
    Price {
        /// Domain name to quote
        #[arg(short = 'd', long = "domain")]
        domain: String,
        /// RSK network (mainnet or testnet)
        #[arg(short, long, default_value = "mainnet")]
        network: Network,
        /// Duration in years
        #[arg(short, long, default_value_t = 1)]
        years: u32,
    },
    /// Get the owner of a domain
    Owner {
        /// Domain name
        #[arg(short = 'd', long = "domain")]
        domain: String,
        /// RSK network (mainnet or testnet)
        #[arg(short, long, default_value = "mainnet")]
        network: Network,
    },
    /// Get the resolver contract for a domain
    Resolver {
        /// Domain name
        #[arg(short = 'd', long = "domain")]
        domain: String,
        /// RSK network (mainnet or testnet)
        #[arg(short, long, default_value = "mainnet")]
        network: Network,
    },
    /// Resolve a domain to its address
    Resolve {
        /// Domain name to resolve
        #[arg(short = 'd', long = "domain")]
        domain: String,
        /// RSK network (mainnet or testnet)
        #[arg(short, long, default_value = "mainnet")]
        network: Network,
    },
    /// Set the address a domain resolves to
    SetAddr {
        /// Domain name
        #[arg(short = 'd', long = "domain")]
        domain: String,
        /// Address to resolve to
        #[arg(short, long)]
        address: String,
        /// RSK network (mainnet or testnet)
        #[arg(short, long, default_value = "mainnet")]
        network: Network,
    },
}

fn init_logging(verbose: bool) {
    // Without -v: only warnings and errors from this crate.
    // With -v: info from this crate, warnings from ethers.
    // With RUST_LOG set: whatever the caller asked for.
    use tracing_subscriber::EnvFilter;

    if std::env::var("RUST_LOG").is_err() {
        let filter = if verbose {
            EnvFilter::new("rns=info,rns_cli=info,ethers_providers=warn")
        } else {
            EnvFilter::new("rns=warn,rns_cli=warn")
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(true)
            .init();
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Register {
            domains,
            network,
            years,
        } => cli::registrar::register(domains, network, years).await,
        Commands::Transfer {
            domain,
            owner,
            network,
        } => cli::registry::transfer(domain, owner, network).await,
        Commands::Renew {
            domain,
            network,
            years,
        } => cli::registrar::renew(domain, network, years).await,
        Commands::Available { domain, network } => {
            cli::registrar::available(domain, network).await
        }
        Commands::Price {
            domain,
            network,
            years,
        } => cli::registrar::price(domain, network, years).await,
        Commands::Owner { domain, network } => cli::registry::owner(domain, network).await,
        Commands::Resolver { domain, network } => cli::registry::resolver(domain, network).await,
        Commands::Resolve { domain, network } => cli::resolver::resolve(domain, network).await,
        Commands::SetAddr {
            domain,
            address,
            network,
        } => cli::resolver::set_address(domain, address, network).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Every failure is caught here: one readable line, non-zero exit,
    // never an uncontrolled crash.
    if let Err(err) = run(cli.command).await {
        eprintln!("✗ {err:#}");
        std::process::exit(1);
    }
}
