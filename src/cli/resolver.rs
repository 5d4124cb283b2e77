// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Resolver commands: resolve, set-addr

use anyhow::Result;
use ethers::utils::to_checksum;
use rns_cli::utils::{fqdn, normalize_label};
use rns_cli::{chain, resolve_addr, set_addr, Config, Network};

pub async fn resolve(domain: String, network: Network) -> Result<()> {
    let config = Config::from_env(network)?;
    let provider = chain::connect(&config)?;

    let name = fqdn(&normalize_label(&domain));
    println!("Resolving {name}...");

    let addr = resolve_addr(provider, network, &domain).await?;
    println!("Resolved address for {name}: {}", to_checksum(&addr, None));
    Ok(())
}

pub async fn set_address(domain: String, address: String, network: Network) -> Result<()> {
    let config = Config::from_env(network)?;
    let client = chain::connect_signer(&config)?;

    let name = fqdn(&normalize_label(&domain));
    println!("Setting resolved address for {name} to {address}...");

    let tx = set_addr(client, network, &domain, &address).await?;

    println!("✓ Address set successfully!");
    println!("  Domain: {name}");
    println!("  Resolves to: {address}");
    println!("  Transaction: {tx:#x}");
    Ok(())
}
