// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Registry commands: owner, resolver, transfer

use anyhow::Result;
use ethers::signers::Signer;
use ethers::utils::to_checksum;
use rns_cli::registry::NameRegistry as _;
use rns_cli::utils::{fqdn, normalize_label};
use rns_cli::{chain, transfer_domain, Config, Network, RskNameRegistry};

pub async fn owner(domain: String, network: Network) -> Result<()> {
    let config = Config::from_env(network)?;
    let provider = chain::connect(&config)?;
    let registry = RskNameRegistry::new(provider, network)?;

    let name = fqdn(&normalize_label(&domain));
    println!("Retrieving owner of {name}...");

    let owner = registry.owner(&name).await?;
    println!("Owner of {name}: {}", to_checksum(&owner, None));
    Ok(())
}

pub async fn resolver(domain: String, network: Network) -> Result<()> {
    let config = Config::from_env(network)?;
    let provider = chain::connect(&config)?;
    let registry = RskNameRegistry::new(provider, network)?;

    let name = fqdn(&normalize_label(&domain));
    println!("Retrieving resolver for {name}...");

    let resolver = registry.resolver(&name).await?;
    println!("Resolver for {name}: {}", to_checksum(&resolver, None));
    Ok(())
}

pub async fn transfer(domain: String, new_owner: String, network: Network) -> Result<()> {
    let config = Config::from_env(network)?;
    let client = chain::connect_signer(&config)?;
    let signer = client.signer().address();

    let registry = RskNameRegistry::new(client, network)?;

    let name = fqdn(&normalize_label(&domain));
    println!("Checking ownership of {name}...");

    let tx = transfer_domain(&registry, signer, &domain, &new_owner).await?;

    println!("✓ Transfer successful!");
    println!("  Domain: {name}");
    println!("  Transferred from: {}", to_checksum(&signer, None));
    println!("  New owner: {new_owner}");
    println!("  Transaction: {tx:#x}");
    Ok(())
}
