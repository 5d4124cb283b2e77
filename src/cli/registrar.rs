// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Registrar commands: register, renew, available, price

use anyhow::Result;
use ethers::signers::Signer;
use ethers::utils::to_checksum;
use rns_cli::registrar::Registrar as _;
use rns_cli::utils::{format_rif, fqdn, normalize_label};
use rns_cli::{chain, Config, Network, Orchestrator, RskRegistrar};

pub async fn register(domains: Vec<String>, network: Network, years: u32) -> Result<()> {
    let config = Config::from_env(network)?;
    let client = chain::connect_signer(&config)?;
    let owner = client.signer().address();

    let registrar = RskRegistrar::new(client, network)?;
    let orchestrator = Orchestrator::new(&registrar, &registrar, &registrar);

    let total = domains.len();
    let mut failures = 0;

    for domain in &domains {
        let label = normalize_label(domain);
        println!("Registering {} for {} year(s)...", fqdn(&label), years);
        println!("(two transactions; the commitment must mature for at least a minute)");

        // One label failing does not abort the rest of the batch.
        match orchestrator.register_domain(&label, owner, years).await {
            Ok(registration) => {
                println!("\n✓ Domain {} registered successfully!", fqdn(&label));
                println!("  Owner: {}", to_checksum(&registration.owner, None));
                println!("  Commitment transaction: {:#x}", registration.commit_tx);
                println!(
                    "  Registration transaction: {:#x}",
                    registration.register_tx
                );
                println!("  Price paid: {} RIF", format_rif(registration.price));
                println!("  Expires: {}", registration.expires_at.to_rfc3339());
            }
            Err(err) => {
                eprintln!("✗ {}: {err}", fqdn(&label));
                failures += 1;
            }
        }
        println!();
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {total} registration(s) failed");
    }
    Ok(())
}

pub async fn renew(domain: String, network: Network, years: u32) -> Result<()> {
    let config = Config::from_env(network)?;
    let client = chain::connect_signer(&config)?;
    let payer = client.signer().address();

    let registrar = RskRegistrar::new(client, network)?;
    let orchestrator = Orchestrator::new(&registrar, &registrar, &registrar);

    let label = normalize_label(&domain);
    println!("Renewing {} for {} year(s)...", fqdn(&label), years);

    let renewal = orchestrator.renew(&label, payer, years).await?;

    println!("\n✓ Renewal successful!");
    println!("  Domain: {}", fqdn(&label));
    println!("  Transaction: {:#x}", renewal.tx_hash);
    println!("  Price paid: {} RIF", format_rif(renewal.price));
    println!("  Renewed for: {} year(s)", renewal.duration_years);
    Ok(())
}

pub async fn available(domain: String, network: Network) -> Result<()> {
    let config = Config::from_env(network)?;
    let provider = chain::connect(&config)?;
    let registrar = RskRegistrar::new(provider, network)?;

    let label = normalize_label(&domain);
    println!("Checking if {} is available on {network}...", fqdn(&label));

    if registrar.available(&label).await? {
        println!("✓ {} is available for registration", fqdn(&label));
    } else {
        println!("✗ {} is not available for registration", fqdn(&label));
    }
    Ok(())
}

pub async fn price(domain: String, network: Network, years: u32) -> Result<()> {
    let config = Config::from_env(network)?;
    let provider = chain::connect(&config)?;
    let registrar = RskRegistrar::new(provider, network)?;

    let label = normalize_label(&domain);
    println!("Calculating price for {} ({} year(s))...", fqdn(&label), years);

    let quote = registrar.price(&label, years).await?;

    println!("Registration price: {} RIF", format_rif(quote));
    println!("  Domain: {}", fqdn(&label));
    println!("  Duration: {years} year(s)");
    println!("  Network: {network}");
    Ok(())
}
