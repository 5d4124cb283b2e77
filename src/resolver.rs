// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Resolver record reads and writes
//!
//! A name's resolver is looked up through the registry; records are then
//! read from or written to whatever resolver contract is configured.

use crate::chain::confirm;
use crate::config::{contract_address, ContractRole, Network};
use crate::contracts::{AddrResolver, RnsRegistry};
use crate::error::{Result, RnsError};
use crate::utils::{fqdn, namehash, normalize_label, parse_address};
use ethers::providers::Middleware;
use ethers::types::{Address, H256};
use std::sync::Arc;

async fn resolver_for<M: Middleware + 'static>(
    client: Arc<M>,
    network: Network,
    name: &str,
) -> Result<AddrResolver<M>> {
    let registry = RnsRegistry::new(contract_address(ContractRole::Registry, network)?, client.clone());

    let resolver = registry
        .resolver(namehash(name))
        .call()
        .await
        .map_err(RnsError::chain)?;

    if resolver.is_zero() {
        return Err(RnsError::NoResolver(name.to_string()));
    }

    Ok(AddrResolver::new(resolver, client))
}

/// Resolve a domain to the address stored in its resolver.
pub async fn resolve_addr<M: Middleware + 'static>(
    client: Arc<M>,
    network: Network,
    domain: &str,
) -> Result<Address> {
    let name = fqdn(&normalize_label(domain));
    let resolver = resolver_for(client, network, &name).await?;

    resolver
        .addr(namehash(&name))
        .call()
        .await
        .map_err(RnsError::chain)
}

/// Point a domain at `address` through its resolver and wait for
/// confirmation.
pub async fn set_addr<M: Middleware + 'static>(
    client: Arc<M>,
    network: Network,
    domain: &str,
    address: &str,
) -> Result<H256> {
    let target = parse_address(address)?;
    let name = fqdn(&normalize_label(domain));
    let resolver = resolver_for(client, network, &name).await?;

    tracing::info!(domain = %name, %target, "setting resolver record");

    let call = resolver.set_addr(namehash(&name), target);
    let pending = call.send().await.map_err(RnsError::chain)?;
    confirm(pending).await
}
