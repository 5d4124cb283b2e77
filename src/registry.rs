// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Registry reads and ownership transfer
//!
//! The registry maps a namehashed node to its owner and resolver. Transfer
//! is an ERC-721 `transferFrom` on the node owner contract, guarded by an
//! ownership check against the registry.

use crate::chain::confirm;
use crate::config::{contract_address, ContractRole, Network};
use crate::contracts::{RnsRegistry, RskOwner};
use crate::error::{Result, RnsError};
use crate::utils::{fqdn, namehash, normalize_label, parse_address, token_id};
use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::{Address, H256};
use std::sync::Arc;

/// Registry and node-owner operations, abstracted for testing.
#[async_trait]
pub trait NameRegistry: Send + Sync {
    /// Current owner of a fully-qualified name.
    async fn owner(&self, domain: &str) -> Result<Address>;

    /// Resolver contract configured for a fully-qualified name.
    async fn resolver(&self, domain: &str) -> Result<Address>;

    /// Transfer the label's ERC-721 node token and wait for confirmation.
    async fn transfer(&self, label: &str, from: Address, to: Address) -> Result<H256>;
}

pub struct RskNameRegistry<M> {
    registry: RnsRegistry<M>,
    rsk_owner: RskOwner<M>,
}

impl<M: Middleware + 'static> RskNameRegistry<M> {
    pub fn new(client: Arc<M>, network: Network) -> Result<Self> {
        Ok(RskNameRegistry {
            registry: RnsRegistry::new(
                contract_address(ContractRole::Registry, network)?,
                client.clone(),
            ),
            rsk_owner: RskOwner::new(contract_address(ContractRole::RskOwner, network)?, client),
        })
    }
}

#[async_trait]
impl<M: Middleware + 'static> NameRegistry for RskNameRegistry<M> {
    async fn owner(&self, domain: &str) -> Result<Address> {
        self.registry
            .owner(namehash(domain))
            .call()
            .await
            .map_err(RnsError::chain)
    }

    async fn resolver(&self, domain: &str) -> Result<Address> {
        self.registry
            .resolver(namehash(domain))
            .call()
            .await
            .map_err(RnsError::chain)
    }

    async fn transfer(&self, label: &str, from: Address, to: Address) -> Result<H256> {
        let call = self.rsk_owner.transfer_from(from, to, token_id(label));
        let pending = call.send().await.map_err(RnsError::chain)?;
        confirm(pending).await
    }
}

/// Transfer `domain` from `signer` to `new_owner`.
///
/// Verifies the caller actually owns the name and that the recipient parses
/// as an address before submitting anything.
pub async fn transfer_domain(
    registry: &dyn NameRegistry,
    signer: Address,
    domain: &str,
    new_owner: &str,
) -> Result<H256> {
    let label = normalize_label(domain);
    let name = fqdn(&label);

    let current = registry.owner(&name).await?;
    if current != signer {
        return Err(RnsError::NotOwner {
            domain: name,
            owner: current,
        });
    }

    let to = parse_address(new_owner)?;
    tracing::info!(domain = %name, %to, "transferring ownership");

    registry.transfer(&label, signer, to).await
}
