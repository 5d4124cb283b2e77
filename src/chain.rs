// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! JSON-RPC provider and signer construction
//!
//! Read-only commands work with a bare provider; write commands layer the
//! wallet from `PRIVATE_KEY` on top of it, pinned to the network's chain id.

use crate::config::Config;
use crate::error::{Result, RnsError};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, JsonRpcClient, PendingTransaction, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{H256, U64};
use std::sync::Arc;

pub type RskProvider = Provider<Http>;
pub type RskSigner = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Read-only JSON-RPC provider for the configured network.
pub fn connect(config: &Config) -> Result<Arc<RskProvider>> {
    let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
        .map_err(RnsError::chain)?;
    Ok(Arc::new(provider))
}

/// Provider with the signing wallet attached, for write operations.
pub fn connect_signer(config: &Config) -> Result<Arc<RskSigner>> {
    // Credential check comes first, before anything touches the network.
    let wallet = config
        .private_key()?
        .trim()
        .trim_start_matches("0x")
        .parse::<LocalWallet>()
        .map_err(|_| RnsError::InvalidPrivateKey)?
        .with_chain_id(config.network.chain_id());

    tracing::debug!(address = %wallet.address(), "loaded signing wallet");

    let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
        .map_err(RnsError::chain)?;

    Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}

/// Wait for one confirmation and surface reverted or dropped transactions
/// as distinct errors. A transaction is not "done" until the chain reports
/// inclusion.
pub(crate) async fn confirm<P: JsonRpcClient>(
    pending: PendingTransaction<'_, P>,
) -> Result<H256> {
    let tx_hash = *pending;
    tracing::debug!(?tx_hash, "waiting for confirmation");

    let receipt = pending
        .await
        .map_err(RnsError::chain)?
        .ok_or(RnsError::TransactionDropped { tx_hash })?;

    if receipt.status == Some(U64::from(1)) {
        Ok(tx_hash)
    } else {
        Err(RnsError::TransactionReverted { tx_hash })
    }
}
