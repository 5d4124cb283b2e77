// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Commit-reveal registration against the RNS registrar
//!
//! The orchestrator in [`orchestrate`] drives the protocol through three
//! collaborator traits so it can be exercised against fakes: the registrar
//! contract binding, the RIF payment token, and a read-only chain view.

pub mod orchestrate;
pub mod poll;
pub mod rsk;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ethers::types::{Address, H256, U256};

/// A blinded registration intent that has been committed on chain.
///
/// Created once per registration attempt and consumed by the reveal; the
/// secret is never reused.
#[derive(Debug, Clone)]
pub struct Commitment {
    /// Hash of the confirmed commitment transaction
    pub tx_hash: H256,
    /// Commitment hash binding (label hash, owner, secret)
    pub hash: [u8; 32],
    /// Random 32-byte preimage component
    pub secret: [u8; 32],
}

/// Outcome of a completed registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub label: String,
    pub owner: Address,
    pub commit_tx: H256,
    pub register_tx: H256,
    /// Price paid, in the token's smallest unit
    pub price: U256,
    /// Estimated expiry (`now + years * 365 days`), not chain-derived
    pub expires_at: DateTime<Utc>,
}

/// Outcome of a completed renewal.
#[derive(Debug, Clone)]
pub struct Renewal {
    pub label: String,
    pub tx_hash: H256,
    pub price: U256,
    pub duration_years: u32,
}

/// Typed registrar contract binding.
///
/// Transaction-submitting methods return only after one confirmation, so a
/// returned hash means the side effects are observable by subsequent calls.
#[async_trait]
pub trait Registrar: Send + Sync {
    async fn available(&self, label: &str) -> Result<bool>;

    /// Quote for registering or renewing `label` for `duration_years`.
    /// On-chain price curves can change, so quotes are never cached.
    async fn price(&self, label: &str, duration_years: u32) -> Result<U256>;

    /// Submit a commitment binding (label hash, owner, secret) and wait for
    /// inclusion.
    async fn commit_to_register(
        &self,
        label: &str,
        owner: Address,
        secret: [u8; 32],
    ) -> Result<Commitment>;

    /// Whether the contract considers the commitment old enough to reveal.
    async fn can_reveal(&self, commitment: &Commitment) -> Result<bool>;

    /// Reveal the commitment and pay for the registration.
    async fn register(
        &self,
        label: &str,
        owner: Address,
        commitment: &Commitment,
        duration_years: u32,
        price: U256,
    ) -> Result<H256>;

    /// Pay for a renewal of an already-registered label.
    async fn renew(&self, label: &str, duration_years: u32, price: U256) -> Result<H256>;
}

/// Balance view of the payment token.
#[async_trait]
pub trait PaymentToken: Send + Sync {
    async fn balance_of(&self, owner: Address) -> Result<U256>;
}

/// Read-only chain queries used for the advisory gas check.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn native_balance(&self, owner: Address) -> Result<U256>;
    async fn gas_price(&self) -> Result<U256>;
}
