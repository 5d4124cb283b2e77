// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Error taxonomy for RNS operations
//!
//! Every command catches these at the top level, prints one human-readable
//! line and exits non-zero. The only automatic retry anywhere is the bounded
//! commitment-maturity poll in the registration orchestrator.

use ethers::types::{Address, H256, U256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RnsError {
    /// A required environment variable is not set. Raised before any
    /// network call is made.
    #[error("{0} is not set. Add it to your environment.")]
    MissingCredential(&'static str),

    #[error("PRIVATE_KEY is not a valid secp256k1 private key")]
    InvalidPrivateKey,

    #[error("domain {0} is not available for registration")]
    DomainUnavailable(String),

    /// Advisory pre-check failure: RIF balance below the quoted price.
    /// The balance is read once and may be stale by submission time; an
    /// on-chain failure after this check passes surfaces as
    /// [`RnsError::TransactionReverted`] instead.
    #[error("insufficient RIF balance: need {needed} RIF, have {have} RIF")]
    InsufficientFunds { needed: String, have: String },

    /// The bounded commitment-maturity poll exhausted its attempts. The
    /// commitment may still mature later; it is never auto-retried.
    #[error("commitment not ready to reveal after {attempts} attempts")]
    CommitmentTimeout { attempts: u32 },

    /// A submitted transaction was not confirmed within the configured bound.
    #[error("timed out waiting for confirmation of the {operation} transaction")]
    ConfirmationTimeout { operation: &'static str },

    /// The chain rejected a submitted transaction.
    #[error("transaction {tx_hash:#x} reverted on chain")]
    TransactionReverted { tx_hash: H256 },

    /// A transaction was broadcast but dropped before inclusion.
    #[error("transaction {tx_hash:#x} was dropped from the mempool")]
    TransactionDropped { tx_hash: H256 },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("you are not the owner of {domain}. Current owner: {owner:#x}")]
    NotOwner { domain: String, owner: Address },

    #[error("no resolver is set for {0}")]
    NoResolver(String),

    /// The commitment transaction confirmed but the registration did not
    /// complete: gas was spent on a commitment that is now stranded.
    #[error("commitment {commit_tx:#x} is stranded (gas spent, domain not registered): {source}")]
    StrandedCommitment {
        commit_tx: H256,
        #[source]
        source: Box<RnsError>,
    },

    /// Provider or contract transport failure.
    #[error("chain call failed: {0}")]
    Chain(String),
}

impl RnsError {
    /// Wrap a provider/contract error as a chain transport failure.
    pub fn chain<E: std::fmt::Display>(err: E) -> Self {
        RnsError::Chain(err.to_string())
    }

    /// Mark a post-commitment failure as a stranded commitment.
    pub fn stranded(commit_tx: H256, source: RnsError) -> Self {
        RnsError::StrandedCommitment {
            commit_tx,
            source: Box::new(source),
        }
    }

    pub fn insufficient_funds(needed: U256, have: U256) -> Self {
        RnsError::InsufficientFunds {
            needed: crate::utils::format_rif(needed),
            have: crate::utils::format_rif(have),
        }
    }
}

pub type Result<T> = std::result::Result<T, RnsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stranded_commitment_keeps_source() {
        let tx = H256::repeat_byte(0xab);
        let err = RnsError::stranded(tx, RnsError::CommitmentTimeout { attempts: 12 });
        let msg = err.to_string();
        assert!(msg.contains("stranded"));
        match err {
            RnsError::StrandedCommitment { commit_tx, source } => {
                assert_eq!(commit_tx, tx);
                assert!(matches!(
                    *source,
                    RnsError::CommitmentTimeout { attempts: 12 }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn insufficient_funds_formats_token_units() {
        let err = RnsError::insufficient_funds(
            U256::from(2u64) * U256::exp10(18),
            U256::exp10(18) / 2,
        );
        assert_eq!(
            err.to_string(),
            "insufficient RIF balance: need 2.000000000000000000 RIF, have 0.500000000000000000 RIF"
        );
    }
}
