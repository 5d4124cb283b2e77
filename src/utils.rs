// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Name hashing and formatting helpers

use crate::constants::{DOMAIN_SUFFIX, RIF_DECIMALS};
use crate::error::{Result, RnsError};
use ethers::types::{Address, U256};
use ethers::utils::keccak256;

/// Normalize CLI input to a bare label: trimmed, lowercased, `.rsk` stripped.
pub fn normalize_label(domain: &str) -> String {
    let domain = domain.trim().to_lowercase();
    domain
        .strip_suffix(DOMAIN_SUFFIX)
        .unwrap_or(&domain)
        .to_string()
}

/// Fully-qualified domain name for a label, e.g. `alice` -> `alice.rsk`.
pub fn fqdn(label: &str) -> String {
    format!("{label}{DOMAIN_SUFFIX}")
}

/// keccak256 of the bare label, as used for commitments.
pub fn label_hash(label: &str) -> [u8; 32] {
    keccak256(label.as_bytes())
}

/// ERC-721 token id of a label on the node owner contract.
pub fn token_id(label: &str) -> U256 {
    U256::from_big_endian(&label_hash(label))
}

/// EIP-137 namehash of a fully-qualified name.
///
/// `namehash("") == 0x00..00`; each label folds in from the right:
/// `namehash(l.rest) == keccak256(namehash(rest) ++ keccak256(l))`.
pub fn namehash(name: &str) -> [u8; 32] {
    let mut node = [0u8; 32];
    if name.is_empty() {
        return node;
    }
    for label in name.split('.').rev() {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(&node);
        buf[32..].copy_from_slice(&keccak256(label.as_bytes()));
        node = keccak256(buf);
    }
    node
}

/// Parse a user-supplied hex address, rejecting malformed input before any
/// transaction is built.
pub fn parse_address(s: &str) -> Result<Address> {
    s.trim()
        .parse::<Address>()
        .map_err(|_| RnsError::InvalidAddress(s.trim().to_string()))
}

/// Render a RIF token amount (18 decimals) for display.
pub fn format_rif(amount: U256) -> String {
    ethers::utils::format_units(amount, RIF_DECIMALS)
        .unwrap_or_else(|_| amount.to_string())
}
