// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Typed bindings for the RNS contract suite and the ERC-677 payloads
//!
//! Registration and renewal are paid by transferring RIF with an encoded
//! call in the transfer data (ERC-677 `transferAndCall`). The payload
//! layouts are fixed by the registrar contracts:
//!
//! register: selector ++ owner(20) ++ secret(32) ++ duration(32) ++ addr(20) ++ name
//! renew:    selector ++ duration(32) ++ name

use crate::constants::{ADDR_REGISTER_SELECTOR, RENEW_SELECTOR};
use ethers::prelude::abigen;
use ethers::types::{Address, U256};

abigen!(
    RskOwner,
    r#"[
        function available(uint256 tokenId) external view returns (bool)
        function transferFrom(address from, address to, uint256 tokenId) external
    ]"#
);

abigen!(
    FifsAddrRegistrar,
    r#"[
        function price(string name, uint256 expires, uint256 duration) external view returns (uint256)
        function makeCommitment(bytes32 label, address nameOwner, bytes32 secret) external pure returns (bytes32)
        function commit(bytes32 commitment) external
        function canReveal(bytes32 commitment) external view returns (bool)
    ]"#
);

abigen!(
    RifToken,
    r#"[
        function balanceOf(address owner) external view returns (uint256)
        function transferAndCall(address to, uint256 value, bytes data) external returns (bool)
    ]"#
);

abigen!(
    RnsRegistry,
    r#"[
        function owner(bytes32 node) external view returns (address)
        function resolver(bytes32 node) external view returns (address)
    ]"#
);

abigen!(
    AddrResolver,
    r#"[
        function addr(bytes32 node) external view returns (address)
        function setAddr(bytes32 node, address addr) external
    ]"#
);

/// transferAndCall data for registering `label` through the FIFS addr
/// registrar. `addr` is the address the new domain will resolve to.
pub fn addr_register_data(
    label: &str,
    owner: Address,
    secret: [u8; 32],
    duration_years: u32,
    addr: Address,
) -> Vec<u8> {
    let mut duration = [0u8; 32];
    U256::from(duration_years).to_big_endian(&mut duration);

    let mut data = Vec::with_capacity(4 + 20 + 32 + 32 + 20 + label.len());
    data.extend_from_slice(&ADDR_REGISTER_SELECTOR);
    data.extend_from_slice(owner.as_bytes());
    data.extend_from_slice(&secret);
    data.extend_from_slice(&duration);
    data.extend_from_slice(addr.as_bytes());
    data.extend_from_slice(label.as_bytes());
    data
}

/// transferAndCall data for renewing `label` through the renewer contract.
pub fn renew_data(label: &str, duration_years: u32) -> Vec<u8> {
    let mut duration = [0u8; 32];
    U256::from(duration_years).to_big_endian(&mut duration);

    let mut data = Vec::with_capacity(4 + 32 + label.len());
    data.extend_from_slice(&RENEW_SELECTOR);
    data.extend_from_slice(&duration);
    data.extend_from_slice(label.as_bytes());
    data
}
