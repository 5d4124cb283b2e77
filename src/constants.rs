// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

use std::time::Duration;

/// Domain suffix for RNS domains
pub const DOMAIN_SUFFIX: &str = ".rsk";

/// Decimals of the RIF payment token
pub const RIF_DECIMALS: u32 = 18;

/// Interval between commitment-maturity poll attempts
pub const COMMIT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Maximum number of commitment-maturity poll attempts (2-minute ceiling)
pub const COMMIT_POLL_MAX_ATTEMPTS: u32 = 12;

/// Upper bound on waiting for a single transaction to be included
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Rough gas budget for the two registration transactions, used only for
/// the advisory native-balance check before registering
pub const REGISTER_GAS_BUDGET: u64 = 600_000;

/// ERC-677 transfer data selector for the FIFS addr registrar
/// register(string,address,bytes32,uint,address)
pub const ADDR_REGISTER_SELECTOR: [u8; 4] = [0x5f, 0x7b, 0x99, 0xd5];

/// ERC-677 transfer data selector for the renewer renew(string,uint)
pub const RENEW_SELECTOR: [u8; 4] = [0x14, 0xb1, 0xa4, 0xfc];
