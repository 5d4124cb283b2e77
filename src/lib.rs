// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! RNS CLI - Rootstock Name Service client
//!
//! A thin command-line client over the RNS contract suite on Rootstock:
//! availability checks, price quotes, commit-reveal registration, renewal,
//! ownership transfer, and resolver records. All state of record lives on
//! chain; nothing is persisted locally.

pub mod chain;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod registrar;
pub mod registry;
pub mod resolver;
pub mod utils;

pub use constants::*;

// Re-export commonly used types
pub use config::{Config, Network};
pub use error::{Result, RnsError};
pub use registrar::orchestrate::{Orchestrator, RegistrationConfig};
pub use registrar::rsk::RskRegistrar;
pub use registrar::{Registration, Renewal};
pub use registry::{transfer_domain, RskNameRegistry};
pub use resolver::{resolve_addr, set_addr};
