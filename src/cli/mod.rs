// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Command implementations

pub mod registrar;
pub mod registry;
pub mod resolver;
