// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! ethers-backed registrar collaborators
//!
//! One struct wires the three contracts the registration flow touches: the
//! ERC-721 node owner for availability, the FIFS addr registrar for prices
//! and commitments, and the RIF ERC-677 token that pays for the reveal and
//! renewals through `transferAndCall`.

use crate::chain::confirm;
use crate::config::{contract_address, ContractRole, Network};
use crate::contracts::{addr_register_data, renew_data, FifsAddrRegistrar, RifToken, RskOwner};
use crate::error::{Result, RnsError};
use crate::registrar::{ChainReader, Commitment, PaymentToken, Registrar};
use crate::utils::{label_hash, token_id};
use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::{Address, Bytes, H256, U256};
use std::sync::Arc;

pub struct RskRegistrar<M> {
    client: Arc<M>,
    rsk_owner: RskOwner<M>,
    registrar: FifsAddrRegistrar<M>,
    rif: RifToken<M>,
    registrar_address: Address,
    renewer_address: Address,
}

impl<M: Middleware + 'static> RskRegistrar<M> {
    pub fn new(client: Arc<M>, network: Network) -> Result<Self> {
        let registrar_address = contract_address(ContractRole::FifsAddrRegistrar, network)?;

        Ok(RskRegistrar {
            rsk_owner: RskOwner::new(
                contract_address(ContractRole::RskOwner, network)?,
                client.clone(),
            ),
            registrar: FifsAddrRegistrar::new(registrar_address, client.clone()),
            rif: RifToken::new(
                contract_address(ContractRole::RifToken, network)?,
                client.clone(),
            ),
            renewer_address: contract_address(ContractRole::Renewer, network)?,
            registrar_address,
            client,
        })
    }
}

#[async_trait]
impl<M: Middleware + 'static> Registrar for RskRegistrar<M> {
    async fn available(&self, label: &str) -> Result<bool> {
        self.rsk_owner
            .available(token_id(label))
            .call()
            .await
            .map_err(RnsError::chain)
    }

    async fn price(&self, label: &str, duration_years: u32) -> Result<U256> {
        self.registrar
            .price(
                label.to_string(),
                U256::zero(),
                U256::from(duration_years),
            )
            .call()
            .await
            .map_err(RnsError::chain)
    }

    async fn commit_to_register(
        &self,
        label: &str,
        owner: Address,
        secret: [u8; 32],
    ) -> Result<Commitment> {
        let hash = self
            .registrar
            .make_commitment(label_hash(label), owner, secret)
            .call()
            .await
            .map_err(RnsError::chain)?;

        let call = self.registrar.commit(hash);
        let pending = call.send().await.map_err(RnsError::chain)?;
        let tx_hash = confirm(pending).await?;

        Ok(Commitment {
            tx_hash,
            hash,
            secret,
        })
    }

    async fn can_reveal(&self, commitment: &Commitment) -> Result<bool> {
        self.registrar
            .can_reveal(commitment.hash)
            .call()
            .await
            .map_err(RnsError::chain)
    }

    async fn register(
        &self,
        label: &str,
        owner: Address,
        commitment: &Commitment,
        duration_years: u32,
        price: U256,
    ) -> Result<H256> {
        // The registered name resolves to its owner until set-addr changes it.
        let data = addr_register_data(label, owner, commitment.secret, duration_years, owner);

        let call = self
            .rif
            .transfer_and_call(self.registrar_address, price, Bytes::from(data));
        let pending = call.send().await.map_err(RnsError::chain)?;
        confirm(pending).await
    }

    async fn renew(&self, label: &str, duration_years: u32, price: U256) -> Result<H256> {
        let data = renew_data(label, duration_years);

        let call = self
            .rif
            .transfer_and_call(self.renewer_address, price, Bytes::from(data));
        let pending = call.send().await.map_err(RnsError::chain)?;
        confirm(pending).await
    }
}

#[async_trait]
impl<M: Middleware + 'static> PaymentToken for RskRegistrar<M> {
    async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.rif
            .balance_of(owner)
            .call()
            .await
            .map_err(RnsError::chain)
    }
}

#[async_trait]
impl<M: Middleware + 'static> ChainReader for RskRegistrar<M> {
    async fn native_balance(&self, owner: Address) -> Result<U256> {
        self.client
            .get_balance(owner, None)
            .await
            .map_err(RnsError::chain)
    }

    async fn gas_price(&self) -> Result<U256> {
        self.client.get_gas_price().await.map_err(RnsError::chain)
    }
}
