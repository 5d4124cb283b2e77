// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Registration orchestrator
//!
//! Drives one label through the commit-reveal protocol end to end:
//! availability -> price -> balance check -> commitment -> maturity poll ->
//! reveal. All chain interaction goes through the collaborator traits in the
//! parent module; every await is sequential and the only loop is the bounded
//! maturity poll.

use crate::constants::{
    COMMIT_POLL_INTERVAL, COMMIT_POLL_MAX_ATTEMPTS, CONFIRMATION_TIMEOUT, REGISTER_GAS_BUDGET,
};
use crate::error::{Result, RnsError};
use crate::registrar::poll::{CommitmentPoll, PollState};
use crate::registrar::{ChainReader, PaymentToken, Registrar, Registration, Renewal};
use crate::utils::{fqdn, format_rif};
use chrono::Utc;
use ethers::types::{Address, U256};
use rand::rngs::OsRng;
use rand::RngCore;
use std::time::Duration;

/// Tuning knobs for the registration flow. The defaults match the
/// registrar's 60-second minimum commitment age with room to spare.
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub confirmation_timeout: Duration,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        RegistrationConfig {
            poll_interval: COMMIT_POLL_INTERVAL,
            max_poll_attempts: COMMIT_POLL_MAX_ATTEMPTS,
            confirmation_timeout: CONFIRMATION_TIMEOUT,
        }
    }
}

pub struct Orchestrator<'a> {
    registrar: &'a dyn Registrar,
    token: &'a dyn PaymentToken,
    chain: &'a dyn ChainReader,
    config: RegistrationConfig,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        registrar: &'a dyn Registrar,
        token: &'a dyn PaymentToken,
        chain: &'a dyn ChainReader,
    ) -> Self {
        Self::with_config(registrar, token, chain, RegistrationConfig::default())
    }

    pub fn with_config(
        registrar: &'a dyn Registrar,
        token: &'a dyn PaymentToken,
        chain: &'a dyn ChainReader,
        config: RegistrationConfig,
    ) -> Self {
        Orchestrator {
            registrar,
            token,
            chain,
            config,
        }
    }

    /// Register `label` for `owner`, paying for `duration_years`.
    ///
    /// Submits two irreversible transactions (commitment, reveal). Any
    /// failure after the commitment confirmed is reported as
    /// [`RnsError::StrandedCommitment`] so the spent gas is visible to the
    /// caller.
    pub async fn register_domain(
        &self,
        label: &str,
        owner: Address,
        duration_years: u32,
    ) -> Result<Registration> {
        if !self.registrar.available(label).await? {
            return Err(RnsError::DomainUnavailable(fqdn(label)));
        }
        tracing::info!(domain = %fqdn(label), "domain is available");

        let price = self.registrar.price(label, duration_years).await?;
        tracing::info!(price = %format_rif(price), years = duration_years, "quoted price");

        let balance = self.token.balance_of(owner).await?;
        if balance < price {
            return Err(RnsError::insufficient_funds(price, balance));
        }

        self.warn_if_gas_short(owner).await;

        let mut secret = [0u8; 32];
        OsRng.fill_bytes(&mut secret);

        let commitment = tokio::time::timeout(
            self.config.confirmation_timeout,
            self.registrar.commit_to_register(label, owner, secret),
        )
        .await
        .map_err(|_| RnsError::ConfirmationTimeout {
            operation: "commitment",
        })??;
        tracing::info!(tx = ?commitment.tx_hash, "commitment confirmed");

        let mut poll = CommitmentPoll::new(self.config.max_poll_attempts);
        loop {
            let revealable = self
                .registrar
                .can_reveal(&commitment)
                .await
                .map_err(|e| RnsError::stranded(commitment.tx_hash, e))?;

            match poll.observe(revealable) {
                PollState::Ready { attempts } => {
                    tracing::info!(attempts, "commitment ready to reveal");
                    break;
                }
                PollState::TimedOut { attempts } => {
                    return Err(RnsError::stranded(
                        commitment.tx_hash,
                        RnsError::CommitmentTimeout { attempts },
                    ));
                }
                PollState::Polling { attempt } => {
                    tracing::info!(
                        attempt,
                        max = poll.max_attempts(),
                        "commitment not ready, waiting"
                    );
                    tokio::time::sleep(self.config.poll_interval).await;
                }
                PollState::Pending => unreachable!("observe always advances past Pending"),
            }
        }

        // The reveal pays exactly the price quoted above, never a re-read.
        let register_tx = tokio::time::timeout(
            self.config.confirmation_timeout,
            self.registrar
                .register(label, owner, &commitment, duration_years, price),
        )
        .await
        .map_err(|_| {
            RnsError::stranded(
                commitment.tx_hash,
                RnsError::ConfirmationTimeout {
                    operation: "register",
                },
            )
        })?
        .map_err(|e| RnsError::stranded(commitment.tx_hash, e))?;

        Ok(Registration {
            label: label.to_string(),
            owner,
            commit_tx: commitment.tx_hash,
            register_tx,
            price,
            expires_at: Utc::now() + chrono::Duration::days(365 * i64::from(duration_years)),
        })
    }

    /// Renew `label` for `duration_years`, paid by `payer`.
    pub async fn renew(
        &self,
        label: &str,
        payer: Address,
        duration_years: u32,
    ) -> Result<Renewal> {
        let price = self.registrar.price(label, duration_years).await?;
        tracing::info!(price = %format_rif(price), years = duration_years, "renewal price");

        let balance = self.token.balance_of(payer).await?;
        if balance < price {
            return Err(RnsError::insufficient_funds(price, balance));
        }

        let tx_hash = tokio::time::timeout(
            self.config.confirmation_timeout,
            self.registrar.renew(label, duration_years, price),
        )
        .await
        .map_err(|_| RnsError::ConfirmationTimeout { operation: "renew" })??;

        Ok(Renewal {
            label: label.to_string(),
            tx_hash,
            price,
            duration_years,
        })
    }

    /// Advisory check that the native balance covers a rough gas budget for
    /// the two registration transactions. Never fails the flow; the pre-check
    /// races against the chain anyway.
    async fn warn_if_gas_short(&self, owner: Address) {
        let (balance, gas_price) = match (
            self.chain.native_balance(owner).await,
            self.chain.gas_price().await,
        ) {
            (Ok(b), Ok(g)) => (b, g),
            _ => return,
        };

        let budget = gas_price.saturating_mul(U256::from(REGISTER_GAS_BUDGET));
        if balance < budget {
            tracing::warn!(
                %balance,
                %budget,
                "RBTC balance may not cover gas for both transactions"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registrar::Commitment;
    use async_trait::async_trait;
    use ethers::types::H256;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    struct FakeRegistrar {
        available: bool,
        price: U256,
        /// number of not-ready observations before maturity; u32::MAX = never
        ready_after: u32,
        hang_on_commit: bool,
        commits: AtomicU32,
        registers: AtomicU32,
        renews: AtomicU32,
        can_reveal_calls: AtomicU32,
        secrets: Mutex<Vec<[u8; 32]>>,
        last_register: Mutex<Option<(String, Address, u32, U256)>>,
    }

    impl FakeRegistrar {
        fn new(available: bool, price: u64, ready_after: u32) -> Self {
            FakeRegistrar {
                available,
                price: U256::from(price),
                ready_after,
                hang_on_commit: false,
                commits: AtomicU32::new(0),
                registers: AtomicU32::new(0),
                renews: AtomicU32::new(0),
                can_reveal_calls: AtomicU32::new(0),
                secrets: Mutex::new(Vec::new()),
                last_register: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Registrar for FakeRegistrar {
        async fn available(&self, _label: &str) -> Result<bool> {
            Ok(self.available)
        }

        async fn price(&self, _label: &str, _duration_years: u32) -> Result<U256> {
            Ok(self.price)
        }

        async fn commit_to_register(
            &self,
            _label: &str,
            _owner: Address,
            secret: [u8; 32],
        ) -> Result<Commitment> {
            if self.hang_on_commit {
                std::future::pending::<()>().await;
            }
            self.commits.fetch_add(1, Ordering::SeqCst);
            self.secrets.lock().unwrap().push(secret);
            Ok(Commitment {
                tx_hash: H256::repeat_byte(0xc0),
                hash: [0u8; 32],
                secret,
            })
        }

        async fn can_reveal(&self, _commitment: &Commitment) -> Result<bool> {
            let calls = self.can_reveal_calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(self.ready_after != u32::MAX && calls > self.ready_after)
        }

        async fn register(
            &self,
            label: &str,
            owner: Address,
            _commitment: &Commitment,
            duration_years: u32,
            price: U256,
        ) -> Result<H256> {
            self.registers.fetch_add(1, Ordering::SeqCst);
            *self.last_register.lock().unwrap() =
                Some((label.to_string(), owner, duration_years, price));
            Ok(H256::repeat_byte(0x1e))
        }

        async fn renew(&self, _label: &str, _duration_years: u32, _price: U256) -> Result<H256> {
            self.renews.fetch_add(1, Ordering::SeqCst);
            Ok(H256::repeat_byte(0x2e))
        }
    }

    struct FakeToken {
        balance: U256,
    }

    #[async_trait]
    impl PaymentToken for FakeToken {
        async fn balance_of(&self, _owner: Address) -> Result<U256> {
            Ok(self.balance)
        }
    }

    struct FakeChain;

    #[async_trait]
    impl ChainReader for FakeChain {
        async fn native_balance(&self, _owner: Address) -> Result<U256> {
            Ok(U256::exp10(18))
        }

        async fn gas_price(&self) -> Result<U256> {
            Ok(U256::from(1u64))
        }
    }

    fn test_config() -> RegistrationConfig {
        RegistrationConfig {
            poll_interval: Duration::ZERO,
            max_poll_attempts: 12,
            confirmation_timeout: Duration::from_millis(50),
        }
    }

    fn owner() -> Address {
        Address::repeat_byte(0xaa)
    }

    #[tokio::test]
    async fn registers_when_available_and_funded() {
        let registrar = FakeRegistrar::new(true, 100, 0);
        let token = FakeToken {
            balance: U256::from(150u64),
        };
        let orchestrator =
            Orchestrator::with_config(&registrar, &token, &FakeChain, test_config());

        let registration = orchestrator
            .register_domain("alice", owner(), 1)
            .await
            .unwrap();

        assert_eq!(registration.owner, owner());
        assert_eq!(registration.price, U256::from(100u64));
        assert_eq!(registrar.commits.load(Ordering::SeqCst), 1);
        assert_eq!(registrar.registers.load(Ordering::SeqCst), 1);
        // maturity observed on the first attempt
        assert_eq!(registrar.can_reveal_calls.load(Ordering::SeqCst), 1);
        assert!(registration.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn unavailable_label_submits_nothing() {
        let registrar = FakeRegistrar::new(false, 100, 0);
        let token = FakeToken {
            balance: U256::from(1_000u64),
        };
        let orchestrator =
            Orchestrator::with_config(&registrar, &token, &FakeChain, test_config());

        let err = orchestrator
            .register_domain("bob", owner(), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, RnsError::DomainUnavailable(d) if d == "bob.rsk"));
        assert_eq!(registrar.commits.load(Ordering::SeqCst), 0);
        assert_eq!(registrar.registers.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn insufficient_balance_submits_nothing() {
        let registrar = FakeRegistrar::new(true, 500, 0);
        let token = FakeToken {
            balance: U256::from(10u64),
        };
        let orchestrator =
            Orchestrator::with_config(&registrar, &token, &FakeChain, test_config());

        let err = orchestrator
            .register_domain("carol", owner(), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, RnsError::InsufficientFunds { .. }));
        assert_eq!(registrar.commits.load(Ordering::SeqCst), 0);
        assert_eq!(registrar.registers.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn poll_exhaustion_strands_the_commitment() {
        let registrar = FakeRegistrar::new(true, 100, u32::MAX);
        let token = FakeToken {
            balance: U256::from(150u64),
        };
        let orchestrator =
            Orchestrator::with_config(&registrar, &token, &FakeChain, test_config());

        let err = orchestrator
            .register_domain("dave", owner(), 1)
            .await
            .unwrap_err();

        match err {
            RnsError::StrandedCommitment { commit_tx, source } => {
                assert_eq!(commit_tx, H256::repeat_byte(0xc0));
                assert!(matches!(
                    *source,
                    RnsError::CommitmentTimeout { attempts: 12 }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
        // exactly the commitment was submitted, never the reveal
        assert_eq!(registrar.commits.load(Ordering::SeqCst), 1);
        assert_eq!(registrar.registers.load(Ordering::SeqCst), 0);
        // the poll never exceeds its attempt budget
        assert_eq!(registrar.can_reveal_calls.load(Ordering::SeqCst), 12);
    }

    #[tokio::test]
    async fn reveal_uses_the_quoted_price() {
        let registrar = FakeRegistrar::new(true, 777, 2);
        let token = FakeToken {
            balance: U256::from(1_000u64),
        };
        let orchestrator =
            Orchestrator::with_config(&registrar, &token, &FakeChain, test_config());

        orchestrator
            .register_domain("erin", owner(), 3)
            .await
            .unwrap();

        let (label, who, years, price) = registrar.last_register.lock().unwrap().clone().unwrap();
        assert_eq!(label, "erin");
        assert_eq!(who, owner());
        assert_eq!(years, 3);
        assert_eq!(price, U256::from(777u64));
        // two not-ready observations, then maturity
        assert_eq!(registrar.can_reveal_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn commit_confirmation_is_bounded() {
        let mut registrar = FakeRegistrar::new(true, 100, 0);
        registrar.hang_on_commit = true;
        let token = FakeToken {
            balance: U256::from(150u64),
        };
        let orchestrator =
            Orchestrator::with_config(&registrar, &token, &FakeChain, test_config());

        let err = orchestrator
            .register_domain("frank", owner(), 1)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RnsError::ConfirmationTimeout {
                operation: "commitment"
            }
        ));
        assert_eq!(registrar.registers.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn secrets_are_fresh_per_attempt() {
        let registrar = FakeRegistrar::new(true, 100, 0);
        let token = FakeToken {
            balance: U256::from(150u64),
        };
        let orchestrator =
            Orchestrator::with_config(&registrar, &token, &FakeChain, test_config());

        orchestrator
            .register_domain("grace", owner(), 1)
            .await
            .unwrap();
        orchestrator
            .register_domain("heidi", owner(), 1)
            .await
            .unwrap();

        let secrets = registrar.secrets.lock().unwrap();
        assert_eq!(secrets.len(), 2);
        assert_ne!(secrets[0], secrets[1]);
        assert_ne!(secrets[0], [0u8; 32]);
    }

    #[tokio::test]
    async fn renew_checks_balance_first() {
        let registrar = FakeRegistrar::new(true, 500, 0);
        let token = FakeToken {
            balance: U256::from(10u64),
        };
        let orchestrator =
            Orchestrator::with_config(&registrar, &token, &FakeChain, test_config());

        let err = orchestrator.renew("alice", owner(), 1).await.unwrap_err();
        assert!(matches!(err, RnsError::InsufficientFunds { .. }));
        assert_eq!(registrar.renews.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn renew_pays_the_quoted_price() {
        let registrar = FakeRegistrar::new(true, 100, 0);
        let token = FakeToken {
            balance: U256::from(150u64),
        };
        let orchestrator =
            Orchestrator::with_config(&registrar, &token, &FakeChain, test_config());

        let renewal = orchestrator.renew("alice", owner(), 2).await.unwrap();
        assert_eq!(renewal.price, U256::from(100u64));
        assert_eq!(renewal.duration_years, 2);
        assert_eq!(registrar.renews.load(Ordering::SeqCst), 1);
    }
}
