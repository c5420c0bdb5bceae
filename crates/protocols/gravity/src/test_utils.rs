//! Shared fixtures for pool tests

use bridge_core::{bridge_denom, AccountId, Coin, EthAddress, ExecutionContext, PoolConfig, TokenAmount};

use crate::context::PoolContext;
use crate::events::PoolEvent;
use crate::ledger::MemoryLedger;
use crate::state::OutgoingTransfer;
use crate::store::PoolStore;
use crate::token_map::TokenMap;
use crate::validate::EthAddressValidator;

pub(crate) const NATIVE_DENOM: &str = "ustake";
pub(crate) const RECEIVER: &str = "0xd041c41EA1bf0F006ADBF2d8A2B9bC8f1c2Fc2b3";

/// Bridge-originated token (sorts before `contract_b`)
pub(crate) fn contract_a() -> EthAddress {
    EthAddress::new("0x429881672B9AE42b8EbA0E26cD9C73711b891Ca5").unwrap()
}

/// Contract deployed for the native denomination
pub(crate) fn contract_b() -> EthAddress {
    EthAddress::new("0x7D1AfA7B718fb893dB30A3aBc0Cfc608AaCfeBB0").unwrap()
}

pub(crate) fn bridged_denom() -> String {
    bridge_denom(&contract_a())
}

pub(crate) fn alice() -> AccountId {
    AccountId::new("cosmos1alice")
}

pub(crate) fn bob() -> AccountId {
    AccountId::new("cosmos1bob")
}

pub(crate) fn transfer(id: u64, contract: &EthAddress, fee: u32) -> OutgoingTransfer {
    OutgoingTransfer {
        id,
        sender: alice(),
        destination: EthAddress::new(RECEIVER).unwrap(),
        token: TokenAmount::new(contract.clone(), 100u32),
        fee: TokenAmount::new(contract.clone(), fee),
    }
}

/// Pool plus in-memory collaborators; alice and bob hold 1000 of each token
pub(crate) struct Harness {
    pub height: u64,
    pub config: PoolConfig,
    pub store: PoolStore,
    pub ledger: MemoryLedger,
    pub registry: TokenMap,
    pub validator: EthAddressValidator,
    pub events: Vec<PoolEvent>,
}

impl Harness {
    pub fn new() -> Self {
        let config = PoolConfig {
            bridge_chain_id: 15,
            bridge_contract_address: Some(
                EthAddress::new("0x8858eeB3DfffA017D4BCE9801D340D36Cf895CCf").unwrap(),
            ),
            ..PoolConfig::default()
        };

        let mut registry = TokenMap::new();
        registry.register_native(NATIVE_DENOM, contract_b()).unwrap();

        let mut ledger = MemoryLedger::new();
        for account in [alice(), bob()] {
            ledger.fund(&account, &Coin::new(NATIVE_DENOM, 1000u32));
            ledger.fund(&account, &Coin::new(bridged_denom(), 1000u32));
        }

        Self {
            height: 1,
            validator: EthAddressValidator::from_config(&config),
            config,
            store: PoolStore::new(),
            ledger,
            registry,
            events: Vec::new(),
        }
    }

    pub fn ctx(&mut self) -> PoolContext<'_> {
        PoolContext {
            exec: ExecutionContext::new(self.height),
            config: &self.config,
            store: &mut self.store,
            ledger: &mut self.ledger,
            registry: &self.registry,
            validator: &self.validator,
            events: &mut self.events,
        }
    }
}
