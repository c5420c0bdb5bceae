//! Token mapping between local denominations and bridge-chain contracts
//!
//! Native-origin denominations are registered explicitly with the contract
//! deployed for them on the remote chain. Bridge-originated vouchers carry
//! their contract in the denomination itself (`gravity0x...`).

use std::collections::BTreeMap;

use bridge_core::types::constants::BRIDGE_DENOM_PREFIX;
use bridge_core::{
    bridge_denom, bridge_denom_to_contract, validate_denom, DenomError, EthAddress, RegistryError,
};
use serde::{Deserialize, Serialize};

/// Where an asset was originally issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetOrigin {
    /// Issued on this chain; custody is lock/unlock
    Native,
    /// Voucher for a remote-chain token; custody is lock+burn / mint+unlock
    Bridged,
}

/// Denomination to contract resolution
pub trait TokenRegistry {
    fn resolve_contract(&self, denom: &str) -> Result<(AssetOrigin, EthAddress), RegistryError>;

    fn resolve_denom(&self, contract: &EthAddress) -> Result<(AssetOrigin, String), RegistryError>;
}

/// Registry backed by an explicit list of native-origin tokens
#[derive(Debug, Clone, Default)]
pub struct TokenMap {
    native: BTreeMap<String, EthAddress>,
    by_contract: BTreeMap<EthAddress, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the remote contract deployed for a native denomination.
    ///
    /// Mappings are write-once: pending transfers refund through the contract
    /// they were submitted under, so neither side may be re-pointed.
    pub fn register_native(
        &mut self,
        denom: &str,
        contract: EthAddress,
    ) -> Result<(), RegistryError> {
        validate_denom(denom)?;
        if denom.starts_with(BRIDGE_DENOM_PREFIX) {
            return Err(DenomError::Invalid {
                denom: denom.to_string(),
            }
            .into());
        }
        if let Some(existing) = self.native.get(denom) {
            return Err(RegistryError::DenomTaken {
                denom: denom.to_string(),
                contract: existing.to_string(),
            });
        }
        if let Some(existing) = self.by_contract.get(&contract) {
            return Err(RegistryError::ContractTaken {
                contract: contract.to_string(),
                denom: existing.clone(),
            });
        }
        self.native.insert(denom.to_string(), contract.clone());
        self.by_contract.insert(contract, denom.to_string());
        Ok(())
    }

    /// Registered native denominations, sorted
    pub fn native_denoms(&self) -> Vec<&str> {
        self.native.keys().map(String::as_str).collect()
    }
}

impl TokenRegistry for TokenMap {
    fn resolve_contract(&self, denom: &str) -> Result<(AssetOrigin, EthAddress), RegistryError> {
        if denom.starts_with(BRIDGE_DENOM_PREFIX) {
            let contract = bridge_denom_to_contract(denom)?;
            return Ok((AssetOrigin::Bridged, contract));
        }
        self.native
            .get(denom)
            .map(|contract| (AssetOrigin::Native, contract.clone()))
            .ok_or_else(|| RegistryError::UnknownDenom {
                denom: denom.to_string(),
            })
    }

    fn resolve_denom(&self, contract: &EthAddress) -> Result<(AssetOrigin, String), RegistryError> {
        match self.by_contract.get(contract) {
            Some(denom) => Ok((AssetOrigin::Native, denom.clone())),
            None => Ok((AssetOrigin::Bridged, bridge_denom(contract))),
        }
    }
}
