//! Configuration types for the bridge pool

use serde::{Deserialize, Serialize};

use crate::errors::PoolError;
use crate::types::OptionalEthAddress;

/// Outgoing pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolConfig {
    /// Chain id of the remote (Ethereum-side) network, carried in notifications
    #[serde(default)]
    pub bridge_chain_id: u64,

    /// Bridge contract on the remote chain, absent until deployed
    #[serde(default)]
    pub bridge_contract_address: OptionalEthAddress,

    /// Default cap on transfers per batch when aggregating fees
    #[serde(default = "default_max_batch_elements")]
    pub max_batch_elements: usize,

    /// Refuse withdrawals to 0x0000000000000000000000000000000000000000
    #[serde(default)]
    pub reject_zero_destination: bool,
}

fn default_max_batch_elements() -> usize {
    100
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            bridge_chain_id: 0,
            bridge_contract_address: None,
            max_batch_elements: default_max_batch_elements(),
            reject_zero_destination: false,
        }
    }
}

impl PoolConfig {
    /// Parse a configuration document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        serde_json::from_str(json).map_err(|e| PoolError::InvalidArgument(format!("config: {}", e)))
    }
}
