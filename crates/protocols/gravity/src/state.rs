//! Pool records and fee summaries

use bridge_core::types::amount_serde;
use bridge_core::{AccountId, EthAddress, TokenAmount};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// A pending withdrawal to the remote chain.
///
/// `token` and `fee` are always on the same contract. Records are never
/// mutated after they enter the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingTransfer {
    pub id: u64,
    pub sender: AccountId,
    pub destination: EthAddress,
    pub token: TokenAmount,
    pub fee: TokenAmount,
}

impl OutgoingTransfer {
    /// Contract both amounts are denominated in
    pub fn contract(&self) -> &EthAddress {
        &self.fee.contract
    }

    pub fn is_consistent(&self) -> bool {
        self.token.contract == self.fee.contract
    }
}

/// Fee a batch of one token type would collect if built right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFees {
    pub token: EthAddress,
    #[serde(with = "amount_serde")]
    pub total_fees: BigUint,
    pub tx_count: usize,
}

impl BatchFees {
    pub fn empty(token: EthAddress) -> Self {
        Self {
            token,
            total_fees: BigUint::default(),
            tx_count: 0,
        }
    }
}
