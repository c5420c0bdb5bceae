//! Gravity Bridge Outgoing Withdrawal Pool
//!
//! Holds withdrawals waiting to be batched to the remote (Ethereum-side)
//! chain. Each withdrawal takes custody of `amount + fee`, gets a unique id,
//! and is kept in fee-priority order so batch builders and relayers can see
//! which transfers a batch would carry and what it would pay.
//!
//! Every operation is deterministic: the same sequence of calls produces the
//! same ids and pool contents on every replica.

pub mod context;
pub mod events;
pub mod fee;
pub mod ids;
pub mod ledger;
pub mod pool;
pub mod state;
pub mod store;
pub mod token_map;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_utils;

pub use context::PoolContext;
pub use events::{EventSink, PoolEvent};
pub use fee::{all_batch_fees, batch_fee, configured_batch_fee, configured_batch_fees};
pub use ids::IdAllocator;
pub use ledger::{Ledger, LedgerParams, MemoryLedger};
pub use pool::{cancel, submit};
pub use state::{BatchFees, OutgoingTransfer};
pub use store::{PoolPrefix, PoolStore};
pub use token_map::{AssetOrigin, TokenMap, TokenRegistry};
pub use validate::{AddressValidator, EthAddressValidator};
