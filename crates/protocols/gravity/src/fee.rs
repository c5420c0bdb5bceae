//! Batch fee aggregation over the unbatched pool
//!
//! Relayers use these figures to decide which token batches are worth
//! requesting, and batch creation uses them to refuse batches that would not
//! raise the fee. Both walk the pool in fee-descending order, so the first
//! `max_elements` transfers of a contract are exactly the ones a batch of that
//! size would contain.

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use bridge_core::{AbortError, EthAddress, PoolConfig};

use crate::state::BatchFees;
use crate::store::{PoolPrefix, PoolStore};

/// Fee the next batch of `contract` would carry if built right now.
///
/// Sums at most `max_elements` of the highest fees. A transfer under this
/// contract whose fee names a different contract means the pool is corrupt and
/// the transition must abort.
pub fn batch_fee(
    store: &PoolStore,
    contract: &EthAddress,
    max_elements: usize,
) -> Result<BatchFees, AbortError> {
    let mut batch = BatchFees::empty(contract.clone());
    if max_elements == 0 {
        return Ok(batch);
    }

    let mut fault = None;
    store.iterate(PoolPrefix::Contract(contract), |tx| {
        if tx.fee.contract != *contract {
            fault = Some(AbortError::FeeContractMismatch {
                expected: contract.to_string(),
                found: tx.fee.contract.to_string(),
                id: tx.id,
            });
            return ControlFlow::Break(());
        }
        batch.total_fees += &tx.fee.amount;
        batch.tx_count += 1;
        if batch.tx_count == max_elements {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    if let Some(fault) = fault {
        tracing::error!(contract = %contract, error = %fault, "Corrupted pool while aggregating fees");
        return Err(fault);
    }
    Ok(batch)
}

/// A fee entry for every token type currently in the pool.
///
/// One pass over the whole pool; each contract collects its first
/// `max_elements` transfers and later ones are skipped. The result is sorted
/// ascending by contract address so it is safe to use in consensus code.
pub fn all_batch_fees(store: &PoolStore, max_elements: usize) -> Vec<BatchFees> {
    if max_elements == 0 {
        return Vec::new();
    }

    let mut fees: BTreeMap<EthAddress, BatchFees> = BTreeMap::new();

    store.iterate(PoolPrefix::All, |tx| {
        let contract = &tx.fee.contract;
        let entry = fees
            .entry(contract.clone())
            .or_insert_with(|| BatchFees::empty(contract.clone()));
        if entry.tx_count < max_elements {
            entry.total_fees += &tx.fee.amount;
            entry.tx_count += 1;
        }
        ControlFlow::Continue(())
    });

    tracing::debug!(contracts = fees.len(), max_elements, "Aggregated batch fees");

    // BTreeMap order is ascending by contract address
    fees.into_values().collect()
}

/// `batch_fee` capped at the configured batch size
pub fn configured_batch_fee(
    config: &PoolConfig,
    store: &PoolStore,
    contract: &EthAddress,
) -> Result<BatchFees, AbortError> {
    batch_fee(store, contract, config.max_batch_elements)
}

/// `all_batch_fees` capped at the configured batch size
pub fn configured_batch_fees(config: &PoolConfig, store: &PoolStore) -> Vec<BatchFees> {
    all_batch_fees(store, config.max_batch_elements)
}
