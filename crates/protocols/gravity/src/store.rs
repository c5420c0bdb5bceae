//! Ordered storage for unbatched outgoing transfers
//!
//! Transfers are grouped per fee contract and ordered inside each group by
//! `(fee amount, id)`. Walking a group backwards therefore yields the highest
//! fee first, and among equal fees the most recently added transfer first.
//! A whole-pool walk visits contracts in descending address order.

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use bridge_core::{EthAddress, PoolError, Result, TokenAmount};
use num_bigint::BigUint;

use crate::ids::IdAllocator;
use crate::state::OutgoingTransfer;

/// Transfers of one contract keyed by `(fee amount, id)`
type FeeIndex = BTreeMap<(BigUint, u64), OutgoingTransfer>;

/// Which part of the pool a traversal covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPrefix<'a> {
    All,
    Contract(&'a EthAddress),
}

/// Persisted pool state: the unbatched transfers and the id counter
#[derive(Debug, Clone, Default)]
pub struct PoolStore {
    pool: BTreeMap<EthAddress, FeeIndex>,
    ids: IdAllocator,
}

impl PoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty pool resuming from a persisted id counter
    pub fn with_id_allocator(ids: IdAllocator) -> Self {
        Self {
            pool: BTreeMap::new(),
            ids,
        }
    }

    pub fn id_allocator(&self) -> &IdAllocator {
        &self.ids
    }

    pub(crate) fn next_transfer_id(&mut self) -> Result<u64> {
        self.ids.next_id()
    }

    /// Number of unbatched transfers
    pub fn len(&self) -> usize {
        self.pool.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Contracts with at least one pending transfer, ascending
    pub fn contracts(&self) -> impl Iterator<Item = &EthAddress> {
        self.pool.keys()
    }

    /// Add a transfer keyed by its fee contract, fee amount and id
    pub(crate) fn insert(&mut self, transfer: OutgoingTransfer) -> Result<()> {
        let index = self.pool.entry(transfer.fee.contract.clone()).or_default();
        let key = (transfer.fee.amount.clone(), transfer.id);
        if index.contains_key(&key) {
            return Err(PoolError::Duplicate(format!(
                "transfer {} already in pool",
                transfer.id
            )));
        }
        index.insert(key, transfer);
        Ok(())
    }

    /// Take a transfer out of the pool without touching custody.
    ///
    /// Used by cancellation and by batch construction.
    pub fn remove(&mut self, fee: &TokenAmount, id: u64) -> Result<OutgoingTransfer> {
        let not_found = || PoolError::NotFound(format!("pool transaction {}", id));
        let index = self.pool.get_mut(&fee.contract).ok_or_else(not_found)?;
        let removed = index
            .remove(&(fee.amount.clone(), id))
            .ok_or_else(not_found)?;
        if index.is_empty() {
            self.pool.remove(&fee.contract);
        }
        Ok(removed)
    }

    /// Exact lookup by the pool key
    pub fn by_fee_and_id(
        &self,
        contract: &EthAddress,
        fee_amount: &BigUint,
        id: u64,
    ) -> Result<&OutgoingTransfer> {
        self.pool
            .get(contract)
            .and_then(|index| index.get(&(fee_amount.clone(), id)))
            .ok_or_else(|| PoolError::NotFound(format!("pool transaction {}", id)))
    }

    /// Lookup by id alone.
    ///
    /// Scans the whole pool; `by_fee_and_id` is much faster when the fee is known.
    pub fn by_id(&self, id: u64) -> Result<&OutgoingTransfer> {
        let mut found = None;
        self.iterate(PoolPrefix::All, |tx| {
            if tx.id == id {
                found = Some(tx);
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        });
        found.ok_or_else(|| PoolError::NotFound(format!("pool transaction {}", id)))
    }

    /// All transfers for a contract, highest fee first
    pub fn all_by_contract(&self, contract: &EthAddress) -> Vec<OutgoingTransfer> {
        self.collect(PoolPrefix::Contract(contract))
    }

    /// Every unbatched transfer in pool order
    pub fn all(&self) -> Vec<OutgoingTransfer> {
        self.collect(PoolPrefix::All)
    }

    fn collect(&self, prefix: PoolPrefix<'_>) -> Vec<OutgoingTransfer> {
        let mut out = Vec::new();
        self.iterate(prefix, |tx| {
            out.push(tx.clone());
            ControlFlow::Continue(())
        });
        out
    }

    /// Visit transfers under `prefix` in descending key order.
    ///
    /// The visitor returns `ControlFlow::Break` to stop early.
    pub fn iterate<'a, F>(&'a self, prefix: PoolPrefix<'_>, mut visitor: F)
    where
        F: FnMut(&'a OutgoingTransfer) -> ControlFlow<()>,
    {
        let indexes = match prefix {
            PoolPrefix::All => self.pool.range::<EthAddress, _>(..),
            PoolPrefix::Contract(contract) => self.pool.range::<EthAddress, _>(contract..=contract),
        };
        for tx in indexes.rev().flat_map(|(_, index)| index.values().rev()) {
            if visitor(tx).is_break() {
                break;
            }
        }
    }

    /// Place a record under an arbitrary contract, bypassing key derivation
    #[cfg(test)]
    pub(crate) fn insert_under(&mut self, contract: EthAddress, transfer: OutgoingTransfer) {
        self.pool
            .entry(contract)
            .or_default()
            .insert((transfer.fee.amount.clone(), transfer.id), transfer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{contract_a, contract_b, transfer};

    fn ids(transfers: &[OutgoingTransfer]) -> Vec<u64> {
        transfers.iter().map(|tx| tx.id).collect()
    }

    #[test]
    fn test_fee_descending_within_contract() {
        let mut store = PoolStore::new();
        store.insert(transfer(1, &contract_a(), 10)).unwrap();
        store.insert(transfer(2, &contract_a(), 5)).unwrap();
        store.insert(transfer(3, &contract_a(), 20)).unwrap();

        let fees: Vec<u32> = store
            .all_by_contract(&contract_a())
            .iter()
            .map(|tx| u32::try_from(&tx.fee.amount).unwrap())
            .collect();
        assert_eq!(fees, vec![20, 10, 5]);
    }

    #[test]
    fn test_equal_fees_newest_first() {
        let mut store = PoolStore::new();
        store.insert(transfer(4, &contract_a(), 10)).unwrap();
        store.insert(transfer(9, &contract_a(), 10)).unwrap();
        store.insert(transfer(6, &contract_a(), 10)).unwrap();
        assert_eq!(ids(&store.all_by_contract(&contract_a())), vec![9, 6, 4]);
    }

    #[test]
    fn test_fee_order_is_numeric() {
        let mut store = PoolStore::new();
        store.insert(transfer(1, &contract_a(), 9)).unwrap();
        store.insert(transfer(2, &contract_a(), 256)).unwrap();
        store.insert(transfer(3, &contract_a(), 10)).unwrap();
        assert_eq!(ids(&store.all_by_contract(&contract_a())), vec![2, 3, 1]);
    }

    #[test]
    fn test_global_walk_groups_contracts_descending() {
        // contract_a < contract_b
        let mut store = PoolStore::new();
        store.insert(transfer(1, &contract_a(), 50)).unwrap();
        store.insert(transfer(2, &contract_b(), 1)).unwrap();
        store.insert(transfer(3, &contract_a(), 7)).unwrap();
        store.insert(transfer(4, &contract_b(), 30)).unwrap();
        assert_eq!(ids(&store.all()), vec![4, 2, 1, 3]);
        assert_eq!(store.len(), 4);
        assert_eq!(store.contracts().cloned().collect::<Vec<_>>(), vec![contract_a(), contract_b()]);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut store = PoolStore::new();
        store.insert(transfer(1, &contract_a(), 10)).unwrap();
        let err = store.insert(transfer(1, &contract_a(), 10)).unwrap_err();
        assert!(matches!(err, PoolError::Duplicate(_)));
        assert_eq!(store.len(), 1);

        // same id under a different fee is a different key
        store.insert(transfer(1, &contract_a(), 11)).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_lookups_agree() {
        let mut store = PoolStore::new();
        store.insert(transfer(1, &contract_a(), 10)).unwrap();
        store.insert(transfer(2, &contract_b(), 3)).unwrap();

        let by_key = store
            .by_fee_and_id(&contract_b(), &BigUint::from(3u32), 2)
            .unwrap();
        let by_id = store.by_id(2).unwrap();
        assert_eq!(by_key, by_id);

        assert!(matches!(store.by_id(3), Err(PoolError::NotFound(_))));
        assert!(matches!(
            store.by_fee_and_id(&contract_b(), &BigUint::from(4u32), 2),
            Err(PoolError::NotFound(_))
        ));
    }

    #[test]
    fn test_remove() {
        let mut store = PoolStore::new();
        let tx = transfer(1, &contract_a(), 10);
        store.insert(tx.clone()).unwrap();

        assert_eq!(store.remove(&tx.fee, 1).unwrap(), tx);
        assert!(store.is_empty());
        assert_eq!(store.contracts().count(), 0);
        assert!(matches!(store.remove(&tx.fee, 1), Err(PoolError::NotFound(_))));
    }

    #[test]
    fn test_iterate_stops_early() {
        let mut store = PoolStore::new();
        for id in 1..=5 {
            store.insert(transfer(id, &contract_a(), id as u32)).unwrap();
        }
        let mut seen = Vec::new();
        store.iterate(PoolPrefix::Contract(&contract_a()), |tx| {
            seen.push(tx.id);
            if seen.len() == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen, vec![5, 4]);
    }

    #[test]
    fn test_iterate_unknown_contract_visits_nothing() {
        let mut store = PoolStore::new();
        store.insert(transfer(1, &contract_a(), 10)).unwrap();
        assert!(store.all_by_contract(&contract_b()).is_empty());
    }
}
