//! Transfer id allocation

use bridge_core::{PoolError, Result};
use serde::{Deserialize, Serialize};

/// Persisted monotonic counter handing out transfer ids, starting at 1
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: Option<u64>,
}

impl IdAllocator {
    /// Restore a counter whose next id is `next`
    pub fn starting_at(next: u64) -> Self {
        Self { next: Some(next) }
    }

    /// The id the next call to `next_id` returns
    pub fn peek(&self) -> u64 {
        self.next.unwrap_or(1)
    }

    /// Fail if handing out another id would exhaust the counter
    pub fn ensure_available(&self) -> Result<u64> {
        let id = self.peek();
        id.checked_add(1)
            .ok_or_else(|| PoolError::Corrupted("transfer id space exhausted".to_string()))
    }

    /// Return the current id and persist its successor
    pub fn next_id(&mut self) -> Result<u64> {
        let id = self.peek();
        self.next = Some(self.ensure_available()?);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.peek(), 1);
        assert_eq!(ids.next_id().unwrap(), 1);
        assert_eq!(ids.next_id().unwrap(), 2);
        assert_eq!(ids.next_id().unwrap(), 3);
        assert_eq!(ids.peek(), 4);
    }

    #[test]
    fn test_restored_counter() {
        let mut ids = IdAllocator::starting_at(41);
        assert_eq!(ids.next_id().unwrap(), 41);
        assert_eq!(ids, IdAllocator::starting_at(42));
    }

    #[test]
    fn test_exhausted_counter_is_corruption() {
        let mut ids = IdAllocator::starting_at(u64::MAX);
        assert!(ids.ensure_available().is_err());
        let err = ids.next_id().unwrap_err();
        assert_eq!(err.error_code(), "corrupted");
        assert_eq!(ids.peek(), u64::MAX);
    }
}
