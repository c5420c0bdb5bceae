//! Everything a pool state transition touches, passed in explicitly

use bridge_core::{ExecutionContext, PoolConfig};

use crate::events::EventSink;
use crate::ledger::Ledger;
use crate::store::PoolStore;
use crate::token_map::TokenRegistry;
use crate::validate::AddressValidator;

/// Handles for one state transition.
///
/// The enclosing executor owns these and is responsible for discarding all of
/// their changes when an operation fails and it decides to roll back.
pub struct PoolContext<'a> {
    pub exec: ExecutionContext,
    pub config: &'a PoolConfig,
    pub store: &'a mut PoolStore,
    pub ledger: &'a mut dyn Ledger,
    pub registry: &'a dyn TokenRegistry,
    pub validator: &'a dyn AddressValidator,
    pub events: &'a mut dyn EventSink,
}
