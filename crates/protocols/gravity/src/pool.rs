//! Adding withdrawals to the outgoing pool and cancelling them
//!
//! Submitting moves custody first and records the transfer second. Cancelling
//! removes the record first and returns custody second. The two custody
//! regimes fail differently: a burn failing after a successful lock aborts the
//! whole transition, while a mint failing during a refund is an ordinary error.

use bridge_core::{AbortError, AccountId, Coin, EthAddress, PoolError, Result, TokenAmount};
use num_traits::Zero;

use crate::context::PoolContext;
use crate::events::PoolEvent;
use crate::ledger::Ledger;
use crate::state::OutgoingTransfer;
use crate::token_map::AssetOrigin;

fn invalid(message: impl Into<String>) -> PoolError {
    PoolError::InvalidArgument(message.into())
}

/// Add a withdrawal of `amount` to `destination`, paying `fee` to the relayer.
///
/// 1. Validates arguments without touching state
/// 2. Resolves the bridge-chain contract and checks an id is still available
/// 3. Locks `amount + fee` from the sender, burning it for bridge vouchers
/// 4. Allocates an id and inserts the transfer into the pool
///
/// Returns the new transfer id.
pub fn submit(
    ctx: &mut PoolContext<'_>,
    sender: &AccountId,
    destination: &str,
    amount: &Coin,
    fee: &Coin,
) -> Result<u64> {
    if ctx.exec.is_zero() {
        return Err(invalid("execution context is not initialized"));
    }
    if sender.is_empty() {
        return Err(invalid("sender is empty"));
    }
    ctx.validator
        .validate(destination)
        .map_err(|e| invalid(format!("destination: {}", e)))?;
    let destination =
        EthAddress::new(destination).map_err(|e| invalid(format!("destination: {}", e)))?;
    amount
        .validate()
        .map_err(|e| invalid(format!("amount: {}", e)))?;
    fee.validate().map_err(|e| invalid(format!("fee: {}", e)))?;
    if amount.amount.is_zero() {
        return Err(invalid("amount must be positive"));
    }
    let total = amount.checked_add(fee).ok_or_else(|| {
        invalid(format!(
            "fee denomination {} does not match amount denomination {}",
            fee.denom, amount.denom
        ))
    })?;

    let (origin, contract) = ctx.registry.resolve_contract(&total.denom)?;
    // Custody changes below cannot be undone here.
    ctx.store.id_allocator().ensure_available()?;

    ctx.ledger.lock(sender, &total)?;
    if origin == AssetOrigin::Bridged {
        if let Err(source) = ctx.ledger.burn(&total) {
            tracing::error!(
                sender = %sender,
                coin = %total,
                error = %source,
                "Voucher burn failed after lock, aborting transition"
            );
            return Err(AbortError::BurnAfterLock {
                denom: total.denom,
                amount: total.amount,
                source,
            }
            .into());
        }
    }

    let id = ctx.store.next_transfer_id()?;
    let transfer = OutgoingTransfer {
        id,
        sender: sender.clone(),
        destination,
        token: TokenAmount::new(contract.clone(), amount.amount.clone()),
        fee: TokenAmount::new(contract.clone(), fee.amount.clone()),
    };
    ctx.store.insert(transfer)?;

    ctx.events.emit(PoolEvent::WithdrawalReceived {
        contract: ctx.config.bridge_contract_address.clone(),
        bridge_chain_id: ctx.config.bridge_chain_id,
        outgoing_tx_id: id,
        nonce: id,
    });

    tracing::info!(
        id,
        sender = %sender,
        contract = %contract,
        amount = %amount.amount,
        fee = %fee.amount,
        "Added transfer to outgoing pool"
    );

    Ok(id)
}

/// Cancel an unbatched transfer and refund amount plus fee to its sender.
///
/// `NotFound` means the transfer never existed, was already cancelled, or has
/// been taken into a batch; none of these are cancellable.
pub fn cancel(ctx: &mut PoolContext<'_>, id: u64, requester: &AccountId) -> Result<()> {
    if ctx.exec.is_zero() || id < 1 || requester.is_empty() {
        return Err(invalid("arguments"));
    }

    let tx = ctx.store.by_id(id)?.clone();

    if tx.sender.is_empty() {
        return Err(PoolError::Corrupted(format!(
            "transfer {} has no sender in store",
            id
        )));
    }
    if tx.sender != *requester {
        return Err(PoolError::Unauthorized {
            requester: requester.to_string(),
            id,
        });
    }
    if !tx.is_consistent() {
        return Err(invalid(format!(
            "inconsistent tokens to cancel: fee {} token {}",
            tx.fee.contract, tx.token.contract
        )));
    }

    let (origin, denom) = ctx.registry.resolve_denom(&tx.token.contract)?;

    ctx.store
        .remove(&tx.fee, id)
        .map_err(|_| PoolError::NotInPool { id })?;
    if ctx
        .store
        .by_fee_and_id(&tx.fee.contract, &tx.fee.amount, id)
        .is_ok()
    {
        return Err(PoolError::Duplicate(format!(
            "transfer {} was not fully removed from the pool, a duplicate must exist",
            id
        )));
    }

    let total = tx.token.checked_add(&tx.fee).ok_or_else(|| AbortError::TokenContractMismatch {
        token: tx.token.contract.to_string(),
        fee: tx.fee.contract.to_string(),
        id,
    })?;
    let refund = Coin::new(denom, total.amount);
    refund_custody(&mut *ctx.ledger, origin, requester, &refund)?;

    ctx.events.emit(PoolEvent::WithdrawalCancelled {
        contract: ctx.config.bridge_contract_address.clone(),
        bridge_chain_id: ctx.config.bridge_chain_id,
        outgoing_tx_id: id,
    });

    tracing::info!(
        id,
        requester = %requester,
        refund = %refund,
        "Cancelled outgoing transfer and refunded sender"
    );

    Ok(())
}

/// Reverse the custody taken by `submit`.
///
/// Nothing has left custody yet when minting, so failures here are returned
/// as ordinary errors.
fn refund_custody<L: Ledger + ?Sized>(
    ledger: &mut L,
    origin: AssetOrigin,
    to: &AccountId,
    refund: &Coin,
) -> Result<()> {
    if origin == AssetOrigin::Bridged {
        ledger.mint(refund).map_err(|e| {
            tracing::warn!(coin = %refund, error = %e, "Refund mint failed");
            e
        })?;
    }
    ledger.unlock(to, refund)?;
    Ok(())
}
